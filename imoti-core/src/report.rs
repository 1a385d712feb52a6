//! City-grouped report assembly and rendering.
//!
//! `CityIndex` is the canonical shape handed to rendering: city buckets in
//! first-seen order, listing records in append order inside each bucket.
//! `TextReport` renders the plain-text document; it expects keys already
//! translated and performs no translation itself.

use crate::tree::scalar_to_text;
use serde_json::{Map, Value};

/// One listing, keyed by translated field names.
pub type ListingRecord = Map<String, Value>;

/// The field used as a listing's section heading.
const DISTRICT_KEY: &str = "district";

/// Ordered city name → ordered listing records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityIndex {
    buckets: Vec<(String, Vec<ListingRecord>)>,
}

impl CityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record to the named bucket, creating the bucket at the
    /// end of the index when it is new.
    pub fn push(&mut self, city: &str, record: ListingRecord) {
        match self.buckets.iter_mut().find(|(name, _)| name == city) {
            Some((_, records)) => records.push(record),
            None => self.buckets.push((city.to_string(), vec![record])),
        }
    }

    /// Append a whole bucket. An empty record list still creates the
    /// bucket, so its heading appears in the report.
    pub fn push_bucket(&mut self, city: &str, records: Vec<ListingRecord>) {
        match self.buckets.iter_mut().find(|(name, _)| name == city) {
            Some((_, existing)) => existing.extend(records),
            None => self.buckets.push((city.to_string(), records)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of city buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of records across all buckets.
    pub fn record_count(&self) -> usize {
        self.buckets.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(name, _)| name.as_str())
    }

    pub fn records(&self, city: &str) -> Option<&[ListingRecord]> {
        self.buckets
            .iter()
            .find(|(name, _)| name == city)
            .map(|(_, records)| records.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ListingRecord])> {
        self.buckets
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// The index as a `city → sequence of records` tree, for the JSON
    /// intermediate file.
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        for (city, records) in &self.buckets {
            let items = records
                .iter()
                .map(|record| Value::Object(record.clone()))
                .collect();
            out.insert(city.clone(), Value::Array(items));
        }
        Value::Object(out)
    }
}

/// Output boundary: turn a city index into document bytes.
pub trait ReportRenderer {
    fn render(&self, index: &CityIndex) -> Vec<u8>;
}

/// Plain-text report: one `City:` heading per bucket, one numbered section
/// per listing headed by its district, one `field: value` line per
/// remaining field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport;

impl TextReport {
    fn record_heading(record: &ListingRecord, idx: usize) -> String {
        let district = record
            .iter()
            .find(|(key, _)| key.to_lowercase() == DISTRICT_KEY)
            .map(|(_, value)| scalar_to_text(value))
            .filter(|text| !text.is_empty());

        district.unwrap_or_else(|| format!("Property {}", idx))
    }

    fn render_record(out: &mut String, record: &ListingRecord, idx: usize) {
        out.push_str(&format!(
            "{}. District: {}\n",
            idx,
            Self::record_heading(record, idx)
        ));

        for (key, value) in record {
            // District is already in the heading
            if key.to_lowercase() == DISTRICT_KEY {
                continue;
            }
            out.push_str(&format!("  - {}: {}\n", key, scalar_to_text(value)));
        }
        out.push('\n');
    }
}

impl ReportRenderer for TextReport {
    fn render(&self, index: &CityIndex) -> Vec<u8> {
        if index.is_empty() {
            return b"No data available\n".to_vec();
        }

        let mut out = String::new();
        for (city, records) in index.iter() {
            out.push_str(&format!("City: {}\n\n", city));
            for (idx, record) in records.iter().enumerate() {
                Self::render_record(&mut out, record, idx + 1);
            }
        }
        out.into_bytes()
    }
}
