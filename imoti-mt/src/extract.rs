//! Heuristic listing extraction and grouping by city
//!
//! When the input does not already look like "city label to list of
//! listings", this module walks the tree, picks out mappings that look
//! like individual listings, and groups them into a [`CityIndex`] ready
//! for rendering. The classification is deliberately approximate: it
//! keys off a small set of marker field names and accepts whatever the
//! provider makes of the keys.
//!
//! # Example
//!
//! ```ignore
//! use imoti_mt::{MockMode, MockTranslator, TranslationOptions, assemble_city_index};
//! use serde_json::json;
//!
//! let tree = json!([{"city": "Sofia", "district": "Lozenets"}]);
//! let mock = MockTranslator::new(MockMode::NoOp);
//! let opts = TranslationOptions::default();
//! let index = assemble_city_index(&tree, &mock, &opts).await?;
//! assert_eq!(index.cities().collect::<Vec<_>>(), vec!["Sofia"]);
//! ```

use crate::error::{MtError, MtResult};
use crate::translator::{MachineTranslator, TranslationOptions, translate_or_original};
use imoti_core::report::{CityIndex, ListingRecord};
use imoti_core::tree::{is_container, scalar_to_text};
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;

/// Field names whose (translated) presence marks a mapping as a listing
pub const LISTING_MARKER_KEYS: [&str; 4] = ["district", "type", "area", "price"];

/// Field name used to pick the grouping bucket for a listing
pub const CITY_KEY: &str = "city";

/// Bucket label for listings without a recognizable city field
pub const UNKNOWN_CITY: &str = "Unknown";

/// Bucket label when nothing in the input groups by city at all
const CATCH_ALL_BUCKET: &str = "Properties";

/// Field name used when a bare scalar has to stand in for a record
const VALUE_FIELD: &str = "Value";

/// True when a mapping looks like an individual listing
///
/// Each key is lowercased, run through the provider, lowercased again
/// and checked against [`LISTING_MARKER_KEYS`]. One match is enough.
///
/// Approximate on purpose. False positives: any mapping that reuses a
/// marker word as a key ("area" on a geographic region). False
/// negatives: listings whose keys the provider renders as synonyms
/// ("region" instead of "district"). Callers accept both.
pub async fn is_listing_like(
    record: &Map<String, Value>,
    translator: &dyn MachineTranslator,
    opts: &TranslationOptions,
) -> bool {
    for key in record.keys() {
        let translated = translate_or_original(&key.to_lowercase(), translator, opts).await;
        if LISTING_MARKER_KEYS.contains(&translated.to_lowercase().as_str()) {
            return true;
        }
    }
    false
}

/// Flatten a tree into the listing-like mappings it contains
///
/// Depth-first, order-preserving, no deduplication. A listing-like
/// mapping is taken whole without recursing into it; anything else is
/// searched further. Scalars never match.
pub async fn extract_listings(
    node: &Value,
    translator: &dyn MachineTranslator,
    opts: &TranslationOptions,
) -> MtResult<Vec<ListingRecord>> {
    let mut records = Vec::new();
    collect_listings(node, translator, opts, 0, &mut records).await?;
    Ok(records)
}

fn collect_listings<'a>(
    node: &'a Value,
    translator: &'a dyn MachineTranslator,
    opts: &'a TranslationOptions,
    depth: usize,
    records: &'a mut Vec<ListingRecord>,
) -> Pin<Box<dyn Future<Output = MtResult<()>> + Send + 'a>> {
    Box::pin(async move {
        if depth > opts.max_depth {
            return Err(MtError::RecursionLimitExceeded(opts.max_depth));
        }

        match node {
            Value::Object(map) => {
                if is_listing_like(map, translator, opts).await {
                    records.push(map.clone());
                } else {
                    for value in map.values() {
                        collect_listings(value, translator, opts, depth + 1, records).await?;
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    collect_listings(item, translator, opts, depth + 1, records).await?;
                }
            }
            _ => {}
        }

        Ok(())
    })
}

/// Find the city a listing belongs to
///
/// Scans keys in order for the first one whose translation matches
/// [`CITY_KEY`] (case-insensitive) and returns that value as text.
/// Returns `None` when no key matches or the matching value is empty;
/// later city-like keys are not consulted once one has matched.
pub async fn detect_city(
    record: &ListingRecord,
    translator: &dyn MachineTranslator,
    opts: &TranslationOptions,
) -> Option<String> {
    for (key, value) in record {
        let translated = translate_or_original(&key.to_lowercase(), translator, opts).await;
        if translated.to_lowercase() == CITY_KEY {
            let city = scalar_to_text(value);
            if city.is_empty() {
                return None;
            }
            return Some(city);
        }
    }
    None
}

/// Group extracted listings into city buckets
///
/// Buckets appear in first-seen order; records keep extraction order
/// within their bucket. Listings without a detectable city land under
/// [`UNKNOWN_CITY`].
pub async fn group_by_city(
    records: Vec<ListingRecord>,
    translator: &dyn MachineTranslator,
    opts: &TranslationOptions,
) -> CityIndex {
    let mut index = CityIndex::new();
    for record in records {
        let city = match detect_city(&record, translator, opts).await {
            Some(city) => city,
            None => UNKNOWN_CITY.to_string(),
        };
        index.push(&city, record);
    }
    index
}

/// Turn one bucket value into a flat record list
///
/// A mapping bucket is searched for listings and falls back to a single
/// record of itself when none are found. A sequence contributes its
/// elements, wrapping non-mapping elements as value records. A scalar
/// becomes one value record.
async fn flatten_bucket(
    bucket: &Value,
    translator: &dyn MachineTranslator,
    opts: &TranslationOptions,
) -> MtResult<Vec<ListingRecord>> {
    match bucket {
        Value::Object(map) => {
            let extracted = extract_listings(bucket, translator, opts).await?;
            if extracted.is_empty() {
                Ok(vec![map.clone()])
            } else {
                Ok(extracted)
            }
        }
        Value::Array(items) => Ok(items
            .iter()
            .map(|item| match item {
                Value::Object(map) => map.clone(),
                other => wrap_value_record(other),
            })
            .collect()),
        other => Ok(vec![wrap_value_record(other)]),
    }
}

fn wrap_value_record(value: &Value) -> ListingRecord {
    let mut record = Map::new();
    record.insert(
        VALUE_FIELD.to_string(),
        Value::String(scalar_to_text(value)),
    );
    record
}

/// Build the city index for an arbitrary (usually already translated)
/// tree
///
/// Three stages, first one that produces buckets wins:
///
/// 1. A mapping root with at least one container value is taken as
///    "city label to bucket" directly; scalar-valued entries are
///    dropped.
/// 2. Otherwise the whole tree goes through [`extract_listings`] and
///    the results are grouped with [`group_by_city`].
/// 3. If still nothing, the input lands whole under one catch-all
///    bucket.
///
/// Empty or degenerate input yields an empty index, which the renderer
/// turns into its placeholder document.
pub async fn assemble_city_index(
    root: &Value,
    translator: &dyn MachineTranslator,
    opts: &TranslationOptions,
) -> MtResult<CityIndex> {
    let mut index = CityIndex::new();

    match root {
        Value::Object(map) if !map.is_empty() => {
            let mut found_bucket = false;
            for (key, value) in map {
                if is_container(value) {
                    found_bucket = true;
                    let records = flatten_bucket(value, translator, opts).await?;
                    index.push_bucket(key, records);
                }
            }
            if !found_bucket {
                let records = extract_listings(root, translator, opts).await?;
                index = group_by_city(records, translator, opts).await;
            }
        }
        Value::Array(items) if !items.is_empty() => {
            let records = extract_listings(root, translator, opts).await?;
            index = group_by_city(records, translator, opts).await;
        }
        // Empty or degenerate input: nothing to report on
        _ => return Ok(index),
    }

    if index.is_empty() {
        let records = flatten_bucket(root, translator, opts).await?;
        index.push_bucket(CATCH_ALL_BUCKET, records);
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockMode, MockTranslator};
    use serde_json::json;

    fn opts() -> TranslationOptions {
        TranslationOptions::default()
    }

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("Expected object, got {:?}", other),
        }
    }

    // ========== Listing Classification Tests ==========

    #[tokio::test]
    async fn test_single_marker_key_is_enough() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let record = as_map(json!({"district": "Лозенец", "floor": 3}));
        assert!(is_listing_like(&record, &mock, &opts()).await);
    }

    #[tokio::test]
    async fn test_marker_match_is_case_insensitive() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let record = as_map(json!({"Price": "270000 leva"}));
        assert!(is_listing_like(&record, &mock, &opts()).await);
    }

    #[tokio::test]
    async fn test_marker_match_goes_through_translator() {
        let mock = MockTranslator::with_mappings("en", &[("квартал", "district")]);
        let record = as_map(json!({"квартал": "Лозенец"}));
        assert!(is_listing_like(&record, &mock, &opts()).await);
    }

    #[tokio::test]
    async fn test_no_marker_keys_is_not_listing_like() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let record = as_map(json!({"foo": "bar"}));
        assert!(!is_listing_like(&record, &mock, &opts()).await);
    }

    // ========== Extraction Tests ==========

    #[tokio::test]
    async fn test_extract_finds_nothing_in_plain_mapping() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!({"foo": "bar"});
        let records = extract_listings(&tree, &mock, &opts()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_extract_descends_into_nested_containers() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!({
            "region": {
                "listings": [
                    {"district": "Лозенец"},
                    {"price": "100 leva"}
                ]
            }
        });

        let records = extract_listings(&tree, &mock, &opts()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["district"], json!("Лозенец"));
        assert_eq!(records[1]["price"], json!("100 leva"));
    }

    #[tokio::test]
    async fn test_listing_like_mapping_is_taken_whole() {
        // No recursion into a matched mapping, so the nested mapping
        // stays inside its parent record
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!([{"district": "A", "details": {"price": "100"}}]);

        let records = extract_listings(&tree, &mock, &opts()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].contains_key("details"));
    }

    #[tokio::test]
    async fn test_extract_preserves_discovery_order() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!([
            {"district": "first"},
            {"wrapper": [{"district": "second"}]},
            {"district": "third"}
        ]);

        let records = extract_listings(&tree, &mock, &opts()).await.unwrap();
        let districts: Vec<&Value> = records.iter().map(|r| &r["district"]).collect();
        assert_eq!(districts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_extract_hits_recursion_limit() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let mut tree = json!({"district": "дъно"});
        for _ in 0..6 {
            tree = json!({"wrapper": tree});
        }
        let shallow = TranslationOptions::new("bg", "en").with_max_depth(4);

        let result = extract_listings(&tree, &mock, &shallow).await;
        assert!(matches!(result, Err(MtError::RecursionLimitExceeded(4))));
    }

    // ========== City Detection Tests ==========

    #[tokio::test]
    async fn test_detect_city_present() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let record = as_map(json!({"city": "Sofia", "district": "Лозенец"}));
        let city = detect_city(&record, &mock, &opts()).await;
        assert_eq!(city, Some("Sofia".to_string()));
    }

    #[tokio::test]
    async fn test_detect_city_via_translation() {
        let mock = MockTranslator::with_mappings("en", &[("град", "city")]);
        let record = as_map(json!({"град": "Пловдив"}));
        let city = detect_city(&record, &mock, &opts()).await;
        assert_eq!(city, Some("Пловдив".to_string()));
    }

    #[tokio::test]
    async fn test_detect_city_absent() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let record = as_map(json!({"district": "Лозенец"}));
        assert_eq!(detect_city(&record, &mock, &opts()).await, None);
    }

    #[tokio::test]
    async fn test_detect_city_empty_value() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let record = as_map(json!({"city": "", "district": "Лозенец"}));
        assert_eq!(detect_city(&record, &mock, &opts()).await, None);
    }

    // ========== Grouping Tests ==========

    #[tokio::test]
    async fn test_group_by_city_first_seen_order() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let records = vec![
            as_map(json!({"city": "Sofia", "district": "A"})),
            as_map(json!({"city": "Plovdiv", "district": "B"})),
            as_map(json!({"city": "Sofia", "district": "C"})),
        ];

        let index = group_by_city(records, &mock, &opts()).await;
        assert_eq!(index.cities().collect::<Vec<_>>(), vec!["Sofia", "Plovdiv"]);
        assert_eq!(index.records("Sofia").unwrap().len(), 2);
        assert_eq!(index.records("Plovdiv").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_group_without_city_uses_sentinel() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let records = vec![as_map(json!({"district": "A"}))];

        let index = group_by_city(records, &mock, &opts()).await;
        assert_eq!(index.cities().collect::<Vec<_>>(), vec![UNKNOWN_CITY]);
    }

    // ========== Index Assembly Tests ==========

    #[tokio::test]
    async fn test_assemble_uses_mapping_root_as_buckets() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!({
            "София": [{"district": "Лозенец"}],
            "Пловдив": [{"district": "Център"}]
        });

        let index = assemble_city_index(&tree, &mock, &opts()).await.unwrap();
        assert_eq!(index.cities().collect::<Vec<_>>(), vec!["София", "Пловдив"]);
        assert_eq!(index.record_count(), 2);
    }

    #[tokio::test]
    async fn test_assemble_drops_scalar_entries_next_to_buckets() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!({
            "note": "изготвено днес",
            "София": [{"district": "Лозенец"}]
        });

        let index = assemble_city_index(&tree, &mock, &opts()).await.unwrap();
        assert_eq!(index.cities().collect::<Vec<_>>(), vec!["София"]);
    }

    #[tokio::test]
    async fn test_assemble_flattens_mapping_bucket_via_extraction() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!({
            "София": {
                "обява1": {"district": "A"},
                "обява2": {"district": "B"}
            }
        });

        let index = assemble_city_index(&tree, &mock, &opts()).await.unwrap();
        assert_eq!(index.records("София").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_assemble_keeps_opaque_mapping_bucket_whole() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!({"София": {"foo": "bar"}});

        let index = assemble_city_index(&tree, &mock, &opts()).await.unwrap();
        let records = index.records("София").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["foo"], json!("bar"));
    }

    #[tokio::test]
    async fn test_assemble_wraps_scalar_bucket_elements() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!({"София": ["свободен", {"district": "A"}]});

        let index = assemble_city_index(&tree, &mock, &opts()).await.unwrap();
        let records = index.records("София").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Value"], json!("свободен"));
        assert_eq!(records[1]["district"], json!("A"));
    }

    #[tokio::test]
    async fn test_assemble_extracts_when_root_is_all_scalar() {
        // A flat listing at the root has no container values, so the
        // extraction stage classifies the root itself
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!({"district": "Лозенец", "price": "270000 leva"});

        let index = assemble_city_index(&tree, &mock, &opts()).await.unwrap();
        assert_eq!(index.cities().collect::<Vec<_>>(), vec![UNKNOWN_CITY]);
        assert_eq!(index.record_count(), 1);
    }

    #[tokio::test]
    async fn test_assemble_groups_array_root_by_city() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!([
            {"city": "Sofia", "district": "A"},
            {"district": "B"}
        ]);

        let index = assemble_city_index(&tree, &mock, &opts()).await.unwrap();
        assert_eq!(
            index.cities().collect::<Vec<_>>(),
            vec!["Sofia", UNKNOWN_CITY]
        );
    }

    #[tokio::test]
    async fn test_assemble_falls_back_to_catch_all_bucket() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!({"foo": "bar"});

        let index = assemble_city_index(&tree, &mock, &opts()).await.unwrap();
        assert_eq!(index.cities().collect::<Vec<_>>(), vec!["Properties"]);
        let records = index.records("Properties").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["foo"], json!("bar"));
    }

    #[tokio::test]
    async fn test_assemble_catch_all_wraps_scalar_elements() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!(["първи", "втори"]);

        let index = assemble_city_index(&tree, &mock, &opts()).await.unwrap();
        let records = index.records("Properties").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Value"], json!("първи"));
    }

    #[tokio::test]
    async fn test_assemble_empty_input_yields_empty_index() {
        let mock = MockTranslator::new(MockMode::NoOp);
        for tree in [json!({}), json!([]), json!(null)] {
            let index = assemble_city_index(&tree, &mock, &opts()).await.unwrap();
            assert!(index.is_empty());
        }
    }

    #[tokio::test]
    async fn test_assemble_keeps_empty_bucket() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let tree = json!({"София": []});

        let index = assemble_city_index(&tree, &mock, &opts()).await.unwrap();
        assert_eq!(index.cities().collect::<Vec<_>>(), vec!["София"]);
        assert_eq!(index.record_count(), 0);
    }
}
