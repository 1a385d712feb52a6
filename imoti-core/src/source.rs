//! Listing acquisition boundary.
//!
//! A `ListingSource` produces the raw listing tree the translation pipeline
//! consumes: a mapping from city name to a sequence of flat records with
//! `"<integer> <unit words>"` string values. The concrete sources are a JSON
//! file (the interchange format written by the upstream export step) and an
//! embedded sample dataset.

use serde_json::{Value, json};
use std::path::PathBuf;

/// Error at the acquisition boundary.
#[derive(Debug)]
pub enum SourceError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Io(err) => write!(f, "I/O error: {}", err),
            SourceError::Parse(err) => write!(f, "invalid JSON: {}", err),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io(err) => Some(err),
            SourceError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err)
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err)
    }
}

/// Input boundary for raw listing trees.
pub trait ListingSource {
    fn fetch_listings(&self) -> Result<Value, SourceError>;

    /// Short name for logging and CLI output.
    fn source_name(&self) -> &str;
}

/// Listings read from a UTF-8 JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ListingSource for JsonFileSource {
    fn fetch_listings(&self) -> Result<Value, SourceError> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn source_name(&self) -> &str {
        "JSON file"
    }
}

/// The embedded sample dataset: ten Bulgarian listings across four cities,
/// in the same shape the database export produces.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleListings;

impl ListingSource for SampleListings {
    fn fetch_listings(&self) -> Result<Value, SourceError> {
        Ok(json!({
            "София": [
                {
                    "квартал": "Драгалевци",
                    "тип": "Къща",
                    "площ": "240 квадратни метра",
                    "цена": "824545 лева",
                    "цена на квадратен метър": "3435 лева"
                },
                {
                    "квартал": "Лозенец",
                    "тип": "Апартамент",
                    "площ": "90 квадратни метра",
                    "цена": "270000 лева",
                    "цена на квадратен метър": "3000 лева"
                },
                {
                    "квартал": "Витоша",
                    "тип": "Къща",
                    "площ": "200 квадратни метра",
                    "цена": "650000 лева",
                    "цена на квадратен метър": "3250 лева"
                },
                {
                    "квартал": "Младост",
                    "тип": "Апартамент",
                    "площ": "85 квадратни метра",
                    "цена": "195000 лева",
                    "цена на квадратен метър": "2294 лева"
                }
            ],
            "Пловдив": [
                {
                    "квартал": "Център",
                    "тип": "Апартамент",
                    "площ": "120 квадратни метра",
                    "цена": "300000 лева",
                    "цена на квадратен метър": "2500 лева"
                },
                {
                    "квартал": "Кършияка",
                    "тип": "Къща",
                    "площ": "180 квадратни метра",
                    "цена": "450000 лева",
                    "цена на квадратен метър": "2500 лева"
                }
            ],
            "Варна": [
                {
                    "квартал": "Чайка",
                    "тип": "Апартамент",
                    "площ": "95 квадратни метра",
                    "цена": "200000 лева",
                    "цена на квадратен метър": "2105 лева"
                },
                {
                    "квартал": "Виница",
                    "тип": "Къща",
                    "площ": "150 квадратни метра",
                    "цена": "360000 лева",
                    "цена на квадратен метър": "2400 лева"
                }
            ],
            "Бургас": [
                {
                    "квартал": "Лазур",
                    "тип": "Апартамент",
                    "площ": "85 квадратни метра",
                    "цена": "220000 лева",
                    "цена на квадратен метър": "2588 лева"
                },
                {
                    "квартал": "Меден Рудник",
                    "тип": "Къща",
                    "площ": "200 квадратни метра",
                    "цена": "380000 лева",
                    "цена на квадратен метър": "1900 лева"
                }
            ]
        }))
    }

    fn source_name(&self) -> &str {
        "embedded sample"
    }
}
