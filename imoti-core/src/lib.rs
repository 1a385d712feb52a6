pub mod numerals;
pub mod report;
pub mod source;
pub mod tree;

// Re-export the main types for convenient access
pub use numerals::{Magnitude, NumeralError, NumeralToken, decompose, join_tokens, spell};
pub use report::{CityIndex, ListingRecord, ReportRenderer, TextReport};
pub use source::{JsonFileSource, ListingSource, SampleListings, SourceError};
pub use tree::{TreeShape, is_container, scalar_to_text, shape_of};
