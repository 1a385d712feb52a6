//! Machine translation pipeline for Bulgarian property listings
//!
//! This crate turns a schema-free Bulgarian listing tree into its English
//! counterpart with every embedded integer spelled out as Bulgarian words
//! in Latin transliteration, then regroups the result by city for report
//! rendering.
//!
//! # Workflow Example
//!
//! ```ignore
//! use imoti_core::{ListingSource, ReportRenderer, SampleListings, TextReport};
//! use imoti_mt::{GoogleTranslateProvider, TranslationOptions, assemble_city_index, normalize};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Fetch the raw Bulgarian tree
//!     let listings = SampleListings.fetch_listings()?;
//!
//!     // 2. Translate it, spelling out the embedded numbers
//!     let provider = GoogleTranslateProvider::from_env()?;
//!     let opts = TranslationOptions::default();
//!     let translated = normalize(&listings, &provider, &opts).await?;
//!
//!     // 3. Group by city and render the report
//!     let index = assemble_city_index(&translated, &provider, &opts).await?;
//!     let document = TextReport.render(&index);
//!
//!     std::io::Write::write_all(&mut std::io::stdout(), &document)?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extract;
pub mod google_translate;
pub mod mock;
pub mod normalize;
pub mod reconstruct;
pub mod translator;


// Re-export main types for convenient access
pub use error::{MtError, MtResult};
pub use extract::{
    CITY_KEY, LISTING_MARKER_KEYS, UNKNOWN_CITY, assemble_city_index, detect_city,
    extract_listings, group_by_city, is_listing_like,
};
pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use normalize::normalize;
pub use reconstruct::reconstruct_scalar;
pub use translator::{
    MachineTranslator, TranslationOptions, normalize_locale, translate_or_original,
    validate_locale,
};
