//! Machine Translation trait and utilities
//!
//! This module defines the `MachineTranslator` trait for provider
//! abstraction, enabling support for different MT backends (Google
//! Translate, mock, etc.) without coupling the pipeline to any specific
//! implementation, plus the options shared by the tree-walking passes.
//!
//! # Example
//!
//! ```ignore
//! use imoti_mt::{MachineTranslator, GoogleTranslateProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!
//!     let result = provider.translate("квартал", "bg", "en").await?;
//!     println!("{}", result); // "district"
//!
//!     Ok(())
//! }
//! ```

use crate::error::{MtError, MtResult};
use async_trait::async_trait;

/// Default bound on tree nesting for the recursive walks.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Generic trait for machine translation providers
///
/// Implementations of this trait handle the actual translation work,
/// whether through an API (Google Translate) or deterministic logic (Mock).
///
/// All methods are async to support I/O-bound operations like network requests.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_locale` - Source language code (e.g., "bg")
    /// * `target_locale` - Target language code (e.g., "en", "en-US")
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(MtError)` - If translation fails
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Get the name of this translation provider
    ///
    /// Used for logging and debugging to identify which provider handled a
    /// translation.
    fn provider_name(&self) -> &str;
}

/// Settings shared by the tree-walking translation passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOptions {
    pub source_locale: String,
    pub target_locale: String,
    /// Maximum accepted tree nesting; deeper input aborts the walk with
    /// `MtError::RecursionLimitExceeded` instead of overflowing the stack.
    pub max_depth: usize,
}

impl TranslationOptions {
    pub fn new(source_locale: &str, target_locale: &str) -> Self {
        Self {
            source_locale: source_locale.to_string(),
            target_locale: target_locale.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for TranslationOptions {
    /// Bulgarian to English, the pipeline's home direction.
    fn default() -> Self {
        Self::new("bg", "en")
    }
}

/// Translate `text`, substituting the original on provider failure.
///
/// An unavailable translation is recoverable by contract: the walk keeps
/// the untranslated text, logs a warning and continues. Empty input skips
/// the provider call entirely.
pub async fn translate_or_original(
    text: &str,
    translator: &dyn MachineTranslator,
    opts: &TranslationOptions,
) -> String {
    if text.is_empty() {
        return String::new();
    }

    match translator
        .translate(text, &opts.source_locale, &opts.target_locale)
        .await
    {
        Ok(translated) => translated,
        Err(err) => {
            tracing::warn!(
                "Translation unavailable via {}: {} (keeping original text)",
                translator.provider_name(),
                err
            );
            text.to_string()
        }
    }
}

/// Normalize a locale code by stripping region information
///
/// Converts locale codes from BCP 47 format to ISO 639-1 format:
/// - `en-US` → `en`
/// - `bg-BG` → `bg`
/// - `en` → `en` (unchanged)
pub fn normalize_locale(locale: &str) -> String {
    // Split on hyphen and take the first part (language code)
    locale.split('-').next().unwrap_or(locale).to_lowercase()
}

/// Validate that a locale code is in acceptable format
///
/// Checks that the locale code contains only alphanumeric characters,
/// hyphens, and underscores (following ISO 639 conventions).
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}
