//! Scalar reconstruction: spell the amount, translate the rest
//!
//! Listing values arrive as strings mixing a numeric amount with unit
//! text, e.g. `"3435 лева"` or `"240 квадратни метра"`. Machine
//! translators mangle bare digits attached to Bulgarian unit words, so
//! the amount is split off, spelled out with [`imoti_core::numerals`],
//! and only the unit text goes through the provider.
//!
//! # Example
//!
//! ```ignore
//! use imoti_mt::{MockMode, MockTranslator, TranslationOptions, reconstruct_scalar};
//!
//! let mock = MockTranslator::new(MockMode::NoOp);
//! let opts = TranslationOptions::default();
//! let result = reconstruct_scalar("3435 leva", &mock, &opts).await;
//! assert_eq!(result, "tri hilyadi chetiristotin trideset i pet leva");
//! ```

use crate::translator::{MachineTranslator, TranslationOptions, translate_or_original};
use imoti_core::numerals;
use regex::Regex;
use std::sync::LazyLock;

/// First maximal run of decimal digits in a scalar
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Currency stem providers produce for the Bulgarian lev ("lev", "Lev",
/// "levs", "BGN lev", ...)
const CURRENCY_STEM: &str = "lev";

/// Canonical plural written next to spelled-out amounts
const CURRENCY_PLURAL: &str = "leva";

/// True when the text contains at least one decimal digit run
///
/// Deliberately coarse: digits inside identifiers or postal codes also
/// count, and spelled-out numbers do not. Callers treat a match as "this
/// scalar carries an amount" and accept the false positives.
pub fn contains_digit_run(text: &str) -> bool {
    DIGIT_RUN.is_match(text)
}

/// Collapse any translated remainder that mentions the lev into the
/// canonical plural form
///
/// The rule is a verbatim port of the upstream behavior: one fixed
/// output spelling for every grammatical form the provider may emit.
/// It fires on substring match, so unrelated words containing "lev"
/// are also rewritten.
fn normalize_currency(translated: String) -> String {
    if translated.to_lowercase().contains(CURRENCY_STEM) {
        CURRENCY_PLURAL.to_string()
    } else {
        translated
    }
}

/// Rebuild one scalar: numeral words first, translated remainder after
///
/// Finds the first digit run, spells it in Bulgarian number words, and
/// translates whatever text is left around it. Strings without digits,
/// runs that overflow `u64`, and amounts beyond the spellable range all
/// degrade to plain translation of the whole string. Never fails; a
/// broken provider yields the original text in place of a translation.
///
/// # Arguments
///
/// * `text` - Scalar to reconstruct
/// * `translator` - Translation provider for the non-numeric part
/// * `opts` - Locale pair for provider calls
///
/// # Returns
///
/// The reconstructed string, `"<numeral words> <remainder>"`.
pub async fn reconstruct_scalar(
    text: &str,
    translator: &dyn MachineTranslator,
    opts: &TranslationOptions,
) -> String {
    let run = match DIGIT_RUN.find(text) {
        Some(run) => run,
        None => return translate_or_original(text, translator, opts).await,
    };

    // A run too long for u64 degrades to whole-string translation
    let amount = match run.as_str().parse::<u64>() {
        Ok(amount) => amount,
        Err(_) => return translate_or_original(text, translator, opts).await,
    };

    // So does an amount past the spellable range
    let words = match numerals::spell(amount) {
        Ok(words) => words,
        Err(_) => return translate_or_original(text, translator, opts).await,
    };

    // Remove the first run only; later digit runs stay as they are
    let mut rest = String::with_capacity(text.len() - run.len());
    rest.push_str(&text[..run.start()]);
    rest.push_str(&text[run.end()..]);
    let remainder = rest.trim();

    let translated = if remainder.is_empty() {
        String::new()
    } else {
        normalize_currency(translate_or_original(remainder, translator, opts).await)
    };

    // Numeral words always lead, regardless of where the digits sat
    format!("{} {}", words, translated)
}
