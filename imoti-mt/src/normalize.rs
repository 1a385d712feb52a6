//! Structure-preserving translation of listing trees
//!
//! Walks an arbitrarily nested JSON value and produces a tree of
//! identical shape: mapping keys are translated, string scalars are
//! rebuilt through [`reconstruct_scalar`], containers recurse. Key
//! order and sequence order survive the walk end-to-end.
//!
//! # Example
//!
//! ```ignore
//! use imoti_mt::{MockMode, MockTranslator, TranslationOptions, normalize};
//! use serde_json::json;
//!
//! let tree = json!({"София": [{"цена": "3435 лева"}]});
//! let mock = MockTranslator::new(MockMode::NoOp);
//! let opts = TranslationOptions::default();
//! let translated = normalize(&tree, &mock, &opts).await?;
//! ```

use crate::error::{MtError, MtResult};
use crate::reconstruct::reconstruct_scalar;
use crate::translator::{MachineTranslator, TranslationOptions, translate_or_original};
use imoti_core::tree::{is_container, scalar_to_text};
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;

/// Translate a whole listing tree, preserving its shape
///
/// The root is expected to be a mapping (city label to bucket) or a
/// sequence of listings. Top-level mapping values that are containers
/// recurse through the full walk; top-level scalars are stringified and
/// plain-translated without numeral reconstruction. A root that is
/// neither mapping nor sequence yields an empty mapping.
///
/// When two source keys translate to the same target key, the later
/// value wins and the entry keeps the earlier position. This mirrors
/// plain insertion into an ordered map and is intentional.
///
/// # Arguments
///
/// * `root` - Input tree
/// * `translator` - Translation provider for keys and text
/// * `opts` - Locale pair and recursion limit
///
/// # Returns
///
/// * `Ok(Value)` - Translated tree of identical shape
/// * `Err(MtError::RecursionLimitExceeded)` - Tree nested deeper than
///   `opts.max_depth`
pub async fn normalize(
    root: &Value,
    translator: &dyn MachineTranslator,
    opts: &TranslationOptions,
) -> MtResult<Value> {
    match root {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, value) in map {
                let translated_key = translate_or_original(key, translator, opts).await;
                let normalized = if is_container(value) {
                    normalize_node(value, translator, opts, 1).await?
                } else {
                    Value::String(
                        translate_or_original(&scalar_to_text(value), translator, opts).await,
                    )
                };
                out.insert(translated_key, normalized);
            }
            Ok(Value::Object(out))
        }
        Value::Array(_) => normalize_node(root, translator, opts, 0).await,
        // Degenerate root: nothing to group under, nothing to report
        _ => Ok(Value::Object(Map::new())),
    }
}

/// Recursive worker behind [`normalize`]
///
/// Boxed future so the async recursion has a nameable type.
fn normalize_node<'a>(
    node: &'a Value,
    translator: &'a dyn MachineTranslator,
    opts: &'a TranslationOptions,
    depth: usize,
) -> Pin<Box<dyn Future<Output = MtResult<Value>> + Send + 'a>> {
    Box::pin(async move {
        if depth > opts.max_depth {
            return Err(MtError::RecursionLimitExceeded(opts.max_depth));
        }

        match node {
            Value::Object(map) => {
                let mut out = Map::new();
                for (key, value) in map {
                    let translated_key = translate_or_original(key, translator, opts).await;
                    let normalized = normalize_node(value, translator, opts, depth + 1).await?;
                    out.insert(translated_key, normalized);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(normalize_node(item, translator, opts, depth + 1).await?);
                }
                Ok(Value::Array(out))
            }
            Value::String(text) => {
                Ok(Value::String(reconstruct_scalar(text, translator, opts).await))
            }
            // Numbers, booleans and null become their text form without
            // a provider call
            other => Ok(Value::String(scalar_to_text(other))),
        }
    })
}
