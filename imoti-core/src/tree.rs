//! Helpers over the untyped listing tree.
//!
//! The tree type is `serde_json::Value` with the `preserve_order` feature,
//! so mappings keep insertion order end to end.

use serde_json::Value;

/// Container-and-order skeleton of a tree, ignoring scalar content.
///
/// Two trees with equal shapes have the same container kinds, cardinalities
/// and ordering at every level. Used to check that translation passes
/// preserve structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeShape {
    Mapping(Vec<TreeShape>),
    Sequence(Vec<TreeShape>),
    Scalar,
}

pub fn shape_of(node: &Value) -> TreeShape {
    match node {
        Value::Object(map) => TreeShape::Mapping(map.values().map(shape_of).collect()),
        Value::Array(items) => TreeShape::Sequence(items.iter().map(shape_of).collect()),
        _ => TreeShape::Scalar,
    }
}

pub fn is_container(node: &Value) -> bool {
    matches!(node, Value::Object(_) | Value::Array(_))
}

/// Canonical text form of a node.
///
/// Strings come back as-is; other scalars take their JSON rendering
/// (`5` → `"5"`, `null` → `"null"`). Containers render as compact JSON,
/// which only happens for malformed field values.
pub fn scalar_to_text(node: &Value) -> String {
    match node {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_ignores_scalar_content() {
        let a = json!({"city": "Sofia", "listings": [{"price": "100 leva"}, {"price": 5}]});
        let b = json!({"grad": "Varna", "oferti": [{"cena": null}, {"cena": true}]});
        assert_eq!(shape_of(&a), shape_of(&b));
    }

    #[test]
    fn test_shape_detects_cardinality_change() {
        let a = json!([1, 2, 3]);
        let b = json!([1, 2]);
        assert_ne!(shape_of(&a), shape_of(&b));
    }

    #[test]
    fn test_shape_detects_container_kind_change() {
        let a = json!({"x": [1]});
        let b = json!({"x": {"y": 1}});
        assert_ne!(shape_of(&a), shape_of(&b));
    }

    #[test]
    fn test_scalar_to_text() {
        assert_eq!(scalar_to_text(&json!("квартал")), "квартал");
        assert_eq!(scalar_to_text(&json!(5)), "5");
        assert_eq!(scalar_to_text(&json!(2.5)), "2.5");
        assert_eq!(scalar_to_text(&json!(true)), "true");
        assert_eq!(scalar_to_text(&Value::Null), "null");
    }

    #[test]
    fn test_is_container() {
        assert!(is_container(&json!({})));
        assert!(is_container(&json!([])));
        assert!(!is_container(&json!("text")));
        assert!(!is_container(&json!(42)));
        assert!(!is_container(&Value::Null));
    }
}
