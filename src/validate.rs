//! Graph validation and edge normalization.
//!
//! Both operations run on a raw `serde_json::Value` *before* it is
//! deserialized into the typed [`crate::graph::Container`] tree: the wire
//! format allows ids as either strings or integral numbers, and edges in
//! either primitive (`source`/`target`) or multiset (`sources`/`targets`)
//! form, and the typed tree only ever sees the canonical shape.

use crate::error::{LayoutError, Result};
use serde_json::Value;

/// Validate graph structure and ids, recursively. Does not mutate `value`.
pub fn validate_graph(value: &Value) -> Result<()> {
    let obj = value
        .as_object()
        .ok_or_else(|| LayoutError::InvalidGraph("graph must be a mapping".to_string()))?;

    let id = obj
        .get("id")
        .ok_or_else(|| LayoutError::InvalidGraph("graph is missing required field 'id'".to_string()))?;
    validate_id(id)?;

    validate_children(obj.get("children"))
}

fn validate_children(children: Option<&Value>) -> Result<()> {
    let Some(children) = children else {
        return Ok(());
    };
    let items = children
        .as_array()
        .ok_or_else(|| LayoutError::InvalidGraph("children must be an array".to_string()))?;
    for child in items {
        let obj = child
            .as_object()
            .ok_or_else(|| LayoutError::InvalidGraph("child must be a mapping".to_string()))?;
        if let Some(id) = obj.get("id") {
            validate_id(id)?;
        }
        validate_children(obj.get("children"))?;
    }
    Ok(())
}

/// A valid id is a string or an integral number. Booleans, arrays, mappings,
/// and non-integral reals are rejected.
fn validate_id(value: &Value) -> Result<()> {
    match value {
        Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Ok(())
            } else if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 {
                    Ok(())
                } else {
                    Err(LayoutError::InvalidGraph(format!(
                        "id must be an integral number, got {f}"
                    )))
                }
            } else {
                Err(LayoutError::InvalidGraph("id is not a valid number".to_string()))
            }
        }
        other => Err(LayoutError::InvalidGraph(format!(
            "id must be a string or integral number, got {other}"
        ))),
    }
}

/// Rewrite every integral-number id in the tree to its decimal string form,
/// in place. Must run only after [`validate_graph`] has succeeded.
pub fn coerce_ids(value: &mut Value) {
    if let Some(obj) = value.as_object_mut() {
        if let Some(id) = obj.get("id").cloned() {
            obj.insert("id".to_string(), Value::String(coerce_id_string(&id)));
        }
        if let Some(children) = obj.get_mut("children").and_then(|c| c.as_array_mut()) {
            for child in children {
                coerce_ids(child);
            }
        }
    }
}

fn coerce_id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Rewrite every edge's primitive `source`/`target` (+ optional
/// `sourcePort`/`targetPort`) form into the `sources`/`targets` multiset
/// form. Edges already in multiset form are left untouched. Recurses into
/// every container's own `edges` and `children`.
pub fn normalize_edges(value: &mut Value) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    if let Some(edges) = obj.get_mut("edges").and_then(|e| e.as_array_mut()) {
        for edge in edges {
            normalize_one_edge(edge);
        }
    }
    if let Some(children) = obj.get_mut("children").and_then(|c| c.as_array_mut()) {
        for child in children {
            normalize_edges(child);
        }
    }
}

fn normalize_one_edge(edge: &mut Value) {
    let Some(obj) = edge.as_object_mut() else {
        return;
    };
    let has_primitive = obj.contains_key("source") || obj.contains_key("target");
    if !has_primitive {
        return;
    }

    let source_port = obj.remove("sourcePort").and_then(|v| v.as_str().map(String::from));
    let target_port = obj.remove("targetPort").and_then(|v| v.as_str().map(String::from));
    let source = obj.remove("source").and_then(|v| v.as_str().map(String::from));
    let target = obj.remove("target").and_then(|v| v.as_str().map(String::from));

    let source_endpoint = source_port.or(source);
    let target_endpoint = target_port.or(target);

    if let Some(endpoint) = source_endpoint {
        obj.insert(
            "sources".to_string(),
            Value::Array(vec![Value::String(endpoint)]),
        );
    }
    if let Some(endpoint) = target_endpoint {
        obj.insert(
            "targets".to_string(),
            Value::Array(vec![Value::String(endpoint)]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validate_accepts_string_and_integer_ids() {
        assert!(validate_graph(&json!({"id": "x"})).is_ok());
        assert!(validate_graph(&json!({"id": 2})).is_ok());
    }

    #[test]
    fn validate_rejects_missing_id() {
        assert!(validate_graph(&json!({})).is_err());
    }

    #[test]
    fn validate_rejects_non_integral_id() {
        assert!(validate_graph(&json!({"id": 1.2})).is_err());
    }

    #[test]
    fn validate_rejects_boolean_array_and_object_ids() {
        assert!(validate_graph(&json!({"id": true})).is_err());
        assert!(validate_graph(&json!({"id": []})).is_err());
        assert!(validate_graph(&json!({"id": {}})).is_err());
    }

    #[test]
    fn validate_recurses_into_children() {
        let bad = json!({"id": "root", "children": [{"id": 1.5}]});
        assert!(validate_graph(&bad).is_err());
    }

    #[test]
    fn coerce_ids_turns_integers_into_decimal_strings() {
        let mut v = json!({"id": 2, "children": [{"id": 7}]});
        coerce_ids(&mut v);
        assert_eq!(v["id"], Value::String("2".to_string()));
        assert_eq!(v["children"][0]["id"], Value::String("7".to_string()));
    }

    #[test]
    fn normalize_rewrites_primitive_edge() {
        let mut v = json!({
            "id": "root",
            "edges": [{"id": "e1", "source": "n1", "target": "n2"}]
        });
        normalize_edges(&mut v);
        assert_eq!(v["edges"][0]["sources"], json!(["n1"]));
        assert_eq!(v["edges"][0]["targets"], json!(["n2"]));
    }

    #[test]
    fn normalize_prefers_ports_over_nodes() {
        let mut v = json!({
            "id": "root",
            "edges": [{
                "id": "e1",
                "source": "n1",
                "sourcePort": "n1.p1",
                "target": "n2",
                "targetPort": "n2.p1"
            }]
        });
        normalize_edges(&mut v);
        assert_eq!(v["edges"][0]["sources"], json!(["n1.p1"]));
        assert_eq!(v["edges"][0]["targets"], json!(["n2.p1"]));
    }

    #[test]
    fn normalize_leaves_extended_form_alone() {
        let mut v = json!({
            "id": "root",
            "edges": [{"id": "e1", "sources": ["n1"], "targets": ["n2", "n3"]}]
        });
        normalize_edges(&mut v);
        assert_eq!(v["edges"][0]["targets"], json!(["n2", "n3"]));
    }
}
