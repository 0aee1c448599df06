//! Structural checks over exported JSON-Schema documents.
//!
//! Every registered widget schema must be free of optional and defaulted
//! fields. The [`Schema`](super::Schema) type cannot express either, but the
//! exported JSON is what downstream tooling consumes, so the check walks that.

use serde_json::Value;

/// Paths of every non-required property and every `default` keyword in `schema`.
pub fn optional_field_paths(schema: &Value) -> Vec<String> {
    let mut out = Vec::new();
    walk(schema, "$", &mut out);
    out
}

fn walk(schema: &Value, path: &str, out: &mut Vec<String>) {
    let Some(map) = schema.as_object() else {
        return;
    };
    if map.contains_key("default") {
        out.push(format!("{path} (default)"));
    }
    if let Some(properties) = map.get("properties").and_then(Value::as_object) {
        let required: Vec<&str> = map
            .get("required")
            .and_then(Value::as_array)
            .map(|r| r.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        for (name, sub) in properties {
            let sub_path = format!("{path}.{name}");
            if !required.contains(&name.as_str()) {
                out.push(sub_path.clone());
            }
            walk(sub, &sub_path, out);
        }
    }
    if let Some(items) = map.get("items") {
        walk(items, &format!("{path}[]"), out);
    }
    if let Some(variants) = map.get("anyOf").and_then(Value::as_array) {
        for v in variants {
            walk(v, path, out);
        }
    }
}

/// A registry-wide integrity failure
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrityIssue {
    pub widget_type: &'static str,
    pub message: String,
}

/// Check every registered schema: no optional/default fields, and the
/// exported JSON-Schema parses back to the identical schema.
pub fn check_registry() -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    for entry in crate::registry::entries() {
        let schema = (entry.schema)();
        let json = schema.to_json_schema();
        for path in optional_field_paths(&json) {
            issues.push(IntegrityIssue {
                widget_type: entry.type_name,
                message: format!("optional or defaulted field at {path}"),
            });
        }
        match super::Schema::from_json_schema(&json) {
            Ok(parsed) if parsed == schema => {}
            Ok(_) => issues.push(IntegrityIssue {
                widget_type: entry.type_name,
                message: "exported JSON-Schema does not round-trip".to_string(),
            }),
            Err(e) => issues.push(IntegrityIssue {
                widget_type: entry.type_name,
                message: e.to_string(),
            }),
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_optional_properties_at_depth() {
        let doc = json!({
            "type": "object",
            "properties": {
                "data": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"label": {"type": "string"}, "value": {"type": "number"}},
                        "required": ["label"]
                    }
                },
                "color": {"type": "string", "default": "red"}
            },
            "required": ["data", "color"]
        });
        assert_eq!(
            optional_field_paths(&doc),
            vec!["$.data[].value", "$.color (default)"]
        );
    }

    #[test]
    fn fully_required_schema_is_clean() {
        let doc = json!({
            "type": "object",
            "properties": {"a": {"anyOf": [{"type": "string"}, {"type": "null"}]}},
            "required": ["a"]
        });
        assert!(optional_field_paths(&doc).is_empty());
    }

    #[test]
    fn registry_is_clean() {
        assert_eq!(check_registry(), vec![]);
    }
}
