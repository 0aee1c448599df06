//! Declarative widget descriptors compiled to deterministic SVG/HTML fragments.
//!
//! A widget is a `type` tag plus a props object. Props are validated strictly
//! against the registered schema (every key required, unknown keys rejected,
//! every failing field reported), then rendered by a pure generator. Identical
//! input always produces byte-identical output.
//!
//! ```
//! use serde_json::json;
//!
//! let svg = assessment_widgets::generate(
//!     "numberLine",
//!     &json!({
//!         "width": 400, "height": 100,
//!         "min": -10, "max": 10, "tickInterval": 5,
//!         "value": -7, "highlightColor": "#e53935",
//!         "showTickLabels": true
//!     }),
//! )
//! .unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod errors;
pub mod plane;
pub mod registry;
pub mod render;
pub mod schema;
pub mod types;
pub mod widgets;

mod log;

use indexmap::IndexMap;
use serde_json::{Value, json};

pub use errors::{FieldIssue, FieldPath, ValidationError, WidgetError, WidgetResult};
pub use registry::{Generate, Widget};
pub use schema::Schema;

use crate::log::debug;

/// Validate `props` against the schema registered for `widget_type` and render it.
pub fn generate(widget_type: &str, props: &Value) -> WidgetResult<String> {
    debug!(widget_type, "dispatch");
    registry::lookup(widget_type)?.generate(props)
}

/// Render a descriptor whose `type` tag travels inside the object.
///
/// The remaining keys are the props, so stray keys are still rejected.
pub fn generate_descriptor(descriptor: &Value) -> WidgetResult<String> {
    let reject = |message: &str| {
        WidgetError::from(ValidationError {
            widget_type: "(descriptor)".to_string(),
            issues: vec![FieldIssue::new(FieldPath::root().key("type"), message)],
        })
    };
    let Value::Object(fields) = descriptor else {
        return Err(WidgetError::from(ValidationError {
            widget_type: "(descriptor)".to_string(),
            issues: vec![FieldIssue::new(FieldPath::root(), "expected object")],
        }));
    };
    let widget_type = match fields.get("type") {
        Some(Value::String(t)) => t.as_str(),
        Some(_) => return Err(reject("expected string")),
        None => return Err(reject("required")),
    };
    let props: serde_json::Map<String, Value> = fields
        .iter()
        .filter(|(key, _)| key.as_str() != "type")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    generate(widget_type, &Value::Object(props))
}

/// Parse `json_text` and render it as props for `widget_type`.
pub fn generate_json(widget_type: &str, json_text: &str) -> WidgetResult<String> {
    let props: Value = serde_json::from_str(json_text).map_err(|e| ValidationError {
        widget_type: widget_type.to_string(),
        issues: vec![FieldIssue::new(FieldPath::root(), format!("malformed JSON: {e}"))],
    })?;
    generate(widget_type, &props)
}

/// Props schema of every registered widget, in registration order.
pub fn typed_schemas() -> IndexMap<&'static str, Schema> {
    registry::entries()
        .iter()
        .map(|e| (e.type_name, (e.schema)()))
        .collect()
}

/// JSON-Schema export of every props schema, in registration order.
pub fn json_schemas() -> IndexMap<&'static str, Value> {
    typed_schemas()
        .into_iter()
        .map(|(name, schema)| (name, schema.to_json_schema()))
        .collect()
}

/// JSON Schema of the descriptor form of `widget_type`: its props plus a
/// required `type` constant.
pub fn descriptor_json_schema(widget_type: &str) -> WidgetResult<Value> {
    let entry = registry::lookup(widget_type)?;
    let mut doc = (entry.schema)().to_json_schema();
    if let Some(properties) = doc.get_mut("properties").and_then(Value::as_object_mut) {
        let mut tagged = serde_json::Map::new();
        tagged.insert("type".to_string(), json!({"const": entry.type_name}));
        tagged.append(properties);
        *properties = tagged;
    }
    if let Some(required) = doc.get_mut("required").and_then(Value::as_array_mut) {
        required.insert(0, json!("type"));
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_numbers() -> Value {
        json!({"min": 1, "q1": 2, "median": 3, "q3": 4, "max": 5})
    }

    #[test]
    fn descriptor_splits_off_the_type_tag() {
        let mut descriptor = five_numbers();
        descriptor["type"] = json!("fiveNumberSummaryTable");
        let html = generate_descriptor(&descriptor).unwrap();
        assert_eq!(html, generate("fiveNumberSummaryTable", &five_numbers()).unwrap());
    }

    #[test]
    fn descriptor_without_a_tag_is_a_validation_error() {
        let err = generate_descriptor(&five_numbers()).unwrap_err();
        match err {
            WidgetError::Validation(v) => assert_eq!(v.paths(), vec!["type"]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_reported_at_the_root() {
        let err = generate_json("dataTable", "{\"caption\": ").unwrap_err();
        match err {
            WidgetError::Validation(v) => {
                assert_eq!(v.paths(), vec![""]);
                assert!(v.issues[0].message.starts_with("malformed JSON"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn descriptor_schema_requires_the_tag() {
        let doc = descriptor_json_schema("numberLine").unwrap();
        assert_eq!(doc["properties"]["type"], json!({"const": "numberLine"}));
        assert_eq!(doc["required"][0], json!("type"));
        assert_eq!(doc["additionalProperties"], json!(false));
    }

    #[test]
    fn schemas_follow_registration_order() {
        let names: Vec<&str> = json_schemas().keys().copied().collect();
        assert_eq!(names.first(), Some(&"barChart"));
        assert_eq!(names.last(), Some(&"dataTable"));
        assert_eq!(names.len(), registry::entries().len());
    }
}
