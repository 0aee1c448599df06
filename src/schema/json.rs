//! JSON-Schema export and import.
//!
//! Export is used to constrain structured model output; import exists so that
//! the exported document can be checked to describe exactly the schema it
//! came from.

use miette::Diagnostic;
use serde_json::{Map, Value, json};
use thiserror::Error;

use super::{ArraySchema, Field, NumberSchema, Schema};

/// Reasons a JSON-Schema document falls outside the supported subset
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("{path}: property `{name}` is not required")]
    #[diagnostic(code(widgets::schema::optional_field))]
    OptionalField { path: String, name: String },

    #[error("{path}: `default` is not allowed")]
    #[diagnostic(code(widgets::schema::default_value))]
    DefaultValue { path: String },

    #[error("{path}: objects must set additionalProperties to false")]
    #[diagnostic(code(widgets::schema::open_object))]
    OpenObject { path: String },

    #[error("{path}: unsupported schema: {detail}")]
    #[diagnostic(code(widgets::schema::unsupported))]
    Unsupported { path: String, detail: String },
}

impl Schema {
    /// Render as a JSON-Schema document.
    pub fn to_json_schema(&self) -> Value {
        match self {
            Schema::Number(n) => {
                let kind = if n.integer { "integer" } else { "number" };
                let mut out = Map::new();
                out.insert("type".into(), json!(kind));
                if let Some(v) = n.minimum {
                    out.insert("minimum".into(), json!(v));
                }
                if let Some(v) = n.exclusive_minimum {
                    out.insert("exclusiveMinimum".into(), json!(v));
                }
                if let Some(v) = n.maximum {
                    out.insert("maximum".into(), json!(v));
                }
                if let Some(v) = n.exclusive_maximum {
                    out.insert("exclusiveMaximum".into(), json!(v));
                }
                Value::Object(out)
            }
            Schema::String { min_length } => {
                if *min_length > 0 {
                    json!({"type": "string", "minLength": min_length})
                } else {
                    json!({"type": "string"})
                }
            }
            Schema::Boolean => json!({"type": "boolean"}),
            Schema::Enum(values) => json!({"type": "string", "enum": values}),
            Schema::Array(a) => {
                let mut out = Map::new();
                out.insert("type".into(), json!("array"));
                out.insert("items".into(), a.items.to_json_schema());
                if let Some(n) = a.min_items {
                    out.insert("minItems".into(), json!(n));
                }
                if let Some(n) = a.max_items {
                    out.insert("maxItems".into(), json!(n));
                }
                Value::Object(out)
            }
            Schema::Object(fields) => {
                let mut properties = Map::new();
                for f in fields {
                    properties.insert(f.name.clone(), f.schema.to_json_schema());
                }
                let required: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
                json!({
                    "type": "object",
                    "properties": properties,
                    "required": required,
                    "additionalProperties": false,
                })
            }
            Schema::Nullable(inner) => {
                json!({"anyOf": [inner.to_json_schema(), {"type": "null"}]})
            }
            Schema::AnyOf(variants) => {
                let variants: Vec<Value> = variants.iter().map(Schema::to_json_schema).collect();
                json!({ "anyOf": variants })
            }
        }
    }

    /// Parse a document produced by [`Schema::to_json_schema`].
    pub fn from_json_schema(value: &Value) -> Result<Schema, SchemaError> {
        parse(value, "$")
    }
}

fn unsupported(path: &str, detail: impl Into<String>) -> SchemaError {
    SchemaError::Unsupported {
        path: path.to_string(),
        detail: detail.into(),
    }
}

fn parse(value: &Value, path: &str) -> Result<Schema, SchemaError> {
    let Some(map) = value.as_object() else {
        return Err(unsupported(path, "schema must be an object"));
    };
    if map.contains_key("default") {
        return Err(SchemaError::DefaultValue {
            path: path.to_string(),
        });
    }

    if let Some(any_of) = map.get("anyOf") {
        let Some(variants) = any_of.as_array() else {
            return Err(unsupported(path, "anyOf must be an array"));
        };
        let null = json!({"type": "null"});
        if variants.len() == 2 && variants[1] == null {
            return Ok(parse(&variants[0], path)?.nullable());
        }
        let parsed = variants
            .iter()
            .map(|v| parse(v, path))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Schema::AnyOf(parsed));
    }

    let kind = map.get("type").and_then(Value::as_str).unwrap_or("");
    match kind {
        "number" | "integer" => Ok(Schema::Number(NumberSchema {
            integer: kind == "integer",
            minimum: map.get("minimum").and_then(Value::as_f64),
            exclusive_minimum: map.get("exclusiveMinimum").and_then(Value::as_f64),
            maximum: map.get("maximum").and_then(Value::as_f64),
            exclusive_maximum: map.get("exclusiveMaximum").and_then(Value::as_f64),
        })),
        "string" => match map.get("enum") {
            Some(Value::Array(values)) => values
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| unsupported(path, "enum values must be strings"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Schema::Enum),
            Some(_) => Err(unsupported(path, "enum must be an array")),
            None => Ok(Schema::String {
                min_length: map.get("minLength").and_then(Value::as_u64).unwrap_or(0) as usize,
            }),
        },
        "boolean" => Ok(Schema::Boolean),
        "array" => {
            let items = map
                .get("items")
                .ok_or_else(|| unsupported(path, "array without items"))?;
            Ok(Schema::Array(ArraySchema {
                items: Box::new(parse(items, &format!("{path}[]"))?),
                min_items: map.get("minItems").and_then(Value::as_u64).map(|n| n as usize),
                max_items: map.get("maxItems").and_then(Value::as_u64).map(|n| n as usize),
            }))
        }
        "object" => parse_object(map, path),
        other => Err(unsupported(path, format!("type `{other}`"))),
    }
}

fn parse_object(map: &Map<String, Value>, path: &str) -> Result<Schema, SchemaError> {
    if map.get("additionalProperties") != Some(&Value::Bool(false)) {
        return Err(SchemaError::OpenObject {
            path: path.to_string(),
        });
    }
    let properties = map
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| unsupported(path, "object without properties"))?;
    let required: Vec<&str> = map
        .get("required")
        .and_then(Value::as_array)
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut fields = Vec::with_capacity(properties.len());
    for (name, sub) in properties {
        if !required.contains(&name.as_str()) {
            return Err(SchemaError::OptionalField {
                path: path.to_string(),
                name: name.clone(),
            });
        }
        fields.push(Field {
            name: name.clone(),
            schema: parse(sub, &format!("{path}.{name}"))?,
        });
    }
    Ok(Schema::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{array, canvas_extent, enumeration, number, object, string};

    #[test]
    fn objects_require_every_property() {
        let schema: Schema = object()
            .field("width", canvas_extent())
            .field("label", string().nullable())
            .into();
        let json = schema.to_json_schema();
        assert_eq!(json["required"], json!(["width", "label"]));
        assert_eq!(json["additionalProperties"], json!(false));
        assert_eq!(
            json["properties"]["label"],
            json!({"anyOf": [{"type": "string"}, {"type": "null"}]})
        );
    }

    #[test]
    fn export_round_trips() {
        let schema: Schema = object()
            .field("values", array(number().positive()).min_items(1))
            .field("op", enumeration(&["<", ">"]))
            .into();
        assert_eq!(Schema::from_json_schema(&schema.to_json_schema()), Ok(schema));
    }

    #[test]
    fn optional_properties_are_rejected_on_import() {
        let doc = json!({
            "type": "object",
            "properties": {"a": {"type": "string"}, "b": {"type": "string"}},
            "required": ["a"],
            "additionalProperties": false
        });
        assert!(matches!(
            Schema::from_json_schema(&doc),
            Err(SchemaError::OptionalField { name, .. }) if name == "b"
        ));
    }

    #[test]
    fn defaults_are_rejected_on_import() {
        let doc = json!({"type": "number", "default": 3});
        assert!(matches!(
            Schema::from_json_schema(&doc),
            Err(SchemaError::DefaultValue { .. })
        ));
    }
}
