//! Declarative props schemas and the strict validator.
//!
//! A [`Schema`] can only describe required fields: there is no optional or
//! defaulted variant. [`Schema::Nullable`] still requires the key to be
//! present. Validation walks the whole value and reports every failing path.

pub mod integrity;
pub mod json;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::{FieldIssue, FieldPath};
use crate::render::theme;

pub use json::SchemaError;

/// Structural description of an accepted JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Number(NumberSchema),
    String { min_length: usize },
    Boolean,
    /// One of a fixed set of strings
    Enum(Vec<String>),
    Array(ArraySchema),
    /// Fields in declaration order; all are required
    Object(Vec<Field>),
    /// Present, but may be `null`
    Nullable(Box<Schema>),
    /// Accepts a value matching any variant
    AnyOf(Vec<Schema>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberSchema {
    pub integer: bool,
    pub minimum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
}

impl NumberSchema {
    pub fn min(mut self, v: f64) -> Self {
        self.minimum = Some(v);
        self
    }

    pub fn max(mut self, v: f64) -> Self {
        self.maximum = Some(v);
        self
    }

    /// Strictly greater than zero
    pub fn positive(mut self) -> Self {
        self.minimum = None;
        self.exclusive_minimum = Some(0.0);
        self
    }

    /// Strictly less than `v`
    pub fn below(mut self, v: f64) -> Self {
        self.maximum = None;
        self.exclusive_maximum = Some(v);
        self
    }

    fn check(&self, value: &Value, path: &FieldPath, issues: &mut Vec<FieldIssue>) {
        let Some(x) = value.as_f64() else {
            issues.push(expected(path, self.kind(), value));
            return;
        };
        // JSON Schema counts `1.0` as an integer too.
        if self.integer && x.fract() != 0.0 {
            issues.push(FieldIssue::new(path.clone(), "expected integer, received number"));
            return;
        }
        if let Some(min) = self.minimum {
            if x < min {
                issues.push(FieldIssue::new(path.clone(), format!("must be >= {min}")));
            }
        }
        if let Some(min) = self.exclusive_minimum {
            if x <= min {
                issues.push(FieldIssue::new(path.clone(), format!("must be > {min}")));
            }
        }
        if let Some(max) = self.maximum {
            if x > max {
                issues.push(FieldIssue::new(path.clone(), format!("must be <= {max}")));
            }
        }
        if let Some(max) = self.exclusive_maximum {
            if x >= max {
                issues.push(FieldIssue::new(path.clone(), format!("must be < {max}")));
            }
        }
    }

    fn kind(&self) -> &'static str {
        if self.integer { "integer" } else { "number" }
    }
}

impl From<NumberSchema> for Schema {
    fn from(n: NumberSchema) -> Self {
        Schema::Number(n)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub items: Box<Schema>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

impl ArraySchema {
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    /// Exactly `n` items
    pub fn exactly(self, n: usize) -> Self {
        self.min_items(n).max_items(n)
    }
}

impl From<ArraySchema> for Schema {
    fn from(a: ArraySchema) -> Self {
        Schema::Array(a)
    }
}

/// A required object field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

/// Builder for [`Schema::Object`]
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    fields: Vec<Field>,
}

impl ObjectBuilder {
    pub fn field(mut self, name: &str, schema: impl Into<Schema>) -> Self {
        self.fields.push(Field {
            name: name.to_string(),
            schema: schema.into(),
        });
        self
    }
}

impl From<ObjectBuilder> for Schema {
    fn from(b: ObjectBuilder) -> Self {
        Schema::Object(b.fields)
    }
}

/// A domain value, bounded so arithmetic on it stays finite.
pub fn number() -> NumberSchema {
    NumberSchema::default()
        .min(-theme::MAX_MAGNITUDE)
        .max(theme::MAX_MAGNITUDE)
}

/// An integer count or index.
pub fn integer() -> NumberSchema {
    NumberSchema {
        integer: true,
        ..number()
    }
}

/// Canvas width/height in pixels.
pub fn canvas_extent() -> NumberSchema {
    NumberSchema::default().min(0.0).max(theme::MAX_CANVAS_PX)
}

/// Any string, including the empty string.
pub fn string() -> Schema {
    Schema::String { min_length: 0 }
}

/// A string with at least one character (ids, colors).
pub fn non_empty_string() -> Schema {
    Schema::String { min_length: 1 }
}

pub fn boolean() -> Schema {
    Schema::Boolean
}

pub fn enumeration(values: &[&str]) -> Schema {
    Schema::Enum(values.iter().map(|v| v.to_string()).collect())
}

pub fn array(items: impl Into<Schema>) -> ArraySchema {
    ArraySchema {
        items: Box::new(items.into()),
        min_items: None,
        max_items: None,
    }
}

pub fn object() -> ObjectBuilder {
    ObjectBuilder::default()
}

pub fn any_of(variants: Vec<Schema>) -> Schema {
    Schema::AnyOf(variants)
}

impl Schema {
    /// Wrap in [`Schema::Nullable`]: the key stays mandatory, `null` becomes legal.
    pub fn nullable(self) -> Schema {
        Schema::Nullable(Box::new(self))
    }

    /// Validate `value`, returning every issue found.
    pub fn validate(&self, value: &Value) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        self.check(value, &FieldPath::root(), &mut issues);
        issues
    }

    fn check(&self, value: &Value, path: &FieldPath, issues: &mut Vec<FieldIssue>) {
        match self {
            Schema::Number(n) => n.check(value, path, issues),
            Schema::String { min_length } => match value.as_str() {
                Some(s) if s.chars().count() < *min_length => issues.push(FieldIssue::new(
                    path.clone(),
                    format!("must contain at least {min_length} character(s)"),
                )),
                Some(_) => {}
                None => issues.push(expected(path, "string", value)),
            },
            Schema::Boolean => {
                if !value.is_boolean() {
                    issues.push(expected(path, "boolean", value));
                }
            }
            Schema::Enum(values) => match value.as_str() {
                Some(s) if values.iter().any(|v| v == s) => {}
                Some(s) => issues.push(FieldIssue::new(
                    path.clone(),
                    format!("expected one of {}, received \"{s}\"", quoted_list(values)),
                )),
                None => issues.push(expected(path, "string", value)),
            },
            Schema::Array(a) => {
                let Some(items) = value.as_array() else {
                    issues.push(expected(path, "array", value));
                    return;
                };
                if let Some(min) = a.min_items {
                    if items.len() < min {
                        issues.push(FieldIssue::new(
                            path.clone(),
                            format!("must contain at least {min} item(s)"),
                        ));
                    }
                }
                if let Some(max) = a.max_items {
                    if items.len() > max {
                        issues.push(FieldIssue::new(
                            path.clone(),
                            format!("must contain at most {max} item(s)"),
                        ));
                    }
                }
                for (i, item) in items.iter().enumerate() {
                    a.items.check(item, &path.index(i), issues);
                }
            }
            Schema::Object(fields) => {
                let Some(map) = value.as_object() else {
                    issues.push(expected(path, "object", value));
                    return;
                };
                for field in fields {
                    let field_path = path.key(&field.name);
                    match map.get(&field.name) {
                        Some(v) => field.schema.check(v, &field_path, issues),
                        None => issues.push(FieldIssue::new(field_path, "required")),
                    }
                }
                for key in map.keys() {
                    if !fields.iter().any(|f| &f.name == key) {
                        issues.push(FieldIssue::new(path.key(key), "unrecognized key"));
                    }
                }
            }
            Schema::Nullable(inner) => {
                if !value.is_null() {
                    inner.check(value, path, issues);
                }
            }
            Schema::AnyOf(variants) => {
                let matched = variants.iter().any(|v| {
                    let mut scratch = Vec::new();
                    v.check(value, path, &mut scratch);
                    scratch.is_empty()
                });
                if !matched {
                    let forms: Vec<String> = variants.iter().map(Schema::describe).collect();
                    issues.push(FieldIssue::new(
                        path.clone(),
                        format!("expected {}, received {}", forms.join(" or "), type_name(value)),
                    ));
                }
            }
        }
    }

    /// Short human-readable description of the accepted form
    pub fn describe(&self) -> String {
        match self {
            Schema::Number(n) => n.kind().to_string(),
            Schema::String { .. } => "string".to_string(),
            Schema::Boolean => "boolean".to_string(),
            Schema::Enum(values) => quoted_list(values),
            Schema::Array(a) => format!("array of {}", a.items.describe()),
            Schema::Object(_) => "object".to_string(),
            Schema::Nullable(inner) => format!("{} or null", inner.describe()),
            Schema::AnyOf(variants) => {
                let forms: Vec<String> = variants.iter().map(Schema::describe).collect();
                forms.join(" or ")
            }
        }
    }

    /// Fields of an object schema; empty for other kinds
    pub fn fields(&self) -> &[Field] {
        match self {
            Schema::Object(fields) => fields,
            _ => &[],
        }
    }
}

/// Deserialize a non-negative integer field that may arrive as `3` or `3.0`.
pub(crate) fn integral<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let x = f64::deserialize(deserializer)?;
    if x.fract() != 0.0 || x < 0.0 || x > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!(
            "expected a non-negative integer, received {x}"
        )));
    }
    Ok(x as u32)
}

fn expected(path: &FieldPath, kind: &str, value: &Value) -> FieldIssue {
    FieldIssue::new(
        path.clone(),
        format!("expected {kind}, received {}", type_name(value)),
    )
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn quoted_list(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
    quoted.join(", ")
}
