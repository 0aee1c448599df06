//! Error types with diagnostic codes using miette
//!
//! Every failure is local to one widget instance and is never retried by the
//! engine: callers get the error back synchronously and nothing is rendered.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

/// Result alias used throughout the crate
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Location of a value inside a props object, e.g. `data[2].value`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath(String);

impl FieldPath {
    /// The props object itself
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Path to a named key below this one
    pub fn key(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    /// Path to an array element below this one
    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{}]", self.0, i))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// One failing field found during validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: FieldPath,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Schema rejection listing every failing field, not just the first
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("invalid props for widget `{widget_type}`:{}", render_issues(.issues))]
#[diagnostic(
    code(widgets::validation),
    help("every field is mandatory and unknown keys are rejected")
)]
pub struct ValidationError {
    pub widget_type: String,
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Paths of all failing fields, in discovery order
    pub fn paths(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }
}

fn render_issues(issues: &[FieldIssue]) -> String {
    let mut out = String::new();
    for issue in issues {
        out.push_str("\n  - ");
        out.push_str(&issue.to_string());
    }
    out
}

/// Errors raised by `generate` and friends
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum WidgetError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown widget type: {type_name}")]
    #[diagnostic(code(widgets::unknown_type))]
    UnknownWidgetType {
        type_name: String,
        #[help]
        suggestion: Option<String>,
    },

    #[error("invalid range for {context} (min {min}, max {max})")]
    #[diagnostic(code(widgets::invalid_range))]
    InvalidRange {
        context: String,
        min: f64,
        max: f64,
    },

    #[error("invalid dimensions for {context}: {reason}")]
    #[diagnostic(code(widgets::invalid_dimensions))]
    InvalidDimensions { context: String, reason: String },

    #[error("internal generator failure in {context}: {source}")]
    #[diagnostic(code(widgets::internal))]
    Internal {
        context: String,
        #[source]
        source: NumericError,
    },
}

impl WidgetError {
    pub(crate) fn invalid_range(context: impl Into<String>, min: f64, max: f64) -> Self {
        WidgetError::InvalidRange {
            context: context.into(),
            min,
            max,
        }
    }

    pub(crate) fn invalid_dimensions(context: impl Into<String>, reason: impl Into<String>) -> Self {
        WidgetError::InvalidDimensions {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            WidgetError::Validation(_) => "ValidationError",
            WidgetError::UnknownWidgetType { .. } => "ErrUnknownWidgetType",
            WidgetError::InvalidRange { .. } => "ErrInvalidRange",
            WidgetError::InvalidDimensions { .. } => "ErrInvalidDimensions",
            WidgetError::Internal { .. } => "GeneratorInternalError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_paths_compose() {
        let p = FieldPath::root().key("data").index(2).key("value");
        assert_eq!(p.as_str(), "data[2].value");
        assert_eq!(FieldPath::root().to_string(), "(root)");
    }

    #[test]
    fn validation_error_lists_every_issue() {
        let err = ValidationError {
            widget_type: "barChart".into(),
            issues: vec![
                FieldIssue::new(FieldPath::root().key("width"), "required"),
                FieldIssue::new(FieldPath::root().key("extra"), "unrecognized key"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("width: required"));
        assert!(msg.contains("extra: unrecognized key"));
        assert_eq!(err.paths(), vec!["width", "extra"]);
    }
}
