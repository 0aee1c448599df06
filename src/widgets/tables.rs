//! HTML table widgets

use std::fmt;

use serde::Deserialize;

use crate::errors::{FieldIssue, FieldPath, ValidationError, WidgetResult};
use crate::registry::{Describe, Generate};
use crate::render::Element;
use crate::schema::{Schema, any_of, array, number, object, string};

/// A cell value: a number printed as-is, or preformatted text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn schema() -> Schema {
        any_of(vec![number().into(), string()])
    }
}

/// Numbers use the shortest representation that round-trips, with no
/// rounding: `5` stays `5`, `2.25` stays `2.25`.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

fn write_row<'a>(out: &mut String, tag: &'static str, cells: impl IntoIterator<Item = &'a str>) {
    Element::new("tr").write_open_to(out);
    for cell in cells {
        Element::new(tag).text(cell).write_to(out);
    }
    out.push_str("</tr>");
}

fn write_table(out: &mut String, caption: Option<&str>, headers: &[&str], rows: &[Vec<String>]) {
    Element::new("table").write_open_to(out);
    if let Some(caption) = caption {
        Element::new("caption").text(caption).write_to(out);
    }
    out.push_str("<thead>");
    write_row(out, "th", headers.iter().copied());
    out.push_str("</thead><tbody>");
    for row in rows {
        write_row(out, "td", row.iter().map(String::as_str));
    }
    out.push_str("</tbody></table>");
}

const SUMMARY_HEADERS: [&str; 5] = ["Min", "Q₁", "Median", "Q₃", "Max"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FiveNumberSummaryTableProps {
    pub min: Cell,
    pub q1: Cell,
    pub median: Cell,
    pub q3: Cell,
    pub max: Cell,
}

impl Describe for FiveNumberSummaryTableProps {
    fn schema() -> Schema {
        object()
            .field("min", Cell::schema())
            .field("q1", Cell::schema())
            .field("median", Cell::schema())
            .field("q3", Cell::schema())
            .field("max", Cell::schema())
            .into()
    }
}

impl Generate for FiveNumberSummaryTableProps {
    fn generate(&self) -> WidgetResult<String> {
        let body: Vec<String> = [&self.min, &self.q1, &self.median, &self.q3, &self.max]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let mut out = String::new();
        write_table(&mut out, None, &SUMMARY_HEADERS, &[body]);
        Ok(out)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DataTableProps {
    pub caption: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Describe for DataTableProps {
    fn schema() -> Schema {
        object()
            .field("caption", string().nullable())
            .field("headers", array(string()).min_items(1))
            .field("rows", array(array(Cell::schema())).min_items(1))
            .into()
    }
}

impl Generate for DataTableProps {
    fn check_references(&self, issues: &mut Vec<FieldIssue>) {
        let expected = self.headers.len();
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != expected {
                issues.push(FieldIssue::new(
                    FieldPath::root().key("rows").index(i),
                    format!("expected {expected} cell(s) to match headers, received {}", row.len()),
                ));
            }
        }
    }

    fn generate(&self) -> WidgetResult<String> {
        let mut issues = Vec::new();
        self.check_references(&mut issues);
        if !issues.is_empty() {
            return Err(ValidationError {
                widget_type: "dataTable".to_string(),
                issues,
            }
            .into());
        }
        let headers: Vec<&str> = self.headers.iter().map(String::as_str).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(Cell::to_string).collect())
            .collect();
        let mut out = String::new();
        write_table(&mut out, self.caption.as_deref(), &headers, &rows);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_table_passes_values_through() {
        let props: FiveNumberSummaryTableProps = serde_json::from_value(json!({
            "min": 1,
            "q1": 2.25,
            "median": "5 cm",
            "q3": 7,
            "max": 9
        }))
        .unwrap();
        insta::assert_snapshot!(
            props.generate().unwrap(),
            @"<table><thead><tr><th>Min</th><th>Q₁</th><th>Median</th><th>Q₃</th><th>Max</th></tr></thead><tbody><tr><td>1</td><td>2.25</td><td>5 cm</td><td>7</td><td>9</td></tr></tbody></table>"
        );
    }

    #[test]
    fn cells_are_escaped() {
        let props = DataTableProps {
            caption: Some("<b>".into()),
            headers: vec!["x".into()],
            rows: vec![vec![Cell::Text("a & b".into())]],
        };
        let html = props.generate().unwrap();
        assert!(html.contains("<caption>&lt;b&gt;</caption>"));
        assert!(html.contains("<td>a &amp; b</td>"));
    }

    #[test]
    fn ragged_rows_are_validation_errors() {
        let props = DataTableProps {
            caption: None,
            headers: vec!["a".into(), "b".into()],
            rows: vec![
                vec![Cell::Number(1.0), Cell::Number(2.0)],
                vec![Cell::Number(3.0)],
            ],
        };
        let err = props.generate().unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
        match err {
            crate::errors::WidgetError::Validation(v) => assert_eq!(v.paths(), vec!["rows[1]"]),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
