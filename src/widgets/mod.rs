//! Widget generators, one module per family
//!
//! - `bars`: bar chart, histogram, population bar chart
//! - `lines`: line graph, area graph, distance-time graph
//! - `scatter`: scatter plot with optional trend line
//! - `distribution`: dot plot, box plot
//! - `coordinate_plane`: points, distances, polygons on a four-quadrant plane
//! - `number_line`: number line, absolute value number line
//! - `fractions`: circle pieces, fraction tapes, equivalent fraction models
//! - `angle`: angle diagram
//! - `periodic_table`: embedded static asset
//! - `tables`: five-number summary and generic data tables

mod angle;
mod bars;
mod chart;
mod coordinate_plane;
mod distribution;
mod fractions;
mod lines;
mod number_line;
mod periodic_table;
mod scatter;
mod tables;

pub use angle::AngleDiagramProps;
pub use bars::{BarChartProps, HistogramProps, PopulationBarChartProps};
pub use coordinate_plane::CoordinatePlaneProps;
pub use distribution::{BoxPlotProps, DotPlotProps};
pub use fractions::{
    CirclePieceComparisonDiagramProps, EquivalentFractionModelProps, FractionTapeDiagramProps,
};
pub use lines::{AreaGraphProps, DistanceTimeGraphProps, LineGraphProps};
pub use number_line::{AbsoluteValueNumberLineProps, NumberLineProps};
pub use periodic_table::PeriodicTableProps;
pub use scatter::ScatterPlotProps;
pub use tables::{DataTableProps, FiveNumberSummaryTableProps};

use serde::Deserialize;

use crate::errors::{FieldIssue, FieldPath};
use crate::render::theme;
use crate::schema::{Schema, enumeration, integer, non_empty_string, number, object};

/// Colors are passed through to SVG attributes (escaped) and must be non-empty.
pub(crate) fn color() -> Schema {
    non_empty_string()
}

/// A domain-space point
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Xy {
    pub x: f64,
    pub y: f64,
}

impl Xy {
    pub fn schema() -> Schema {
        object().field("x", number()).field("y", number()).into()
    }
}

/// Comparison asserted by the caller between two figures.
///
/// Rendered as given; the figures are never used to check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "=")]
    Equal,
}

impl ComparisonOperator {
    pub fn schema() -> Schema {
        enumeration(&["<", ">", "="])
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Less => "<",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::Equal => "=",
        }
    }
}

/// Schema pieces for a numerator/denominator pair.
pub(crate) fn fraction_fields() -> [(&'static str, Schema); 2] {
    [
        ("numerator", integer().min(0.0).into()),
        (
            "denominator",
            integer()
                .min(1.0)
                .max(f64::from(theme::MAX_DENOMINATOR))
                .into(),
        ),
    ]
}

/// Issue when a fraction has more shaded parts than it has parts.
pub(crate) fn check_proper(
    path: FieldPath,
    numerator: u32,
    denominator: u32,
    issues: &mut Vec<FieldIssue>,
) {
    if numerator > denominator {
        issues.push(FieldIssue::new(
            path.key("numerator"),
            format!("must be <= denominator ({denominator})"),
        ));
    }
}

/// A bare fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fraction {
    #[serde(deserialize_with = "crate::schema::integral")]
    pub numerator: u32,
    #[serde(deserialize_with = "crate::schema::integral")]
    pub denominator: u32,
}

impl Fraction {
    pub fn schema() -> Schema {
        let [(n, ns), (d, ds)] = fraction_fields();
        object().field(n, ns).field(d, ds).into()
    }
}
