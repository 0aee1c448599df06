//! Widget registry and dispatch.
//!
//! Each registered widget is a props struct implementing [`Describe`] (its
//! schema) and [`Generate`] (its renderer). The [`Widget`] sum type is built
//! from the same list as the static registry table, so a tag can never be
//! registered without a renderer or the other way around.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{FieldIssue, FieldPath, ValidationError, WidgetError, WidgetResult};
use crate::log::debug;
use crate::schema::Schema;
use crate::widgets::{
    AbsoluteValueNumberLineProps, AngleDiagramProps, AreaGraphProps, BarChartProps,
    BoxPlotProps, CirclePieceComparisonDiagramProps, CoordinatePlaneProps, DataTableProps,
    DistanceTimeGraphProps, DotPlotProps, EquivalentFractionModelProps,
    FiveNumberSummaryTableProps, FractionTapeDiagramProps, HistogramProps, LineGraphProps,
    NumberLineProps, PeriodicTableProps, PopulationBarChartProps, ScatterPlotProps,
};

/// Rendering behaviour shared by every widget's props
pub trait Generate {
    /// Cross-field checks the schema cannot express (id references, ratios).
    /// Issues are reported as validation errors before rendering starts.
    fn check_references(&self, _issues: &mut Vec<FieldIssue>) {}

    /// Render the widget as one SVG or HTML fragment.
    fn generate(&self) -> WidgetResult<String>;
}

/// Schema of a props type
pub trait Describe {
    fn schema() -> Schema;
}

/// One row of the registry
pub struct WidgetEntry {
    pub type_name: &'static str,
    pub schema: fn() -> Schema,
    parse: fn(&Value) -> Result<Widget, String>,
}

impl std::fmt::Debug for WidgetEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetEntry")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl WidgetEntry {
    /// Validate raw props and build the typed widget.
    ///
    /// Structural issues are collected first; typed parsing and cross-field
    /// checks only run once the value has the right shape.
    pub fn validate(&self, props: &Value) -> Result<Widget, ValidationError> {
        let reject = |issues: Vec<FieldIssue>| {
            debug!(widget = self.type_name, issues = issues.len(), "validation failed");
            ValidationError {
                widget_type: self.type_name.to_string(),
                issues,
            }
        };

        let issues = (self.schema)().validate(props);
        if !issues.is_empty() {
            return Err(reject(issues));
        }

        let widget = (self.parse)(props)
            .map_err(|message| reject(vec![FieldIssue::new(FieldPath::root(), message)]))?;

        let mut issues = Vec::new();
        widget.check_references(&mut issues);
        if !issues.is_empty() {
            return Err(reject(issues));
        }
        Ok(widget)
    }

    /// Validate then render.
    pub fn generate(&self, props: &Value) -> WidgetResult<String> {
        let widget = self.validate(props)?;
        let out = widget.generate();
        debug!(widget = self.type_name, ok = out.is_ok(), "generated");
        out
    }
}

fn parse_as<P>(props: &Value) -> Result<Widget, String>
where
    P: DeserializeOwned + Into<Widget>,
{
    P::deserialize(props).map(Into::into).map_err(|e| e.to_string())
}

macro_rules! widget_registry {
    ($($variant:ident($props:ty) => $tag:literal,)*) => {
        /// Every renderable widget, one variant per registered type tag
        #[derive(Debug, Clone, PartialEq)]
        pub enum Widget {
            $($variant($props),)*
        }

        impl Widget {
            pub fn type_name(&self) -> &'static str {
                match self {
                    $(Widget::$variant(_) => $tag,)*
                }
            }
        }

        impl Generate for Widget {
            fn check_references(&self, issues: &mut Vec<FieldIssue>) {
                match self {
                    $(Widget::$variant(w) => w.check_references(issues),)*
                }
            }

            fn generate(&self) -> WidgetResult<String> {
                match self {
                    $(Widget::$variant(w) => w.generate(),)*
                }
            }
        }

        $(impl From<$props> for Widget {
            fn from(props: $props) -> Self {
                Widget::$variant(props)
            }
        })*

        static REGISTRY: &[WidgetEntry] = &[
            $(WidgetEntry {
                type_name: $tag,
                schema: <$props as Describe>::schema,
                parse: parse_as::<$props>,
            },)*
        ];
    };
}

widget_registry! {
    BarChart(BarChartProps) => "barChart",
    Histogram(HistogramProps) => "histogram",
    PopulationBarChart(PopulationBarChartProps) => "populationBarChart",
    LineGraph(LineGraphProps) => "lineGraph",
    AreaGraph(AreaGraphProps) => "areaGraph",
    ScatterPlot(ScatterPlotProps) => "scatterPlot",
    DotPlot(DotPlotProps) => "dotPlot",
    BoxPlot(BoxPlotProps) => "boxPlot",
    DistanceTimeGraph(DistanceTimeGraphProps) => "distanceTimeGraph",
    CoordinatePlane(CoordinatePlaneProps) => "coordinatePlane",
    NumberLine(NumberLineProps) => "numberLine",
    AbsoluteValueNumberLine(AbsoluteValueNumberLineProps) => "absoluteValueNumberLine",
    CirclePieceComparisonDiagram(CirclePieceComparisonDiagramProps) => "circlePieceComparisonDiagram",
    FractionTapeDiagram(FractionTapeDiagramProps) => "fractionTapeDiagram",
    EquivalentFractionModel(EquivalentFractionModelProps) => "equivalentFractionModel",
    AngleDiagram(AngleDiagramProps) => "angleDiagram",
    PeriodicTable(PeriodicTableProps) => "periodicTable",
    FiveNumberSummaryTable(FiveNumberSummaryTableProps) => "fiveNumberSummaryTable",
    DataTable(DataTableProps) => "dataTable",
}

/// All registry entries, in registration order.
pub fn entries() -> &'static [WidgetEntry] {
    REGISTRY
}

/// Find the entry for `type_name`.
pub fn lookup(type_name: &str) -> WidgetResult<&'static WidgetEntry> {
    if let Some(entry) = REGISTRY.iter().find(|e| e.type_name == type_name) {
        return Ok(entry);
    }
    let suggestion = closest_type_name(type_name).map(|t| format!("did you mean `{t}`?"));
    debug!(type_name, "unknown widget type");
    Err(WidgetError::UnknownWidgetType {
        type_name: type_name.to_string(),
        suggestion,
    })
}

const MAX_SUGGESTION_DISTANCE: usize = 3;

fn closest_type_name(input: &str) -> Option<&'static str> {
    REGISTRY
        .iter()
        .map(|e| (edit_distance(input, e.type_name), e.type_name))
        .filter(|(d, _)| *d <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(d, _)| *d)
        .map(|(_, name)| name)
}

/// Levenshtein distance over chars
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}
