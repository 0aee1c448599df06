//! Bar-shaped axis charts: bar chart, histogram, population bar chart.
//!
//! All three share a categorical x axis with one slot per datum, and a value
//! axis declared by the caller. Bars are drawn in input order.

use serde::Deserialize;

use super::chart;
use super::color;
use crate::errors::WidgetResult;
use crate::plane::{AxisSpec, AxisView};
use crate::registry::{Describe, Generate};
use crate::render::{Canvas, Layer, Stroke, theme};
use crate::schema::{Schema, array, canvas_extent, enumeration, integer, number, object, string};
use crate::types::Frame;

/// One bar, already resolved to a value and fill color
struct Bar<'a> {
    value: f64,
    fill: &'a str,
}

/// Draw `bars` into equal slots across the frame.
///
/// `gap_ratio` of each slot is left empty between bars. Bars grow from zero,
/// or from the nearest end of the value axis when zero is out of range.
fn draw_bars(
    canvas: &mut Canvas,
    context: &str,
    frame: &Frame,
    y: &AxisView<'_>,
    bars: &[Bar<'_>],
    gap_ratio: f64,
    outline: Option<&Stroke>,
) -> WidgetResult<()> {
    let slot = frame.width / bars.len() as f64;
    let bar_width = slot * (1.0 - gap_ratio);
    let base = y.map(0.0_f64.clamp(y.scale.min(), y.scale.max()));
    for (i, bar) in bars.iter().enumerate() {
        y.scale.require(&format!("{context} data[{i}]"), bar.value)?;
        let top = y.map(bar.value);
        let x = frame.left + i as f64 * slot + (slot - bar_width) / 2.0;
        canvas.rect(
            Layer::Shapes,
            (x, top.min(base), bar_width, (base - top).abs()),
            bar.fill,
            outline,
        );
    }
    Ok(())
}

fn slot_center(frame: &Frame, count: usize, i: usize) -> f64 {
    let slot = frame.width / count as f64;
    frame.left + (i as f64 + 0.5) * slot
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BarState {
    Normal,
    Highlighted,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    pub state: BarState,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BarChartProps {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub x_axis_label: String,
    pub y_axis: AxisSpec,
    pub data: Vec<BarDatum>,
    pub bar_color: String,
    pub highlight_color: String,
}

impl Describe for BarChartProps {
    fn schema() -> Schema {
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("title", string())
            .field("xAxisLabel", string())
            .field("yAxis", AxisSpec::schema())
            .field(
                "data",
                array(
                    object()
                        .field("label", string())
                        .field("value", number())
                        .field("state", enumeration(&["normal", "highlighted"])),
                ),
            )
            .field("barColor", color())
            .field("highlightColor", color())
            .into()
    }
}

impl Generate for BarChartProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "barChart";
        chart::require_data(CONTEXT, "data", self.data.len())?;
        let frame = chart::frame(
            CONTEXT,
            self.width,
            self.height,
            &self.title,
            theme::CHART_PADDING,
            &[("yAxis", &self.y_axis)],
        )?;
        let y = AxisView::vertical("barChart yAxis", &self.y_axis, &frame)?;

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        chart::draw_title(&mut canvas, &self.title);
        y.draw_grid(&mut canvas, &frame);
        let bars: Vec<Bar<'_>> = self
            .data
            .iter()
            .map(|d| Bar {
                value: d.value,
                fill: match d.state {
                    BarState::Normal => &self.bar_color,
                    BarState::Highlighted => &self.highlight_color,
                },
            })
            .collect();
        draw_bars(&mut canvas, CONTEXT, &frame, &y, &bars, theme::BAR_GAP_RATIO, None)?;
        for (i, d) in self.data.iter().enumerate() {
            let x = slot_center(&frame, self.data.len(), i);
            chart::draw_category_label(&mut canvas, &frame, x, &d.label);
        }
        chart::draw_category_axis(&mut canvas, &frame, &self.x_axis_label);
        y.draw(&mut canvas, &frame, frame.left);
        canvas.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HistogramBin {
    pub label: String,
    pub frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HistogramProps {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub x_axis_label: String,
    pub y_axis: AxisSpec,
    pub data: Vec<HistogramBin>,
    pub bar_color: String,
}

impl Describe for HistogramProps {
    fn schema() -> Schema {
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("title", string())
            .field("xAxisLabel", string())
            .field("yAxis", AxisSpec::schema())
            .field(
                "data",
                array(
                    object()
                        .field("label", string())
                        .field("frequency", number().min(0.0)),
                ),
            )
            .field("barColor", color())
            .into()
    }
}

impl Generate for HistogramProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "histogram";
        chart::require_data(CONTEXT, "data", self.data.len())?;
        let frame = chart::frame(
            CONTEXT,
            self.width,
            self.height,
            &self.title,
            theme::CHART_PADDING,
            &[("yAxis", &self.y_axis)],
        )?;
        let y = AxisView::vertical("histogram yAxis", &self.y_axis, &frame)?;

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        chart::draw_title(&mut canvas, &self.title);
        y.draw_grid(&mut canvas, &frame);
        let bars: Vec<Bar<'_>> = self
            .data
            .iter()
            .map(|d| Bar {
                value: d.frequency,
                fill: &self.bar_color,
            })
            .collect();
        let outline = Stroke::solid(theme::OUTLINE_COLOR, 1.0);
        draw_bars(&mut canvas, CONTEXT, &frame, &y, &bars, 0.0, Some(&outline))?;
        for (i, d) in self.data.iter().enumerate() {
            let x = slot_center(&frame, self.data.len(), i);
            chart::draw_category_label(&mut canvas, &frame, x, &d.label);
        }
        chart::draw_category_axis(&mut canvas, &frame, &self.x_axis_label);
        y.draw(&mut canvas, &frame, frame.left);
        canvas.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PopulationDatum {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PopulationBarChartProps {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub x_axis_label: String,
    pub y_axis: AxisSpec,
    pub data: Vec<PopulationDatum>,
    pub bar_color: String,
    /// Draw every n-th category label
    #[serde(deserialize_with = "crate::schema::integral")]
    pub label_interval: u32,
}

impl Describe for PopulationBarChartProps {
    fn schema() -> Schema {
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("title", string())
            .field("xAxisLabel", string())
            .field("yAxis", AxisSpec::schema())
            .field(
                "data",
                array(object().field("label", string()).field("value", number())),
            )
            .field("barColor", color())
            .field("labelInterval", integer().min(1.0))
            .into()
    }
}

impl Generate for PopulationBarChartProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "populationBarChart";
        chart::require_data(CONTEXT, "data", self.data.len())?;
        let frame = chart::frame(
            CONTEXT,
            self.width,
            self.height,
            &self.title,
            theme::CHART_PADDING,
            &[("yAxis", &self.y_axis)],
        )?;
        let y = AxisView::vertical("populationBarChart yAxis", &self.y_axis, &frame)?;

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        chart::draw_title(&mut canvas, &self.title);
        y.draw_grid(&mut canvas, &frame);
        let bars: Vec<Bar<'_>> = self
            .data
            .iter()
            .map(|d| Bar {
                value: d.value,
                fill: &self.bar_color,
            })
            .collect();
        draw_bars(&mut canvas, CONTEXT, &frame, &y, &bars, theme::BAR_GAP_RATIO, None)?;
        let every = (self.label_interval as usize).max(1);
        for (i, d) in self.data.iter().enumerate().step_by(every) {
            let x = slot_center(&frame, self.data.len(), i);
            chart::draw_category_label(&mut canvas, &frame, x, &d.label);
        }
        chart::draw_category_axis(&mut canvas, &frame, &self.x_axis_label);
        y.draw(&mut canvas, &frame, frame.left);
        canvas.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn y_axis() -> serde_json::Value {
        json!({
            "label": "Count",
            "min": 0,
            "max": 10,
            "ticks": 5,
            "showGridLines": true,
            "tickFormat": "integer"
        })
    }

    fn bar_chart(data: serde_json::Value) -> BarChartProps {
        serde_json::from_value(json!({
            "width": 400,
            "height": 300,
            "title": "",
            "xAxisLabel": "Fruit",
            "yAxis": y_axis(),
            "data": data,
            "barColor": "#4472c4",
            "highlightColor": "#ed7d31"
        }))
        .unwrap()
    }

    #[test]
    fn empty_bar_chart_is_invalid_dimensions() {
        let err = bar_chart(json!([])).generate().unwrap_err();
        assert_eq!(err.kind(), "ErrInvalidDimensions");
    }

    #[test]
    fn bars_grow_from_zero_in_input_order() {
        let svg = bar_chart(json!([
            {"label": "Apples", "value": 10, "state": "normal"},
            {"label": "Pears", "value": 5, "state": "highlighted"}
        ]))
        .generate()
        .unwrap();
        // frame: left 60, top 20, width 320, height 230; slot 160, bar 128
        assert!(svg.contains(
            "<rect x=\"76\" y=\"20\" width=\"128\" height=\"230\" fill=\"#4472c4\"/>"
        ));
        assert!(svg.contains(
            "<rect x=\"236\" y=\"135\" width=\"128\" height=\"115\" fill=\"#ed7d31\"/>"
        ));
    }

    #[test]
    fn values_beyond_the_axis_are_invalid_range() {
        let err = bar_chart(json!([{"label": "A", "value": 11, "state": "normal"}]))
            .generate()
            .unwrap_err();
        assert_eq!(err.kind(), "ErrInvalidRange");
    }

    #[test]
    fn population_chart_thins_labels() {
        let props: PopulationBarChartProps = serde_json::from_value(json!({
            "width": 400,
            "height": 300,
            "title": "",
            "xAxisLabel": "",
            "yAxis": y_axis(),
            "data": [
                {"label": "0-9", "value": 1},
                {"label": "10-19", "value": 2},
                {"label": "20-29", "value": 3},
                {"label": "30-39", "value": 4}
            ],
            "barColor": "gray",
            "labelInterval": 2
        }))
        .unwrap();
        let svg = props.generate().unwrap();
        assert!(svg.contains(">0-9<"));
        assert!(!svg.contains(">10-19<"));
        assert!(svg.contains(">20-29<"));
        assert!(!svg.contains(">30-39<"));
    }
}
