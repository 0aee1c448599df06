//! Single-axis distribution charts: dot plot and box plot

use serde::Deserialize;

use super::{chart, color};
use crate::errors::{WidgetError, WidgetResult};
use crate::plane::{AxisSpec, AxisView};
use crate::registry::{Describe, Generate};
use crate::render::{Canvas, Layer, Stroke, theme};
use crate::schema::{Schema, array, canvas_extent, integer, number, object, string};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DotColumn {
    pub value: f64,
    #[serde(deserialize_with = "crate::schema::integral")]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DotPlotProps {
    pub width: f64,
    pub height: f64,
    pub axis: AxisSpec,
    pub data: Vec<DotColumn>,
    pub dot_color: String,
    pub dot_radius: f64,
}

impl Describe for DotPlotProps {
    fn schema() -> Schema {
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("axis", AxisSpec::schema())
            .field(
                "data",
                array(
                    object()
                        .field("value", number())
                        .field("count", integer().min(0.0).max(1000.0)),
                ),
            )
            .field("dotColor", color())
            .field("dotRadius", number().min(1.0).max(20.0))
            .into()
    }
}

impl Generate for DotPlotProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "dotPlot";
        chart::require_data(CONTEXT, "data", self.data.len())?;
        let frame = chart::frame(
            CONTEXT,
            self.width,
            self.height,
            "",
            theme::LINE_PLOT_PADDING,
            &[("axis", &self.axis)],
        )?;
        let axis = AxisView::horizontal("dotPlot axis", &self.axis, &frame)?;

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        axis.draw_grid(&mut canvas, &frame);
        let r = self.dot_radius;
        // Dots stack upward from just above the axis line, touching.
        for (i, column) in self.data.iter().enumerate() {
            axis.scale.require(&format!("dotPlot data[{i}]"), column.value)?;
            let cx = axis.map(column.value);
            for k in 0..column.count {
                let cy = frame.bottom() - r - 2.0 - f64::from(k) * 2.0 * r;
                canvas.circle(Layer::Points, (cx, cy), r, &self.dot_color, None);
            }
        }
        axis.draw(&mut canvas, &frame, frame.bottom());
        canvas.finish()
    }
}

/// Min, quartiles, median and max of a data set
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Summary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Summary {
    pub fn schema() -> Schema {
        object()
            .field("min", number())
            .field("q1", number())
            .field("median", number())
            .field("q3", number())
            .field("max", number())
            .into()
    }

    fn is_ordered(&self) -> bool {
        self.min <= self.q1 && self.q1 <= self.median && self.median <= self.q3 && self.q3 <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BoxPlotProps {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub axis: AxisSpec,
    pub summary: Summary,
    pub box_color: String,
    pub median_color: String,
}

impl Describe for BoxPlotProps {
    fn schema() -> Schema {
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("title", string())
            .field("axis", AxisSpec::schema())
            .field("summary", Summary::schema())
            .field("boxColor", color())
            .field("medianColor", color())
            .into()
    }
}

const MAX_BOX_HEIGHT: f64 = 60.0;

impl Generate for BoxPlotProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "boxPlot";
        let s = self.summary;
        if !s.is_ordered() {
            return Err(WidgetError::invalid_range(
                "boxPlot summary (expected min <= q1 <= median <= q3 <= max)",
                s.min,
                s.max,
            ));
        }
        let frame = chart::frame(
            CONTEXT,
            self.width,
            self.height,
            &self.title,
            theme::LINE_PLOT_PADDING,
            &[("axis", &self.axis)],
        )?;
        let axis = AxisView::horizontal("boxPlot axis", &self.axis, &frame)?;
        axis.scale.require("boxPlot summary.min", s.min)?;
        axis.scale.require("boxPlot summary.max", s.max)?;

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        chart::draw_title(&mut canvas, &self.title);
        axis.draw_grid(&mut canvas, &frame);

        let box_h = (frame.height / 2.0).min(MAX_BOX_HEIGHT);
        let cy = frame.center_y();
        let (top, bottom) = (cy - box_h / 2.0, cy + box_h / 2.0);
        let [x_min, x_q1, x_med, x_q3, x_max] = [s.min, s.q1, s.median, s.q3, s.max].map(|v| axis.map(v));

        let outline = Stroke::solid(theme::OUTLINE_COLOR, theme::SERIES_STROKE_WIDTH);
        canvas.line(Layer::Shapes, x_min, cy, x_q1, cy, &outline);
        canvas.line(Layer::Shapes, x_q3, cy, x_max, cy, &outline);
        for x in [x_min, x_max] {
            canvas.line(Layer::Shapes, x, cy - box_h / 4.0, x, cy + box_h / 4.0, &outline);
        }
        canvas.rect(
            Layer::Shapes,
            (x_q1, top, x_q3 - x_q1, box_h),
            &self.box_color,
            Some(&outline),
        );
        canvas.line(
            Layer::Shapes,
            x_med,
            top,
            x_med,
            bottom,
            &Stroke::solid(&self.median_color, theme::SERIES_STROKE_WIDTH + 1.0),
        );
        axis.draw(&mut canvas, &frame, frame.bottom());
        canvas.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn axis() -> serde_json::Value {
        json!({
            "label": "Score",
            "min": 0,
            "max": 10,
            "ticks": 1,
            "showGridLines": false,
            "tickFormat": "integer"
        })
    }

    #[test]
    fn dots_stack_per_value() {
        let props: DotPlotProps = serde_json::from_value(json!({
            "width": 300,
            "height": 200,
            "axis": axis(),
            "data": [{"value": 2, "count": 3}, {"value": 5, "count": 0}],
            "dotColor": "teal",
            "dotRadius": 5
        }))
        .unwrap();
        let svg = props.generate().unwrap();
        assert_eq!(svg.matches("fill=\"teal\"").count(), 3);
    }

    #[test]
    fn dot_outside_axis_is_invalid_range() {
        let props: DotPlotProps = serde_json::from_value(json!({
            "width": 300,
            "height": 200,
            "axis": axis(),
            "data": [{"value": 12, "count": 1}],
            "dotColor": "teal",
            "dotRadius": 5
        }))
        .unwrap();
        assert_eq!(props.generate().unwrap_err().kind(), "ErrInvalidRange");
    }

    #[test]
    fn unordered_summary_is_invalid_range() {
        let props: BoxPlotProps = serde_json::from_value(json!({
            "width": 300,
            "height": 200,
            "title": "",
            "axis": axis(),
            "summary": {"min": 1, "q1": 5, "median": 4, "q3": 7, "max": 9},
            "boxColor": "white",
            "medianColor": "red"
        }))
        .unwrap();
        assert_eq!(props.generate().unwrap_err().kind(), "ErrInvalidRange");
    }
}
