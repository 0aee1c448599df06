//! Scatter plot with an optional straight trend line

use glam::dvec2;
use serde::Deserialize;

use super::{chart, color};
use crate::errors::WidgetResult;
use crate::plane::primitives::{draw_point, draw_point_label};
use crate::plane::{AxisSpec, Crossing, LineStyle, Plane, PointStyle};
use crate::registry::{Describe, Generate};
use crate::render::geometry::clip_segment;
use crate::render::{Canvas, Layer, theme};
use crate::schema::{Schema, array, canvas_extent, number, object, string};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// `y = slope * x + yIntercept`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TrendLine {
    pub slope: f64,
    pub y_intercept: f64,
    pub color: String,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScatterPlotProps {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub points: Vec<ScatterPoint>,
    pub trend_line: Option<TrendLine>,
}

impl Describe for ScatterPlotProps {
    fn schema() -> Schema {
        let point = object()
            .field("x", number())
            .field("y", number())
            .field("label", string());
        let trend: Schema = object()
            .field("slope", number())
            .field("yIntercept", number())
            .field("color", color())
            .field("style", LineStyle::schema())
            .into();
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("title", string())
            .field("xAxis", AxisSpec::schema())
            .field("yAxis", AxisSpec::schema())
            .field("points", array(point))
            .field("trendLine", trend.nullable())
            .into()
    }
}

impl ScatterPlotProps {
    /// Trend line across the full x range, clipped to the frame.
    fn draw_trend(&self, canvas: &mut Canvas, plane: &Plane<'_>, trend: &TrendLine) {
        let (x0, x1) = (self.x_axis.min, self.x_axis.max);
        let p0 = plane.to_px(x0, trend.slope * x0 + trend.y_intercept);
        let p1 = plane.to_px(x1, trend.slope * x1 + trend.y_intercept);
        let f = &plane.frame;
        let Some((a, b)) = clip_segment(p0, p1, dvec2(f.left, f.top), dvec2(f.right(), f.bottom()))
        else {
            return;
        };
        let stroke = trend.style.stroke(&trend.color, theme::SERIES_STROKE_WIDTH);
        canvas.line(Layer::Shapes, a.x, a.y, b.x, b.y, &stroke);
    }
}

impl Generate for ScatterPlotProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "scatterPlot";
        chart::require_data(CONTEXT, "points", self.points.len())?;
        let frame = chart::frame(
            CONTEXT,
            self.width,
            self.height,
            &self.title,
            theme::CHART_PADDING,
            &[("xAxis", &self.x_axis), ("yAxis", &self.y_axis)],
        )?;
        let plane = Plane::new(CONTEXT, frame, &self.x_axis, &self.y_axis, Crossing::Edges)?;

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        chart::draw_title(&mut canvas, &self.title);
        plane.draw_grid(&mut canvas);
        if let Some(trend) = &self.trend_line {
            self.draw_trend(&mut canvas, &plane, trend);
        }
        for (i, p) in self.points.iter().enumerate() {
            let at = plane.require_px(&format!("scatterPlot points[{i}]"), p.x, p.y)?;
            draw_point(&mut canvas, at, theme::TEXT_COLOR, PointStyle::Closed);
            draw_point_label(&mut canvas, at, &p.label);
        }
        plane.draw_axes(&mut canvas);
        canvas.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(trend: serde_json::Value) -> ScatterPlotProps {
        let axis = json!({
            "label": "",
            "min": 0,
            "max": 10,
            "ticks": [0, 10],
            "showGridLines": false,
            "tickFormat": "hidden"
        });
        serde_json::from_value(json!({
            "width": 400,
            "height": 300,
            "title": "",
            "xAxis": axis,
            "yAxis": axis,
            "points": [{"x": 1, "y": 1, "label": ""}],
            "trendLine": trend
        }))
        .unwrap()
    }

    #[test]
    fn steep_trend_line_is_clipped_to_frame() {
        let svg = props(json!({"slope": 2, "yIntercept": 0, "color": "red", "style": "dashed"}))
            .generate()
            .unwrap();
        // y = 2x leaves the top of the frame at x = 5 (pixel 220)
        assert!(svg.contains(
            "<line x1=\"60\" y1=\"250\" x2=\"220\" y2=\"20\" stroke=\"red\" stroke-width=\"2\" stroke-dasharray=\"6 4\"/>"
        ));
    }

    #[test]
    fn trend_line_outside_frame_draws_nothing() {
        let svg = props(json!({"slope": 0, "yIntercept": 20, "color": "red", "style": "solid"}))
            .generate()
            .unwrap();
        assert!(!svg.contains("stroke=\"red\""));
    }

    #[test]
    fn no_trend_line() {
        let svg = props(json!(null)).generate().unwrap();
        assert!(svg.contains("<circle"));
    }
}
