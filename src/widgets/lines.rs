//! Line-based axis charts: line graph, area graph, distance-time graph

use glam::DVec2;
use serde::Deserialize;

use super::{Xy, chart, color};
use crate::errors::WidgetResult;
use crate::plane::primitives::{draw_polyline, draw_point, draw_point_label};
use crate::plane::{AxisSpec, Crossing, LineStyle, Plane, PointStyle};
use crate::registry::{Describe, Generate};
use crate::render::geometry::{centroid, xy};
use crate::render::{Anchor, Canvas, Layer, Stroke, TextStyle, theme};
use crate::schema::{Schema, array, boolean, canvas_extent, object, string};

/// Map every point of a series, rejecting points outside the plane.
fn series_px(plane: &Plane<'_>, context: &str, points: &[Xy]) -> WidgetResult<Vec<DVec2>> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| plane.require_px(&format!("{context}[{i}]"), p.x, p.y))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub style: LineStyle,
    pub show_points: bool,
    pub points: Vec<Xy>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineGraphProps {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub series: Vec<Series>,
    pub show_legend: bool,
}

impl Describe for LineGraphProps {
    fn schema() -> Schema {
        let series = object()
            .field("name", string())
            .field("color", color())
            .field("style", LineStyle::schema())
            .field("showPoints", boolean())
            .field("points", array(Xy::schema()).min_items(1));
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("title", string())
            .field("xAxis", AxisSpec::schema())
            .field("yAxis", AxisSpec::schema())
            .field("series", array(series))
            .field("showLegend", boolean())
            .into()
    }
}

const LEGEND_ROW: f64 = 18.0;
const LEGEND_SWATCH: f64 = 20.0;

impl LineGraphProps {
    /// Legend rows in the top-right corner of the frame.
    fn draw_legend(&self, canvas: &mut Canvas, plane: &Plane<'_>) {
        let widest = self
            .series
            .iter()
            .map(|s| crate::render::estimate_text_width(&s.name))
            .fold(0.0, f64::max);
        let x = plane.frame.right() - widest - LEGEND_SWATCH - 15.0;
        let style = TextStyle::label().anchor(Anchor::Start);
        for (i, s) in self.series.iter().enumerate() {
            let y = plane.frame.top + 12.0 + i as f64 * LEGEND_ROW;
            let stroke = s.style.stroke(&s.color, theme::SERIES_STROKE_WIDTH);
            canvas.line(Layer::Labels, x, y, x + LEGEND_SWATCH, y, &stroke);
            canvas.text(Layer::Labels, (x + LEGEND_SWATCH + 5.0, y + 4.0), &s.name, &style);
        }
    }
}

impl Generate for LineGraphProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "lineGraph";
        chart::require_data(CONTEXT, "series", self.series.len())?;
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
        for (i, s) in self.series.iter().enumerate() {
            chart::require_data(CONTEXT, &format!("series[{i}].points"), s.points.len())?;
            let pts = series_px(&plane, &format!("lineGraph series[{i}].points"), &s.points)?;
            draw_polyline(&mut canvas, &pts, &s.color, s.style);
            if s.show_points {
                for p in &pts {
                    draw_point(&mut canvas, *p, &s.color, PointStyle::Closed);
                }
            }
        }
        plane.draw_axes(&mut canvas);
        if self.show_legend {
            self.draw_legend(&mut canvas, &plane);
        }
        canvas.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AreaGraphProps {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub data: Vec<Xy>,
    pub fill_color: String,
    pub stroke_color: String,
    pub area_label: Option<String>,
}

impl Describe for AreaGraphProps {
    fn schema() -> Schema {
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("title", string())
            .field("xAxis", AxisSpec::schema())
            .field("yAxis", AxisSpec::schema())
            .field("data", array(Xy::schema()))
            .field("fillColor", color())
            .field("strokeColor", color())
            .field("areaLabel", string().nullable())
            .into()
    }
}

impl Generate for AreaGraphProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "areaGraph";
        chart::require_data(CONTEXT, "data", self.data.len())?;
        let frame = chart::frame(
            CONTEXT,
            self.width,
            self.height,
            &self.title,
            theme::CHART_PADDING,
            &[("xAxis", &self.x_axis), ("yAxis", &self.y_axis)],
        )?;
        let plane = Plane::new(CONTEXT, frame, &self.x_axis, &self.y_axis, Crossing::Edges)?;
        let top = series_px(&plane, "areaGraph data", &self.data)?;

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        chart::draw_title(&mut canvas, &self.title);
        plane.draw_grid(&mut canvas);

        // Close the outline along the bottom of the value range.
        let base = plane.y.map(self.y_axis.min);
        let mut outline: Vec<(f64, f64)> = top.iter().copied().map(xy).collect();
        if let (Some(first), Some(last)) = (top.first(), top.last()) {
            outline.push((last.x, base));
            outline.push((first.x, base));
        }
        canvas.polygon(Layer::Shapes, &outline, &self.fill_color, None);
        let line: Vec<(f64, f64)> = top.iter().copied().map(xy).collect();
        canvas.polyline(
            Layer::Shapes,
            &line,
            &Stroke::solid(&self.stroke_color, theme::SERIES_STROKE_WIDTH),
        );

        if let Some(label) = &self.area_label {
            let c = centroid(&top);
            canvas.text(
                Layer::Labels,
                (c.x, (c.y + base) / 2.0),
                label,
                &TextStyle::label().size(theme::LABEL_FONT_SIZE).bold(),
            );
        }
        plane.draw_axes(&mut canvas);
        canvas.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Segment {
    pub start: Xy,
    pub end: Xy,
    pub color: String,
    pub label: Option<String>,
}

/// Distance against time, one straight segment per journey leg
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DistanceTimeGraphProps {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub segments: Vec<Segment>,
}

impl Describe for DistanceTimeGraphProps {
    fn schema() -> Schema {
        let segment = object()
            .field("start", Xy::schema())
            .field("end", Xy::schema())
            .field("color", color())
            .field("label", string().nullable());
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("title", string())
            .field("xAxis", AxisSpec::schema())
            .field("yAxis", AxisSpec::schema())
            .field("segments", array(segment))
            .into()
    }
}

impl Generate for DistanceTimeGraphProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "distanceTimeGraph";
        chart::require_data(CONTEXT, "segments", self.segments.len())?;
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
        for (i, seg) in self.segments.iter().enumerate() {
            let context = format!("distanceTimeGraph segments[{i}]");
            let a = plane.require_px(&format!("{context}.start"), seg.start.x, seg.start.y)?;
            let b = plane.require_px(&format!("{context}.end"), seg.end.x, seg.end.y)?;
            draw_polyline(&mut canvas, &[a, b], &seg.color, LineStyle::Solid);
            draw_point(&mut canvas, a, &seg.color, PointStyle::Closed);
            draw_point(&mut canvas, b, &seg.color, PointStyle::Closed);
            if let Some(label) = &seg.label {
                draw_point_label(&mut canvas, (a + b) / 2.0, label);
            }
        }
        plane.draw_axes(&mut canvas);
        canvas.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn axis(max: f64) -> serde_json::Value {
        json!({
            "label": "",
            "min": 0,
            "max": max,
            "ticks": 2,
            "showGridLines": false,
            "tickFormat": "plain"
        })
    }

    #[test]
    fn series_points_must_lie_on_the_plane() {
        let props: LineGraphProps = serde_json::from_value(json!({
            "width": 400,
            "height": 300,
            "title": "",
            "xAxis": axis(10.0),
            "yAxis": axis(10.0),
            "series": [{
                "name": "a",
                "color": "red",
                "style": "solid",
                "showPoints": true,
                "points": [{"x": 0, "y": 0}, {"x": 12, "y": 4}]
            }],
            "showLegend": false
        }))
        .unwrap();
        assert_eq!(props.generate().unwrap_err().kind(), "ErrInvalidRange");
    }

    #[test]
    fn area_is_closed_along_the_axis_minimum() {
        let props: AreaGraphProps = serde_json::from_value(json!({
            "width": 400,
            "height": 300,
            "title": "",
            "xAxis": axis(10.0),
            "yAxis": axis(10.0),
            "data": [{"x": 0, "y": 5}, {"x": 10, "y": 10}],
            "fillColor": "lightblue",
            "strokeColor": "blue",
            "areaLabel": null
        }))
        .unwrap();
        let svg = props.generate().unwrap();
        // frame 60..380 x 20..250
        assert!(svg.contains("points=\"60,135 380,20 380,250 60,250\""));
    }

    #[test]
    fn empty_series_list_is_invalid_dimensions() {
        let props: DistanceTimeGraphProps = serde_json::from_value(json!({
            "width": 400,
            "height": 300,
            "title": "Walk",
            "xAxis": axis(10.0),
            "yAxis": axis(10.0),
            "segments": []
        }))
        .unwrap();
        assert_eq!(props.generate().unwrap_err().kind(), "ErrInvalidDimensions");
    }
}
