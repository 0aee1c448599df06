//! Geometric primitives drawn on a plane.
//!
//! Each primitive goes to a fixed layer: distances, then shapes, then points,
//! with text labels above everything.

use glam::DVec2;
use serde::Deserialize;

use crate::render::geometry::{centroid, xy};
use crate::render::{Anchor, Canvas, Layer, Stroke, TextStyle, theme};
use crate::schema::{Schema, enumeration};

/// Stroke pattern for lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    pub fn schema() -> Schema {
        enumeration(&["solid", "dashed", "dotted"])
    }

    pub fn stroke(self, color: &str, width: f64) -> Stroke<'_> {
        match self {
            LineStyle::Solid => Stroke::solid(color, width),
            LineStyle::Dashed => Stroke::dashed(color, width, "6 4"),
            LineStyle::Dotted => Stroke::dashed(color, width, "2 3"),
        }
    }
}

/// Filled or hollow point marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointStyle {
    Open,
    Closed,
}

impl PointStyle {
    pub fn schema() -> Schema {
        enumeration(&["open", "closed"])
    }
}

pub fn draw_point(canvas: &mut Canvas, at: DVec2, color: &str, style: PointStyle) {
    match style {
        PointStyle::Closed => canvas.circle(Layer::Points, xy(at), theme::POINT_RADIUS, color, None),
        PointStyle::Open => canvas.circle(
            Layer::Points,
            xy(at),
            theme::POINT_RADIUS,
            theme::EMPTY_FILL,
            Some(&Stroke::solid(color, theme::SERIES_STROKE_WIDTH)),
        ),
    }
}

/// Label offset up and to the right of a point marker.
pub fn draw_point_label(canvas: &mut Canvas, at: DVec2, label: &str) {
    let style = TextStyle::label().anchor(Anchor::Start);
    canvas.text(Layer::Labels, (at.x + 7.0, at.y - 7.0), label, &style);
}

pub fn draw_distance(canvas: &mut Canvas, from: DVec2, to: DVec2, color: &str, style: LineStyle) {
    let stroke = style.stroke(color, theme::SERIES_STROKE_WIDTH);
    canvas.line(Layer::Distances, from.x, from.y, to.x, to.y, &stroke);
}

/// Closed polygon or open chain through `vertices`, with an optional
/// label at the vertex centroid.
pub fn draw_polygon(
    canvas: &mut Canvas,
    vertices: &[DVec2],
    closed: bool,
    fill: &str,
    stroke_color: &str,
    label: Option<&str>,
) {
    let points: Vec<(f64, f64)> = vertices.iter().copied().map(xy).collect();
    let stroke = Stroke::solid(stroke_color, theme::SERIES_STROKE_WIDTH);
    if closed {
        canvas.polygon(Layer::Shapes, &points, fill, Some(&stroke));
    } else {
        canvas.polyline(Layer::Shapes, &points, &stroke);
    }
    if let Some(label) = label {
        let c = centroid(vertices);
        canvas.text(Layer::Labels, (c.x, c.y + 4.0), label, &TextStyle::label());
    }
}

pub fn draw_polyline(canvas: &mut Canvas, points: &[DVec2], color: &str, style: LineStyle) {
    let points: Vec<(f64, f64)> = points.iter().copied().map(xy).collect();
    canvas.polyline(
        Layer::Shapes,
        &points,
        &style.stroke(color, theme::SERIES_STROKE_WIDTH),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn dash_patterns() {
        assert_eq!(LineStyle::Solid.stroke("red", 1.0).dash, None);
        assert_eq!(LineStyle::Dashed.stroke("red", 1.0).dash, Some("6 4"));
        assert_eq!(LineStyle::Dotted.stroke("red", 1.0).dash, Some("2 3"));
    }

    #[test]
    fn open_points_are_hollow() {
        let mut canvas = Canvas::new("t", 50.0, 50.0);
        draw_point(&mut canvas, dvec2(10.0, 10.0), "blue", PointStyle::Open);
        let svg = canvas.finish().unwrap();
        assert!(svg.contains("fill=\"#ffffff\" stroke=\"blue\""));
    }

    #[test]
    fn open_chains_are_polylines() {
        let mut canvas = Canvas::new("t", 50.0, 50.0);
        let pts = [dvec2(0.0, 0.0), dvec2(10.0, 0.0), dvec2(10.0, 10.0)];
        draw_polygon(&mut canvas, &pts, false, "none", "black", None);
        let svg = canvas.finish().unwrap();
        assert!(svg.contains("<polyline"));
        assert!(!svg.contains("<polygon"));
    }
}
