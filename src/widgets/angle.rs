//! Angle between two rays sharing a vertex

use glam::{DVec2, dvec2};
use serde::Deserialize;

use super::color;
use crate::errors::{WidgetError, WidgetResult};
use crate::registry::{Describe, Generate};
use crate::render::geometry::{arc_path, polar_point, xy};
use crate::render::{Anchor, Canvas, Layer, Stroke, TextStyle, theme};
use crate::schema::{Schema, canvas_extent, number, object, string};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AngleDiagramProps {
    pub width: f64,
    pub height: f64,
    pub angle_degrees: f64,
    pub vertex_label: String,
    pub start_ray_label: String,
    pub end_ray_label: String,
    pub angle_label: Option<String>,
    pub color: String,
}

impl Describe for AngleDiagramProps {
    fn schema() -> Schema {
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("angleDegrees", number().positive().below(360.0))
            .field("vertexLabel", string())
            .field("startRayLabel", string())
            .field("endRayLabel", string())
            .field("angleLabel", string().nullable())
            .field("color", color())
            .into()
    }
}

const ARC_RADIUS: f64 = 28.0;
const RIGHT_ANGLE_SIZE: f64 = 16.0;
const LABEL_MARGIN: f64 = 30.0;

/// Small square in the corner of a right angle
fn right_angle_marker(vertex: DVec2) -> String {
    let s = RIGHT_ANGLE_SIZE;
    let [a, b, c] = [
        vertex + dvec2(s, 0.0),
        vertex + dvec2(s, -s),
        vertex + dvec2(0.0, -s),
    ]
    .map(|p| {
        let (x, y) = xy(p);
        format!("{} {}", crate::render::fmt_num(x), crate::render::fmt_num(y))
    });
    format!("M {a} L {b} L {c}")
}

impl Generate for AngleDiagramProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "angleDiagram";
        if !(self.angle_degrees > 0.0 && self.angle_degrees < 360.0) {
            return Err(WidgetError::invalid_range(
                format!("{CONTEXT} angleDegrees {}", self.angle_degrees),
                0.0,
                360.0,
            ));
        }
        let ray = self.width.min(self.height) / 2.0 - LABEL_MARGIN;
        if !(ray > ARC_RADIUS) {
            return Err(WidgetError::invalid_dimensions(
                CONTEXT,
                format!("canvas {}x{} is too small for the rays", self.width, self.height),
            ));
        }
        let vertex = dvec2(self.width / 2.0, self.height / 2.0);
        let start = polar_point(vertex, ray, 0.0);
        let end = polar_point(vertex, ray, self.angle_degrees);

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        let stroke = Stroke::solid(&self.color, theme::SERIES_STROKE_WIDTH);
        canvas.line(Layer::Shapes, vertex.x, vertex.y, start.x, start.y, &stroke);
        canvas.line(Layer::Shapes, vertex.x, vertex.y, end.x, end.y, &stroke);

        let marker = if self.angle_degrees == 90.0 {
            right_angle_marker(vertex)
        } else {
            arc_path(vertex, ARC_RADIUS, 0.0, self.angle_degrees)
        };
        canvas.path(Layer::Shapes, marker, "none", Some(&Stroke::solid(&self.color, 1.5)));
        canvas.circle(Layer::Points, xy(vertex), 3.0, &self.color, None);

        let style = TextStyle::label().size(theme::LABEL_FONT_SIZE);
        canvas.text(
            Layer::Labels,
            (vertex.x - 10.0, vertex.y + 18.0),
            &self.vertex_label,
            &style.clone().anchor(Anchor::End),
        );
        let start_label = polar_point(vertex, ray + 14.0, 0.0);
        canvas.text(Layer::Labels, (start_label.x, start_label.y + 5.0), &self.start_ray_label, &style);
        let end_label = polar_point(vertex, ray + 14.0, self.angle_degrees);
        canvas.text(Layer::Labels, (end_label.x, end_label.y + 5.0), &self.end_ray_label, &style);
        if let Some(label) = &self.angle_label {
            let at = polar_point(vertex, ARC_RADIUS + 16.0, self.angle_degrees / 2.0);
            canvas.text(Layer::Labels, (at.x, at.y + 5.0), label, &style);
        }
        canvas.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(angle: f64) -> AngleDiagramProps {
        serde_json::from_value(json!({
            "width": 300,
            "height": 300,
            "angleDegrees": angle,
            "vertexLabel": "B",
            "startRayLabel": "C",
            "endRayLabel": "A",
            "angleLabel": null,
            "color": "navy"
        }))
        .unwrap()
    }

    #[test]
    fn right_angle_uses_a_square_marker() {
        let svg = props(90.0).generate().unwrap();
        assert!(svg.contains("d=\"M 166 150 L 166 134 L 150 134\""));
        assert!(!svg.contains(" A "));
    }

    #[test]
    fn other_angles_use_an_arc() {
        let svg = props(45.0).generate().unwrap();
        assert!(svg.contains("d=\"M 178 150 A 28 28 0 0 0"));
    }

    #[test]
    fn reflex_angle_takes_the_large_arc() {
        let svg = props(270.0).generate().unwrap();
        assert!(svg.contains("A 28 28 0 1 0"));
    }
}
