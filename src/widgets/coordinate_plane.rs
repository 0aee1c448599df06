//! Four-quadrant coordinate plane with named points and figures built on them

use std::collections::HashMap;

use glam::DVec2;
use serde::Deserialize;

use super::{Xy, color};
use crate::errors::{FieldIssue, FieldPath, ValidationError, WidgetResult};
use crate::plane::primitives::{
    draw_distance, draw_point, draw_point_label, draw_polygon, draw_polyline,
};
use crate::plane::{AxisSpec, Crossing, LineStyle, Plane, PointStyle};
use crate::registry::{Describe, Generate};
use crate::render::{Canvas, theme};
use crate::schema::{
    Schema, array, boolean, canvas_extent, non_empty_string, number, object, string,
};
use crate::types::Frame;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlotPoint {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub color: String,
    pub style: PointStyle,
}

/// Segment between two points, referenced by id
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Distance {
    pub point_id1: String,
    pub point_id2: String,
    pub color: String,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Polygon {
    pub vertices: Vec<String>,
    pub is_closed: bool,
    pub fill_color: String,
    pub stroke_color: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Polyline {
    pub points: Vec<Xy>,
    pub color: String,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CoordinatePlaneProps {
    pub width: f64,
    pub height: f64,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub show_quadrant_labels: bool,
    pub points: Vec<PlotPoint>,
    pub distances: Vec<Distance>,
    pub polygons: Vec<Polygon>,
    pub polylines: Vec<Polyline>,
}

impl Describe for CoordinatePlaneProps {
    fn schema() -> Schema {
        let point = object()
            .field("id", non_empty_string())
            .field("x", number())
            .field("y", number())
            .field("label", string())
            .field("color", color())
            .field("style", PointStyle::schema());
        let distance = object()
            .field("pointId1", non_empty_string())
            .field("pointId2", non_empty_string())
            .field("color", color())
            .field("style", LineStyle::schema());
        let polygon = object()
            .field("vertices", array(non_empty_string()).min_items(2))
            .field("isClosed", boolean())
            .field("fillColor", color())
            .field("strokeColor", color())
            .field("label", string().nullable());
        let polyline = object()
            .field("points", array(Xy::schema()).min_items(2))
            .field("color", color())
            .field("style", LineStyle::schema());
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("xAxis", AxisSpec::schema())
            .field("yAxis", AxisSpec::schema())
            .field("showQuadrantLabels", boolean())
            .field("points", array(point))
            .field("distances", array(distance))
            .field("polygons", array(polygon))
            .field("polylines", array(polyline))
            .into()
    }
}

impl Generate for CoordinatePlaneProps {
    fn check_references(&self, issues: &mut Vec<FieldIssue>) {
        let root = FieldPath::root();
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (i, p) in self.points.iter().enumerate() {
            if let Some(first) = seen.insert(p.id.as_str(), i) {
                issues.push(FieldIssue::new(
                    root.key("points").index(i).key("id"),
                    format!("duplicate point id \"{}\" (first used by points[{first}])", p.id),
                ));
            }
        }
        let mut require = |path: FieldPath, id: &str| {
            if !seen.contains_key(id) {
                issues.push(FieldIssue::new(path, format!("unknown point id \"{id}\"")));
            }
        };
        for (i, d) in self.distances.iter().enumerate() {
            let path = root.key("distances").index(i);
            require(path.key("pointId1"), &d.point_id1);
            require(path.key("pointId2"), &d.point_id2);
        }
        for (i, poly) in self.polygons.iter().enumerate() {
            let path = root.key("polygons").index(i).key("vertices");
            for (j, id) in poly.vertices.iter().enumerate() {
                require(path.index(j), id);
            }
        }
    }

    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "coordinatePlane";
        self.x_axis.check_range("coordinatePlane xAxis")?;
        self.y_axis.check_range("coordinatePlane yAxis")?;
        let frame = Frame::inset(CONTEXT, self.width, self.height, theme::CHART_PADDING, 0.0)?;
        let plane = Plane::new(CONTEXT, frame, &self.x_axis, &self.y_axis, Crossing::Origin)?;

        let mut positions = Vec::with_capacity(self.points.len());
        let mut px: HashMap<&str, DVec2> = HashMap::with_capacity(self.points.len());
        for (i, p) in self.points.iter().enumerate() {
            let at = plane.require_px(&format!("coordinatePlane points[{i}]"), p.x, p.y)?;
            px.entry(p.id.as_str()).or_insert(at);
            positions.push(at);
        }
        let root = FieldPath::root();
        let lookup = |path: FieldPath, id: &str| -> WidgetResult<DVec2> {
            px.get(id).copied().ok_or_else(|| {
                ValidationError {
                    widget_type: CONTEXT.to_string(),
                    issues: vec![FieldIssue::new(path, format!("unknown point id \"{id}\""))],
                }
                .into()
            })
        };

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        plane.draw_grid(&mut canvas);
        plane.draw_axes(&mut canvas);
        if self.show_quadrant_labels {
            plane.draw_quadrant_labels(&mut canvas);
        }
        for (i, d) in self.distances.iter().enumerate() {
            let path = root.key("distances").index(i);
            let from = lookup(path.key("pointId1"), &d.point_id1)?;
            let to = lookup(path.key("pointId2"), &d.point_id2)?;
            draw_distance(&mut canvas, from, to, &d.color, d.style);
        }
        for (i, poly) in self.polygons.iter().enumerate() {
            let path = root.key("polygons").index(i).key("vertices");
            let vertices = poly
                .vertices
                .iter()
                .enumerate()
                .map(|(j, id)| lookup(path.index(j), id))
                .collect::<WidgetResult<Vec<DVec2>>>()?;
            draw_polygon(
                &mut canvas,
                &vertices,
                poly.is_closed,
                &poly.fill_color,
                &poly.stroke_color,
                poly.label.as_deref(),
            );
        }
        for (i, line) in self.polylines.iter().enumerate() {
            let pts = line
                .points
                .iter()
                .enumerate()
                .map(|(j, p)| {
                    plane.require_px(&format!("coordinatePlane polylines[{i}].points[{j}]"), p.x, p.y)
                })
                .collect::<WidgetResult<Vec<_>>>()?;
            draw_polyline(&mut canvas, &pts, &line.color, line.style);
        }
        for (p, &at) in self.points.iter().zip(&positions) {
            draw_point(&mut canvas, at, &p.color, p.style);
            draw_point_label(&mut canvas, at, &p.label);
        }
        canvas.finish()
    }
}
