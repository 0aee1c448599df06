//! Coordinate plane base shared by every axis-based widget
//!
//! - `scale`: affine domain-to-pixel mapping
//! - `ticks`: tick generation and label formats
//! - `axis`: axis specs, grid lines, axis drawing
//! - `primitives`: points, distances, polygons, polylines

pub mod axis;
pub mod primitives;
pub mod scale;
pub mod ticks;

pub use axis::{AxisSpec, AxisView, TickSpacing};
pub use primitives::{LineStyle, PointStyle};
pub use scale::LinearScale;
pub use ticks::TickFormat;

use glam::{DVec2, dvec2};

use crate::errors::WidgetResult;
use crate::render::{Canvas, Layer, TextStyle, theme};
use crate::types::Frame;

/// Where the two axis lines are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Along the bottom and left edges of the frame
    Edges,
    /// Through the origin when zero is in range, else along the edges
    Origin,
}

/// Two axes over one frame
#[derive(Debug, Clone)]
pub struct Plane<'a> {
    pub frame: Frame,
    pub x: AxisView<'a>,
    pub y: AxisView<'a>,
    crossing: Crossing,
}

impl<'a> Plane<'a> {
    pub fn new(
        context: &str,
        frame: Frame,
        x_axis: &'a AxisSpec,
        y_axis: &'a AxisSpec,
        crossing: Crossing,
    ) -> WidgetResult<Self> {
        let x = AxisView::horizontal(&format!("{context} xAxis"), x_axis, &frame)?;
        let y = AxisView::vertical(&format!("{context} yAxis"), y_axis, &frame)?;
        Ok(Self {
            frame,
            x,
            y,
            crossing,
        })
    }

    /// Pixel position of a domain point
    pub fn to_px(&self, x: f64, y: f64) -> DVec2 {
        dvec2(self.x.map(x), self.y.map(y))
    }

    /// Pixel position of a domain point that must lie inside both ranges.
    pub fn require_px(&self, context: &str, x: f64, y: f64) -> WidgetResult<DVec2> {
        self.x.scale.require(&format!("{context} x"), x)?;
        self.y.scale.require(&format!("{context} y"), y)?;
        Ok(self.to_px(x, y))
    }

    fn origin_in_range(&self) -> bool {
        self.x.scale.contains(0.0) && self.y.scale.contains(0.0)
    }

    /// Grid lines for both axes, behind everything else.
    pub fn draw_grid(&self, canvas: &mut Canvas) {
        self.x.draw_grid(canvas, &self.frame);
        self.y.draw_grid(canvas, &self.frame);
    }

    pub fn draw_axes(&self, canvas: &mut Canvas) {
        let (x_at, y_at) = match self.crossing {
            Crossing::Origin => {
                let y0 = if self.y.scale.contains(0.0) {
                    self.y.map(0.0)
                } else {
                    self.frame.bottom()
                };
                let x0 = if self.x.scale.contains(0.0) {
                    self.x.map(0.0)
                } else {
                    self.frame.left
                };
                (y0, x0)
            }
            Crossing::Edges => (self.frame.bottom(), self.frame.left),
        };
        self.x.draw(canvas, &self.frame, x_at);
        self.y.draw(canvas, &self.frame, y_at);
    }

    /// Roman numerals I-IV at the centre of each quadrant. Drawn only when
    /// the origin lies inside both axis ranges.
    pub fn draw_quadrant_labels(&self, canvas: &mut Canvas) {
        if !self.origin_in_range() {
            return;
        }
        let o = self.to_px(0.0, 0.0);
        let f = &self.frame;
        let mid = |a: f64, b: f64| (a + b) / 2.0;
        let style = TextStyle::label()
            .size(theme::LABEL_FONT_SIZE)
            .fill(theme::GRID_COLOR);
        let quadrants = [
            ("I", mid(o.x, f.right()), mid(f.top, o.y)),
            ("II", mid(f.left, o.x), mid(f.top, o.y)),
            ("III", mid(f.left, o.x), mid(o.y, f.bottom())),
            ("IV", mid(o.x, f.right()), mid(o.y, f.bottom())),
        ];
        for (label, x, y) in quadrants {
            canvas.text(Layer::Labels, (x, y), label, &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn axis(min: f64, max: f64) -> AxisSpec {
        serde_json::from_value(json!({
            "label": "",
            "min": min,
            "max": max,
            "ticks": 1,
            "showGridLines": false,
            "tickFormat": "hidden"
        }))
        .unwrap()
    }

    fn frame() -> Frame {
        Frame {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
        }
    }

    #[test]
    fn quadrant_labels_need_origin_in_range() {
        let (x, y) = (axis(-5.0, 5.0), axis(1.0, 5.0));
        let plane = Plane::new("t", frame(), &x, &y, Crossing::Origin).unwrap();
        let mut canvas = Canvas::new("t", 100.0, 100.0);
        plane.draw_quadrant_labels(&mut canvas);
        assert!(canvas.is_empty());

        let y = axis(0.0, 5.0);
        let plane = Plane::new("t", frame(), &x, &y, Crossing::Origin).unwrap();
        plane.draw_quadrant_labels(&mut canvas);
        assert_eq!(canvas.len(), 4);
    }

    #[test]
    fn out_of_range_points_are_rejected() {
        let (x, y) = (axis(-5.0, 5.0), axis(-5.0, 5.0));
        let plane = Plane::new("t", frame(), &x, &y, Crossing::Origin).unwrap();
        assert_eq!(plane.require_px("p", 0.0, 0.0).unwrap(), dvec2(50.0, 50.0));
        assert_eq!(
            plane.require_px("p", 6.0, 0.0).unwrap_err().kind(),
            "ErrInvalidRange"
        );
    }

    #[test]
    fn degenerate_axis_fails_construction() {
        let (x, y) = (axis(2.0, 2.0), axis(0.0, 1.0));
        let err = Plane::new("t", frame(), &x, &y, Crossing::Edges).unwrap_err();
        assert_eq!(err.kind(), "ErrInvalidRange");
    }
}
