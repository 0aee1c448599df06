//! Axis specifications and their rendering

use serde::Deserialize;

use super::scale::{LinearScale, check_range};
use super::ticks::{TickFormat, explicit_ticks, interval_ticks};
use crate::errors::WidgetResult;
use crate::render::{Anchor, Canvas, Layer, Stroke, TextStyle, theme};
use crate::schema::{Schema, any_of, array, boolean, number, object, string};
use crate::types::Frame;

/// Tick placement: a positive interval or an explicit list of values
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TickSpacing {
    Interval(f64),
    Values(Vec<f64>),
}

impl TickSpacing {
    pub fn schema() -> Schema {
        any_of(vec![
            number().positive().into(),
            array(number()).min_items(1).into(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AxisSpec {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub ticks: TickSpacing,
    pub show_grid_lines: bool,
    pub tick_format: TickFormat,
}

impl AxisSpec {
    pub fn schema() -> Schema {
        object()
            .field("label", string())
            .field("min", number())
            .field("max", number())
            .field("ticks", TickSpacing::schema())
            .field("showGridLines", boolean())
            .field("tickFormat", TickFormat::schema())
            .into()
    }

    /// Fails with `InvalidRange` unless `min < max`.
    pub fn check_range(&self, context: &str) -> WidgetResult<()> {
        check_range(context, self.min, self.max)
    }

    /// Tick values for this axis; fails on a degenerate range or bad ticks.
    pub fn tick_values(&self, context: &str) -> WidgetResult<Vec<f64>> {
        match &self.ticks {
            TickSpacing::Interval(step) => interval_ticks(context, self.min, self.max, *step),
            TickSpacing::Values(values) => explicit_ticks(context, self.min, self.max, values),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// An axis resolved against a frame: scale plus tick positions
#[derive(Debug, Clone)]
pub struct AxisView<'a> {
    pub spec: &'a AxisSpec,
    pub scale: LinearScale,
    pub ticks: Vec<f64>,
    orientation: Orientation,
}

impl<'a> AxisView<'a> {
    /// Axis along the bottom edge of `frame`, left to right.
    pub fn horizontal(context: &str, spec: &'a AxisSpec, frame: &Frame) -> WidgetResult<Self> {
        Self::build(context, spec, frame.left, frame.right(), Orientation::Horizontal)
    }

    /// Axis along the left edge of `frame`, bottom to top.
    pub fn vertical(context: &str, spec: &'a AxisSpec, frame: &Frame) -> WidgetResult<Self> {
        Self::build(context, spec, frame.bottom(), frame.top, Orientation::Vertical)
    }

    fn build(
        context: &str,
        spec: &'a AxisSpec,
        start: f64,
        end: f64,
        orientation: Orientation,
    ) -> WidgetResult<Self> {
        let scale = LinearScale::new(context, spec.min, spec.max, start, end)?;
        let ticks = spec.tick_values(context)?;
        Ok(Self {
            spec,
            scale,
            ticks,
            orientation,
        })
    }

    pub fn map(&self, value: f64) -> f64 {
        self.scale.map(value)
    }

    /// Grid lines across the frame at each tick, when enabled.
    pub fn draw_grid(&self, canvas: &mut Canvas, frame: &Frame) {
        if !self.spec.show_grid_lines {
            return;
        }
        let stroke = Stroke::solid(theme::GRID_COLOR, theme::GRID_STROKE_WIDTH);
        for &t in &self.ticks {
            let p = self.map(t);
            match self.orientation {
                Orientation::Horizontal => {
                    canvas.line(Layer::Grid, p, frame.top, p, frame.bottom(), &stroke)
                }
                Orientation::Vertical => {
                    canvas.line(Layer::Grid, frame.left, p, frame.right(), p, &stroke)
                }
            }
        }
    }

    /// Axis line at pixel offset `at` (y for horizontal axes, x for
    /// vertical), with tick marks, tick labels and the axis label.
    pub fn draw(&self, canvas: &mut Canvas, frame: &Frame, at: f64) {
        let stroke = Stroke::solid(theme::AXIS_COLOR, theme::AXIS_STROKE_WIDTH);
        let tick_stroke = Stroke::solid(theme::AXIS_COLOR, 1.0);
        let tick_style = TextStyle::label();
        let label_style = TextStyle::label().size(theme::LABEL_FONT_SIZE);
        match self.orientation {
            Orientation::Horizontal => {
                canvas.line(Layer::Axes, frame.left, at, frame.right(), at, &stroke);
                for &t in &self.ticks {
                    let x = self.map(t);
                    canvas.line(Layer::Axes, x, at, x, at + theme::TICK_LENGTH, &tick_stroke);
                    if let Some(text) = self.spec.tick_format.label(t) {
                        let y = at + theme::TICK_LENGTH + theme::FONT_SIZE + 2.0;
                        canvas.text(Layer::Labels, (x, y), &text, &tick_style);
                    }
                }
                canvas.text(
                    Layer::Labels,
                    (frame.center_x(), frame.bottom() + 40.0),
                    &self.spec.label,
                    &label_style,
                );
            }
            Orientation::Vertical => {
                canvas.line(Layer::Axes, at, frame.top, at, frame.bottom(), &stroke);
                let tick_style = tick_style.anchor(Anchor::End);
                for &t in &self.ticks {
                    let y = self.map(t);
                    canvas.line(Layer::Axes, at - theme::TICK_LENGTH, y, at, y, &tick_stroke);
                    if let Some(text) = self.spec.tick_format.label(t) {
                        let x = at - theme::TICK_LENGTH - 3.0;
                        canvas.text(Layer::Labels, (x, y + 4.0), &text, &tick_style);
                    }
                }
                canvas.rotated_text(
                    Layer::Labels,
                    (15.0, frame.center_y()),
                    -90.0,
                    &self.spec.label,
                    &label_style,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(ticks: serde_json::Value) -> AxisSpec {
        serde_json::from_value(json!({
            "label": "x",
            "min": 0,
            "max": 10,
            "ticks": ticks,
            "showGridLines": true,
            "tickFormat": "plain"
        }))
        .unwrap()
    }

    #[test]
    fn ticks_accept_interval_or_values() {
        assert_eq!(spec(json!(5)).ticks, TickSpacing::Interval(5.0));
        assert_eq!(
            spec(json!([1, 2.5])).ticks,
            TickSpacing::Values(vec![1.0, 2.5])
        );
    }

    #[test]
    fn schema_rejects_zero_interval_and_empty_list() {
        let s = TickSpacing::schema();
        assert!(s.validate(&json!(2)).is_empty());
        assert!(s.validate(&json!([0])).is_empty());
        assert_eq!(s.validate(&json!(0)).len(), 1);
        assert_eq!(s.validate(&json!([])).len(), 1);
    }

    #[test]
    fn vertical_axis_is_inverted() {
        let frame = Frame {
            left: 60.0,
            top: 20.0,
            width: 300.0,
            height: 200.0,
        };
        let axis = spec(json!(5));
        let view = AxisView::vertical("t", &axis, &frame).unwrap();
        assert_eq!(view.map(0.0), 220.0);
        assert_eq!(view.map(10.0), 20.0);
        assert_eq!(view.ticks, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn grid_lines_can_be_disabled() {
        let frame = Frame {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
        };
        let mut axis = spec(json!(5));
        axis.show_grid_lines = false;
        let view = AxisView::horizontal("t", &axis, &frame).unwrap();
        let mut canvas = Canvas::new("t", 100.0, 100.0);
        view.draw_grid(&mut canvas, &frame);
        assert!(canvas.is_empty());
    }
}
