//! Number lines with a highlighted value

use serde::Deserialize;

use super::color;
use crate::errors::{WidgetError, WidgetResult};
use crate::plane::LinearScale;
use crate::plane::scale::check_range;
use crate::plane::ticks::interval_ticks;
use crate::render::{Canvas, Layer, Stroke, TextStyle, fmt_num, theme};
use crate::registry::{Describe, Generate};
use crate::schema::{Schema, boolean, canvas_extent, number, object};

/// Horizontal line across the middle of the canvas, with ticks
struct Track {
    scale: LinearScale,
    ticks: Vec<f64>,
    y: f64,
}

impl Track {
    fn new(
        context: &'static str,
        width: f64,
        height: f64,
        min: f64,
        max: f64,
        interval: f64,
    ) -> WidgetResult<Self> {
        check_range(context, min, max)?;
        let (start, end) = (
            theme::NUMBER_LINE_PADDING,
            width - theme::NUMBER_LINE_PADDING,
        );
        if !(end > start) || !(height > 0.0) {
            return Err(WidgetError::invalid_dimensions(
                context,
                format!("canvas {width}x{height} leaves no room for the line"),
            ));
        }
        let scale = LinearScale::new(context, min, max, start, end)?;
        let ticks = interval_ticks(context, min, max, interval)?;
        Ok(Self {
            scale,
            ticks,
            y: height / 2.0,
        })
    }

    fn draw(&self, canvas: &mut Canvas, show_labels: bool) {
        let axis = Stroke::solid(theme::AXIS_COLOR, theme::AXIS_STROKE_WIDTH);
        let (start, end) = (self.scale.map(self.scale.min()), self.scale.map(self.scale.max()));
        canvas.line(Layer::Axes, start, self.y, end, self.y, &axis);
        let style = TextStyle::label();
        for &t in &self.ticks {
            let x = self.scale.map(t);
            canvas.line(
                Layer::Axes,
                x,
                self.y - theme::TICK_LENGTH,
                x,
                self.y + theme::TICK_LENGTH,
                &axis,
            );
            if show_labels {
                canvas.text(Layer::Labels, (x, self.y + 20.0), &fmt_num(t), &style);
            }
        }
    }

    fn highlight(&self, canvas: &mut Canvas, value: f64, color: &str) {
        canvas.circle(
            Layer::Points,
            (self.scale.map(value), self.y),
            theme::POINT_RADIUS + 2.0,
            color,
            None,
        );
    }
}

fn line_schema(flag: &str) -> Schema {
    object()
        .field("width", canvas_extent())
        .field("height", canvas_extent())
        .field("min", number())
        .field("max", number())
        .field("tickInterval", number().positive())
        .field("value", number())
        .field("highlightColor", color())
        .field(flag, boolean())
        .into()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NumberLineProps {
    pub width: f64,
    pub height: f64,
    pub min: f64,
    pub max: f64,
    pub tick_interval: f64,
    pub value: f64,
    pub highlight_color: String,
    pub show_tick_labels: bool,
}

impl Describe for NumberLineProps {
    fn schema() -> Schema {
        line_schema("showTickLabels")
    }
}

impl Generate for NumberLineProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "numberLine";
        let track = Track::new(CONTEXT, self.width, self.height, self.min, self.max, self.tick_interval)?;
        track.scale.require(CONTEXT, self.value)?;

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        track.draw(&mut canvas, self.show_tick_labels);
        track.highlight(&mut canvas, self.value, &self.highlight_color);
        canvas.finish()
    }
}

/// Number line showing `|value|` as the distance from zero
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AbsoluteValueNumberLineProps {
    pub width: f64,
    pub height: f64,
    pub min: f64,
    pub max: f64,
    pub tick_interval: f64,
    pub value: f64,
    pub highlight_color: String,
    pub show_distance_label: bool,
}

impl Describe for AbsoluteValueNumberLineProps {
    fn schema() -> Schema {
        line_schema("showDistanceLabel")
    }
}

const BRACKET_RISE: f64 = 18.0;

impl Generate for AbsoluteValueNumberLineProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "absoluteValueNumberLine";
        let track = Track::new(CONTEXT, self.width, self.height, self.min, self.max, self.tick_interval)?;
        track.scale.require(CONTEXT, self.value)?;
        track.scale.require("absoluteValueNumberLine zero", 0.0)?;

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        track.draw(&mut canvas, true);

        let x0 = track.scale.map(0.0);
        let xv = track.scale.map(self.value);
        let top = track.y - BRACKET_RISE;
        let stroke = Stroke::solid(&self.highlight_color, theme::SERIES_STROKE_WIDTH);
        canvas.polyline(
            Layer::Distances,
            &[(x0, track.y - 8.0), (x0, top), (xv, top), (xv, track.y - 8.0)],
            &stroke,
        );
        if self.show_distance_label {
            let label = format!("|{}| = {}", fmt_num(self.value), fmt_num(self.value.abs()));
            canvas.text(
                Layer::Labels,
                ((x0 + xv) / 2.0, top - 6.0),
                &label,
                &TextStyle::label().size(theme::LABEL_FONT_SIZE),
            );
        }
        track.highlight(&mut canvas, self.value, &self.highlight_color);
        canvas.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn number_line(min: f64, max: f64, value: f64) -> NumberLineProps {
        serde_json::from_value(json!({
            "width": 400,
            "height": 100,
            "min": min,
            "max": max,
            "tickInterval": 5,
            "value": value,
            "highlightColor": "#e53935",
            "showTickLabels": true
        }))
        .unwrap()
    }

    #[test]
    fn highlight_sits_on_the_scaled_value() {
        let svg = number_line(-10.0, 10.0, -7.0).generate().unwrap();
        assert!(svg.contains("<circle cx=\"74\" cy=\"50\" r=\"6\" fill=\"#e53935\"/>"));
    }

    #[test]
    fn reversed_bounds_are_invalid_range() {
        let err = number_line(10.0, -10.0, 0.0).generate().unwrap_err();
        assert_eq!(err.kind(), "ErrInvalidRange");
        let err = number_line(3.0, 3.0, 3.0).generate().unwrap_err();
        assert_eq!(err.kind(), "ErrInvalidRange");
    }

    #[test]
    fn value_outside_the_line_is_invalid_range() {
        let err = number_line(0.0, 10.0, 11.0).generate().unwrap_err();
        assert_eq!(err.kind(), "ErrInvalidRange");
    }

    #[test]
    fn distance_label_shows_absolute_value() {
        let props: AbsoluteValueNumberLineProps = serde_json::from_value(json!({
            "width": 400,
            "height": 100,
            "min": -10,
            "max": 10,
            "tickInterval": 2,
            "value": -4,
            "highlightColor": "purple",
            "showDistanceLabel": true
        }))
        .unwrap();
        let svg = props.generate().unwrap();
        assert!(svg.contains(">|-4| = 4</text>"));
    }
}
