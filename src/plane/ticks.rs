//! Tick generation and tick label formatting

use serde::Deserialize;

use crate::errors::{WidgetError, WidgetResult};
use crate::render::{fmt_num, theme};
use crate::schema::{Schema, enumeration};

/// Slack applied to `min / interval` and `max / interval` so that float
/// noise never drops an end tick.
const TICK_EPSILON: f64 = 1e-9;

/// Ticks at every multiple of `interval` inside `[min, max]`.
///
/// Each tick is computed as `first + i * interval` rather than by repeated
/// addition, so long runs do not drift.
pub fn interval_ticks(context: &str, min: f64, max: f64, interval: f64) -> WidgetResult<Vec<f64>> {
    if !(min < max) {
        return Err(WidgetError::invalid_range(context, min, max));
    }
    if !(interval > 0.0) {
        return Err(WidgetError::invalid_dimensions(
            context,
            format!("tick interval must be positive, got {interval}"),
        ));
    }
    let first_index = (min / interval - TICK_EPSILON).ceil();
    let last_index = (max / interval + TICK_EPSILON).floor();
    let steps = last_index - first_index;
    if !(steps < theme::MAX_TICKS as f64) {
        return Err(WidgetError::invalid_dimensions(
            context,
            format!(
                "tick interval {interval} over [{min}, {max}] gives more than {} ticks",
                theme::MAX_TICKS
            ),
        ));
    }
    let first = first_index * interval;
    let count = steps as usize + 1;
    // `+ 0.0` turns -0.0 into 0.0
    Ok((0..count).map(|i| first + i as f64 * interval + 0.0).collect())
}

/// Explicit tick values, used verbatim after a range check.
pub fn explicit_ticks(context: &str, min: f64, max: f64, values: &[f64]) -> WidgetResult<Vec<f64>> {
    if !(min < max) {
        return Err(WidgetError::invalid_range(context, min, max));
    }
    if values.len() > theme::MAX_TICKS {
        return Err(WidgetError::invalid_dimensions(
            context,
            format!("more than {} tick values", theme::MAX_TICKS),
        ));
    }
    for v in values {
        if *v < min || *v > max {
            return Err(WidgetError::invalid_range(
                format!("{context} tick {v}"),
                min,
                max,
            ));
        }
    }
    Ok(values.to_vec())
}

/// How tick values are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TickFormat {
    Plain,
    Integer,
    OneDecimal,
    Percent,
    Hidden,
}

impl TickFormat {
    pub fn schema() -> Schema {
        enumeration(&["plain", "integer", "oneDecimal", "percent", "hidden"])
    }

    /// Label for `value`, or `None` when labels are hidden.
    pub fn label(self, value: f64) -> Option<String> {
        match self {
            TickFormat::Plain => Some(fmt_num(value)),
            TickFormat::Integer => Some(format!("{}", value.round() + 0.0)),
            TickFormat::OneDecimal => Some(format!("{:.1}", (value * 10.0).round() / 10.0 + 0.0)),
            TickFormat::Percent => Some(format!("{}%", fmt_num(value))),
            TickFormat::Hidden => None,
        }
    }
}
