//! Affine domain-to-pixel scales

use crate::errors::{WidgetError, WidgetResult};

/// Fails with `InvalidRange` unless `min < max`.
pub fn check_range(context: &str, min: f64, max: f64) -> WidgetResult<()> {
    if !(min < max) {
        return Err(WidgetError::invalid_range(context, min, max));
    }
    Ok(())
}

/// Monotonic map from `[min, max]` onto `[start, end]` pixels.
///
/// `end` may be smaller than `start`; vertical axes use that to put larger
/// values higher on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    min: f64,
    max: f64,
    start: f64,
    end: f64,
}

impl LinearScale {
    /// Fails with `InvalidRange` unless `min < max`.
    pub fn new(context: &str, min: f64, max: f64, start: f64, end: f64) -> WidgetResult<Self> {
        check_range(context, min, max)?;
        Ok(Self {
            min,
            max,
            start,
            end,
        })
    }

    pub fn map(&self, value: f64) -> f64 {
        self.start + (value - self.min) / (self.max - self.min) * (self.end - self.start)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Inclusive range check
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Fails with `InvalidRange` when `value` lies outside the domain.
    pub fn require(&self, context: &str, value: f64) -> WidgetResult<f64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(WidgetError::invalid_range(
                format!("{context} value {value}"),
                self.min,
                self.max,
            ))
        }
    }
}
