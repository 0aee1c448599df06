//! Pixel-space primitives shared by every generator.
//!
//! Generators work in two spaces: domain coordinates (axis values supplied by
//! the caller) and pixels. Everything in this module is pixels.

use std::fmt;

use crate::errors::{WidgetError, WidgetResult};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN/infinite values before they reach the output.
#[inline]
pub fn check_finite(value: f64) -> Result<f64, NumericError> {
    if value.is_nan() {
        Err(NumericError::NaN)
    } else if value.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(value)
    }
}

/// Fixed padding around a plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Pixel rectangle reserved for plottable content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Frame inside a `width` x `height` canvas after padding and a reserved
    /// band of `title_band` pixels above the top padding.
    pub fn inset(
        context: &str,
        width: f64,
        height: f64,
        padding: Padding,
        title_band: f64,
    ) -> WidgetResult<Frame> {
        let frame = Frame {
            left: padding.left,
            top: title_band + padding.top,
            width: width - padding.left - padding.right,
            height: height - title_band - padding.top - padding.bottom,
        };
        crate::log::debug!(
            context,
            left = frame.left,
            top = frame.top,
            width = frame.width,
            height = frame.height,
            "frame"
        );
        if !(frame.width > 0.0 && frame.height > 0.0) {
            return Err(WidgetError::invalid_dimensions(
                context,
                format!(
                    "canvas {width}x{height} leaves no room for a plot area (frame {}x{})",
                    frame.width, frame.height
                ),
            ));
        }
        Ok(frame)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}
