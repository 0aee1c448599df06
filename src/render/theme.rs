//! Process-wide style tokens (all in pixels).
//!
//! These values are part of the output contract: snapshot fixtures depend on
//! them byte-for-byte.

use crate::types::Padding;

pub const FONT_FAMILY: &str = "sans-serif";
pub const FONT_SIZE: f64 = 12.0;
pub const LABEL_FONT_SIZE: f64 = 14.0;
pub const TITLE_FONT_SIZE: f64 = 16.0;
pub const OPERATOR_FONT_SIZE: f64 = 28.0;

/// Frozen text-width heuristic: estimated width is `chars * AVG_CHAR_WIDTH_PX`.
pub const AVG_CHAR_WIDTH_PX: f64 = 7.0;
pub const LINE_HEIGHT: f64 = 16.0;
pub const TITLE_LINE_HEIGHT: f64 = 20.0;
pub const TITLE_TOP_PADDING: f64 = 15.0;
/// Parenthetical titles longer than this are split onto two lines.
pub const PARENTHETICAL_SPLIT_CHARS: usize = 36;

pub const TEXT_COLOR: &str = "#333333";
pub const AXIS_COLOR: &str = "#000000";
pub const GRID_COLOR: &str = "#cccccc";
pub const OUTLINE_COLOR: &str = "#333333";
pub const EMPTY_FILL: &str = "#ffffff";

pub const AXIS_STROKE_WIDTH: f64 = 1.5;
pub const GRID_STROKE_WIDTH: f64 = 1.0;
pub const SERIES_STROKE_WIDTH: f64 = 2.0;
pub const TICK_LENGTH: f64 = 5.0;
pub const POINT_RADIUS: f64 = 4.0;

/// Padding around the plot area of every axis chart.
pub const CHART_PADDING: Padding = Padding::new(20.0, 20.0, 50.0, 60.0);
/// Padding for charts with a single horizontal axis (dot and box plots).
pub const LINE_PLOT_PADDING: Padding = Padding::new(20.0, 20.0, 50.0, 20.0);
/// Horizontal inset of number lines from the canvas edges.
pub const NUMBER_LINE_PADDING: f64 = 20.0;
/// Inset of fraction and geometry diagrams from the canvas edges.
pub const DIAGRAM_PADDING: f64 = 10.0;

/// Gap between adjacent bars as a fraction of the band width.
pub const BAR_GAP_RATIO: f64 = 0.2;
/// Horizontal room reserved between two compared figures for the operator.
pub const OPERATOR_GAP: f64 = 50.0;

/// Upper bound on generated ticks per axis.
pub const MAX_TICKS: usize = 1000;
/// Largest magnitude accepted for any domain value.
pub const MAX_MAGNITUDE: f64 = 1.0e9;
/// Largest accepted canvas extent.
pub const MAX_CANVAS_PX: f64 = 4000.0;
pub const MAX_DENOMINATOR: u32 = 24;
