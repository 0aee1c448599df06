//! Rendering substrate shared by every widget
//!
//! This module is organized into submodules:
//! - `theme`: Style tokens (fonts, colors, paddings, limits)
//! - `svg`: Element builder, escaping and number formatting
//! - `canvas`: Layered fragment accumulator for one widget
//! - `text`: Text-width heuristic, wrapping, title bands
//! - `geometry`: Arcs, pie slices, clipping

pub mod canvas;
pub mod geometry;
pub mod svg;
pub mod text;
pub mod theme;

// Re-export commonly used items
pub use canvas::{Anchor, Canvas, Layer, Stroke, TextStyle};
pub use svg::{Element, escape, fmt_num};
pub use text::{estimate_text_width, title_band_height, wrap_text};
