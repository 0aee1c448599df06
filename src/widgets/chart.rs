//! Title band and frame layout shared by the axis charts

use crate::errors::{WidgetError, WidgetResult};
use crate::plane::AxisSpec;
use crate::render::{Canvas, Layer, Stroke, TextStyle, text, theme};
use crate::types::{Frame, Padding};

/// Width available to a title on a `width`-pixel canvas.
fn title_width(width: f64) -> f64 {
    width - theme::CHART_PADDING.left / 2.0 - theme::CHART_PADDING.right
}

/// Plot frame below the title band.
///
/// Axis ranges are checked before the canvas size, so a degenerate range is
/// reported as such even on a canvas too small to plot on.
pub(crate) fn frame(
    context: &str,
    width: f64,
    height: f64,
    title: &str,
    padding: Padding,
    axes: &[(&str, &AxisSpec)],
) -> WidgetResult<Frame> {
    for (name, axis) in axes {
        axis.check_range(&format!("{context} {name}"))?;
    }
    let band = text::title_band_height(title, title_width(width));
    crate::log::debug!(context, band, "title band");
    Frame::inset(context, width, height, padding, band)
}

/// Title lines centred in the band reserved by [`frame`].
pub(crate) fn draw_title(canvas: &mut Canvas, title: &str) {
    let width = canvas.width();
    let baseline = theme::TITLE_TOP_PADDING + theme::TITLE_LINE_HEIGHT - 5.0;
    canvas.wrapped_text(
        Layer::Labels,
        (width / 2.0, baseline),
        title,
        title_width(width),
        theme::TITLE_LINE_HEIGHT,
        &TextStyle::title(),
    );
}

/// Fails with `InvalidDimensions` when a chart has nothing to plot.
pub(crate) fn require_data(context: &str, field: &str, len: usize) -> WidgetResult<()> {
    if len == 0 {
        return Err(WidgetError::invalid_dimensions(
            context,
            format!("`{field}` must contain at least one entry"),
        ));
    }
    Ok(())
}

/// Baseline and centred label for a categorical x axis.
pub(crate) fn draw_category_axis(canvas: &mut Canvas, frame: &Frame, label: &str) {
    let stroke = Stroke::solid(theme::AXIS_COLOR, theme::AXIS_STROKE_WIDTH);
    canvas.line(
        Layer::Axes,
        frame.left,
        frame.bottom(),
        frame.right(),
        frame.bottom(),
        &stroke,
    );
    canvas.text(
        Layer::Labels,
        (frame.center_x(), frame.bottom() + 40.0),
        label,
        &TextStyle::label().size(theme::LABEL_FONT_SIZE),
    );
}

/// Label under the centre of category slot `x`.
pub(crate) fn draw_category_label(canvas: &mut Canvas, frame: &Frame, x: f64, label: &str) {
    canvas.text(
        Layer::Labels,
        (x, frame.bottom() + theme::TICK_LENGTH + theme::FONT_SIZE + 2.0),
        label,
        &TextStyle::label(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_pushes_frame_down() {
        let plain = frame("t", 400.0, 300.0, "", theme::CHART_PADDING, &[]).unwrap();
        let titled = frame("t", 400.0, 300.0, "Rainfall", theme::CHART_PADDING, &[]).unwrap();
        assert_eq!(plain.top, 20.0);
        assert_eq!(titled.top, 20.0 + 35.0);
        assert_eq!(titled.bottom(), plain.bottom());
    }

    #[test]
    fn empty_data_is_invalid_dimensions() {
        assert_eq!(
            require_data("barChart", "data", 0).unwrap_err().kind(),
            "ErrInvalidDimensions"
        );
        assert!(require_data("barChart", "data", 1).is_ok());
    }
}
