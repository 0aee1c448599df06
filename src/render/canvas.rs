//! Canvas - accumulates SVG elements for one widget
//!
//! A canvas is created by a generator, passed by `&mut` through the drawing
//! helpers, and consumed by [`Canvas::finish`]. Output order is fixed by
//! [`Layer`] first and draw-call order second, so a helper can never paint a
//! point underneath a distance marker regardless of when it is called.

use super::svg::{Element, fmt_num, points_attr};
use super::text::wrap_text;
use super::theme;
use crate::errors::{WidgetError, WidgetResult};
use crate::log::warn;
use crate::types::{NumericError, check_finite};

/// Paint layers, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Background,
    Grid,
    Axes,
    Distances,
    Shapes,
    Points,
    Labels,
}

impl Layer {
    pub const COUNT: usize = 7;
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub anchor: Anchor,
    pub bold: bool,
    pub fill: String,
}

impl TextStyle {
    /// Default label text
    pub fn label() -> Self {
        Self {
            size: theme::FONT_SIZE,
            anchor: Anchor::Middle,
            bold: false,
            fill: theme::TEXT_COLOR.to_string(),
        }
    }

    /// Bold chart title
    pub fn title() -> Self {
        Self {
            size: theme::TITLE_FONT_SIZE,
            bold: true,
            ..Self::label()
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn fill(mut self, color: &str) -> Self {
        self.fill = color.to_string();
        self
    }
}

/// Stroke properties for lines and outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    pub dash: Option<&'static str>,
}

impl<'a> Stroke<'a> {
    pub fn solid(color: &'a str, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: &'a str, width: f64, dash: &'static str) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }

    fn apply(&self, el: Element) -> Element {
        el.attr("stroke", self.color)
            .num("stroke-width", self.width)
            .attr_opt("stroke-dasharray", self.dash)
    }
}

/// Fragment accumulator for one widget
#[derive(Debug)]
pub struct Canvas {
    context: &'static str,
    width: f64,
    height: f64,
    layers: [Vec<Element>; Layer::COUNT],
    fault: Option<NumericError>,
}

impl Canvas {
    pub fn new(context: &'static str, width: f64, height: f64) -> Self {
        let mut canvas = Self {
            context,
            width,
            height,
            layers: Default::default(),
            fault: None,
        };
        canvas.guard(&[width, height]);
        canvas
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Remember the first non-finite coordinate; reported by `finish`.
    pub(crate) fn guard(&mut self, values: &[f64]) {
        if self.fault.is_some() {
            return;
        }
        for v in values {
            if let Err(e) = check_finite(*v) {
                warn!(context = self.context, "non-finite coordinate: {}", e);
                self.fault = Some(e);
                return;
            }
        }
    }

    /// Append a prepared element to `layer`.
    pub fn push(&mut self, layer: Layer, element: Element) {
        self.layers[layer as usize].push(element);
    }

    pub fn line(&mut self, layer: Layer, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke) {
        self.guard(&[x1, y1, x2, y2]);
        let el = Element::new("line")
            .num("x1", x1)
            .num("y1", y1)
            .num("x2", x2)
            .num("y2", y2);
        self.push(layer, stroke.apply(el));
    }

    pub fn rect(
        &mut self,
        layer: Layer,
        (x, y, w, h): (f64, f64, f64, f64),
        fill: &str,
        stroke: Option<&Stroke>,
    ) {
        self.guard(&[x, y, w, h]);
        let el = Element::new("rect")
            .num("x", x)
            .num("y", y)
            .num("width", w)
            .num("height", h)
            .attr("fill", fill);
        let el = match stroke {
            Some(s) => s.apply(el),
            None => el,
        };
        self.push(layer, el);
    }

    pub fn circle(
        &mut self,
        layer: Layer,
        (cx, cy): (f64, f64),
        r: f64,
        fill: &str,
        stroke: Option<&Stroke>,
    ) {
        self.guard(&[cx, cy, r]);
        let el = Element::new("circle")
            .num("cx", cx)
            .num("cy", cy)
            .num("r", r)
            .attr("fill", fill);
        let el = match stroke {
            Some(s) => s.apply(el),
            None => el,
        };
        self.push(layer, el);
    }

    pub fn polygon(
        &mut self,
        layer: Layer,
        points: &[(f64, f64)],
        fill: &str,
        stroke: Option<&Stroke>,
    ) {
        self.guard_points(points);
        let el = Element::new("polygon")
            .attr("points", points_attr(points))
            .attr("fill", fill);
        let el = match stroke {
            Some(s) => s.apply(el),
            None => el,
        };
        self.push(layer, el);
    }

    pub fn polyline(&mut self, layer: Layer, points: &[(f64, f64)], stroke: &Stroke) {
        self.guard_points(points);
        let el = Element::new("polyline")
            .attr("points", points_attr(points))
            .attr("fill", "none");
        self.push(layer, stroke.apply(el));
    }

    /// Append a `<path>`; `d` must already be formatted with [`fmt_num`].
    pub fn path(&mut self, layer: Layer, d: String, fill: &str, stroke: Option<&Stroke>) {
        let el = Element::new("path").attr("d", d).attr("fill", fill);
        let el = match stroke {
            Some(s) => s.apply(el),
            None => el,
        };
        self.push(layer, el);
    }

    /// Draw one line of text. Empty strings draw nothing.
    pub fn text(&mut self, layer: Layer, (x, y): (f64, f64), content: &str, style: &TextStyle) {
        if content.is_empty() {
            return;
        }
        self.guard(&[x, y]);
        let mut el = Element::new("text")
            .num("x", x)
            .num("y", y)
            .num("font-size", style.size)
            .attr("fill", style.fill.as_str())
            .attr("text-anchor", style.anchor.as_str());
        if style.bold {
            el = el.attr("font-weight", "bold");
        }
        self.push(layer, el.text(content));
    }

    /// Draw text wrapped to at most two lines; returns the number of lines drawn.
    pub fn wrapped_text(
        &mut self,
        layer: Layer,
        (x, y): (f64, f64),
        content: &str,
        max_width: f64,
        line_height: f64,
        style: &TextStyle,
    ) -> usize {
        let lines = wrap_text(content, max_width);
        for (i, line) in lines.iter().enumerate() {
            self.text(layer, (x, y + i as f64 * line_height), line, style);
        }
        lines.len()
    }

    /// Draw text rotated by `degrees` about its anchor point.
    pub fn rotated_text(
        &mut self,
        layer: Layer,
        (x, y): (f64, f64),
        degrees: f64,
        content: &str,
        style: &TextStyle,
    ) {
        if content.is_empty() {
            return;
        }
        self.guard(&[x, y, degrees]);
        let el = Element::new("text")
            .num("x", x)
            .num("y", y)
            .num("font-size", style.size)
            .attr("fill", style.fill.as_str())
            .attr("text-anchor", style.anchor.as_str())
            .attr(
                "transform",
                format!("rotate({} {} {})", fmt_num(degrees), fmt_num(x), fmt_num(y)),
            );
        self.push(layer, el.text(content));
    }

    fn guard_points(&mut self, points: &[(f64, f64)]) {
        for (x, y) in points {
            self.guard(&[*x, *y]);
        }
    }

    /// Number of elements drawn so far
    pub fn len(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the canvas and serialize it as one `<svg>` fragment.
    pub fn finish(self) -> WidgetResult<String> {
        if let Some(source) = self.fault {
            return Err(WidgetError::Internal {
                context: self.context.to_string(),
                source,
            });
        }
        let mut out = String::new();
        Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .num("width", self.width)
            .num("height", self.height)
            .attr(
                "viewBox",
                format!("0 0 {} {}", fmt_num(self.width), fmt_num(self.height)),
            )
            .attr("font-family", theme::FONT_FAMILY)
            .write_open_to(&mut out);
        for layer in &self.layers {
            for el in layer {
                el.write_to(&mut out);
            }
        }
        out.push_str("</svg>");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_order_output_regardless_of_call_order() {
        let mut canvas = Canvas::new("test", 100.0, 100.0);
        canvas.text(Layer::Labels, (1.0, 1.0), "A", &TextStyle::label());
        canvas.circle(Layer::Points, (5.0, 5.0), 2.0, "red", None);
        canvas.line(Layer::Distances, 0.0, 0.0, 9.0, 9.0, &Stroke::solid("blue", 1.0));
        let svg = canvas.finish().unwrap();
        let line = svg.find("<line").unwrap();
        let circle = svg.find("<circle").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(line < circle && circle < text);
    }

    #[test]
    fn same_layer_keeps_call_order() {
        let mut canvas = Canvas::new("test", 100.0, 100.0);
        canvas.rect(Layer::Shapes, (0.0, 0.0, 1.0, 1.0), "red", None);
        canvas.rect(Layer::Shapes, (0.0, 0.0, 1.0, 1.0), "blue", None);
        let svg = canvas.finish().unwrap();
        assert!(svg.find("red").unwrap() < svg.find("blue").unwrap());
    }

    #[test]
    fn non_finite_coordinates_fail_at_finish() {
        let mut canvas = Canvas::new("test", 100.0, 100.0);
        canvas.circle(Layer::Points, (f64::NAN, 5.0), 2.0, "red", None);
        let err = canvas.finish().unwrap_err();
        assert_eq!(err.kind(), "GeneratorInternalError");
    }

    #[test]
    fn svg_root_carries_size_and_font() {
        let svg = Canvas::new("test", 400.0, 300.0).finish().unwrap();
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"400\" height=\"300\" viewBox=\"0 0 400 300\" font-family=\"sans-serif\"></svg>"
        );
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut canvas = Canvas::new("test", 10.0, 10.0);
        canvas.text(Layer::Labels, (1.0, 1.0), "", &TextStyle::label());
        assert!(canvas.is_empty());
    }
}
