//! SVG element construction and serialization helpers

use std::fmt::Write as _;

/// A single SVG element with attributes in insertion order.
///
/// Attribute order is preserved so that output is byte-stable.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    content: Option<String>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            content: None,
        }
    }

    /// Add a string attribute. The value is escaped on output.
    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    /// Add a numeric attribute formatted with [`fmt_num`].
    pub fn num(self, key: &'static str, value: f64) -> Self {
        self.attr(key, fmt_num(value))
    }

    /// Add an attribute only when `value` is present.
    pub fn attr_opt(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.attr(key, v),
            None => self,
        }
    }

    /// Set escaped text content.
    pub fn text(mut self, content: &str) -> Self {
        self.content = Some(escape(content));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Write only the opening tag, for containers closed by the caller.
    pub fn write_open_to(&self, out: &mut String) {
        self.write_attrs_to(out);
        out.push('>');
    }

    fn write_attrs_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (key, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", key, escape(value));
        }
    }

    pub fn write_to(&self, out: &mut String) {
        self.write_attrs_to(out);
        match &self.content {
            Some(content) => {
                out.push('>');
                out.push_str(content);
                let _ = write!(out, "</{}>", self.name);
            }
            None => out.push_str("/>"),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

/// Build a `points` attribute value from pixel coordinates.
pub fn points_attr(points: &[(f64, f64)]) -> String {
    let mut out = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", fmt_num(*x), fmt_num(*y));
    }
    out
}

/// Escape text for use in XML/HTML content and attribute values.
///
/// Caller strings are untrusted, so entities are never passed through.
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    // Round to specified significant figures
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        return "0".to_string();
    }

    // Format with enough decimal places, then trim
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if s.contains('.') {
        let s = s.trim_end_matches('0');
        s.trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(74.0), "74");
        assert_eq!(fmt_num(0.1 * 3.0), "0.3");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(123.456789), "123.457");
        assert_eq!(fmt_num(-2.5), "-2.5");
        assert_eq!(fmt_num(1500.0), "1500");
    }

    #[test]
    fn elements_escape_values() {
        let el = Element::new("text")
            .num("x", 10.0)
            .attr("fill", "red\"><script>")
            .text("a < b & c");
        assert_eq!(
            el.render(),
            "<text x=\"10\" fill=\"red&quot;&gt;&lt;script&gt;\">a &lt; b &amp; c</text>"
        );
    }

    #[test]
    fn empty_elements_self_close() {
        let el = Element::new("circle").num("cx", 1.0).num("cy", 2.0).num("r", 3.0);
        assert_eq!(el.render(), "<circle cx=\"1\" cy=\"2\" r=\"3\"/>");
    }

    #[test]
    fn points_are_space_separated() {
        assert_eq!(points_attr(&[(0.0, 1.5), (2.0, 3.0)]), "0,1.5 2,3");
    }
}
