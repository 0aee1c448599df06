//! Periodic table reference image.
//!
//! The image is compiled into the crate and inlined as a data URI, so
//! rendering never touches the filesystem or network.

use base64::Engine;
use serde::Deserialize;

use crate::errors::{WidgetError, WidgetResult};
use crate::registry::{Describe, Generate};
use crate::render::Element;
use crate::schema::{Schema, canvas_extent, object, string};

static PERIODIC_TABLE_SVG: &[u8] = include_bytes!("../../assets/periodic-table.svg");

const ALT_TEXT: &str = "Periodic table of the elements";

fn data_uri(svg: &[u8]) -> String {
    let mut uri = String::from("data:image/svg+xml;base64,");
    base64::engine::general_purpose::STANDARD.encode_string(svg, &mut uri);
    uri
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PeriodicTableProps {
    pub width: f64,
    pub height: f64,
    pub caption: Option<String>,
}

impl Describe for PeriodicTableProps {
    fn schema() -> Schema {
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("caption", string().nullable())
            .into()
    }
}

impl Generate for PeriodicTableProps {
    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "periodicTable";
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(WidgetError::invalid_dimensions(
                CONTEXT,
                format!("image size {}x{} must be positive", self.width, self.height),
            ));
        }
        let mut out = String::new();
        Element::new("figure").write_open_to(&mut out);
        Element::new("img")
            .attr("src", data_uri(PERIODIC_TABLE_SVG))
            .attr("alt", ALT_TEXT)
            .num("width", self.width)
            .num("height", self.height)
            .write_to(&mut out);
        if let Some(caption) = &self.caption {
            Element::new("figcaption").text(caption).write_to(&mut out);
        }
        out.push_str("</figure>");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_is_inlined_as_base64() {
        let props = PeriodicTableProps {
            width: 600.0,
            height: 350.0,
            caption: Some("Figure 1 & key".into()),
        };
        let html = props.generate().unwrap();
        assert!(html.starts_with("<figure><img src=\"data:image/svg+xml;base64,PHN2Zy"));
        assert!(html.contains("width=\"600\" height=\"350\"/>"));
        assert!(html.ends_with("<figcaption>Figure 1 &amp; key</figcaption></figure>"));
    }

    #[test]
    fn caption_is_omitted_when_null() {
        let props = PeriodicTableProps {
            width: 600.0,
            height: 350.0,
            caption: None,
        };
        let html = props.generate().unwrap();
        assert!(!html.contains("figcaption"));
    }

    #[test]
    fn zero_size_is_invalid_dimensions() {
        let props = PeriodicTableProps {
            width: 0.0,
            height: 350.0,
            caption: None,
        };
        assert_eq!(props.generate().unwrap_err().kind(), "ErrInvalidDimensions");
    }
}
