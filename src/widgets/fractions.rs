//! Fraction comparison diagrams.
//!
//! The comparison operator is drawn exactly as supplied; the fractions are
//! never compared against it.

use glam::dvec2;
use serde::Deserialize;

use super::{ComparisonOperator, Fraction, check_proper, color, fraction_fields};
use crate::errors::{FieldIssue, FieldPath, WidgetError, WidgetResult};
use crate::registry::{Describe, Generate};
use crate::render::geometry::pie_slice_path;
use crate::render::{Anchor, Canvas, Layer, Stroke, TextStyle, theme};
use crate::schema::{Schema, array, canvas_extent, enumeration, object, string};

fn outline() -> Stroke<'static> {
    Stroke::solid(theme::OUTLINE_COLOR, 1.0)
}

/// Circle cut into `denominator` equal slices, the first `numerator` filled.
fn draw_pie(canvas: &mut Canvas, (cx, cy): (f64, f64), r: f64, f: Fraction, fill: &str) {
    let stroke = outline();
    if f.denominator <= 1 {
        let fill = if f.numerator >= 1 { fill } else { theme::EMPTY_FILL };
        canvas.circle(Layer::Shapes, (cx, cy), r, fill, Some(&stroke));
        return;
    }
    let d = f64::from(f.denominator);
    for i in 0..f.denominator {
        let fill = if i < f.numerator { fill } else { theme::EMPTY_FILL };
        let path = pie_slice_path(dvec2(cx, cy), r, f64::from(i) / d, f64::from(i + 1) / d);
        canvas.guard(&[cx, cy, r]);
        canvas.path(Layer::Shapes, path, fill, Some(&stroke));
    }
}

/// Rectangle split into `denominator` equal columns, the first `numerator` filled.
fn draw_tape(
    canvas: &mut Canvas,
    (x, y, w, h): (f64, f64, f64, f64),
    f: Fraction,
    fill: &str,
) {
    let stroke = outline();
    let part = w / f64::from(f.denominator.max(1));
    for i in 0..f.denominator {
        let fill = if i < f.numerator { fill } else { theme::EMPTY_FILL };
        canvas.rect(
            Layer::Shapes,
            (x + f64::from(i) * part, y, part, h),
            fill,
            Some(&stroke),
        );
    }
}

fn draw_operator(canvas: &mut Canvas, (x, y): (f64, f64), op: ComparisonOperator) {
    let style = TextStyle::label().size(theme::OPERATOR_FONT_SIZE).bold();
    canvas.text(
        Layer::Labels,
        (x, y + theme::OPERATOR_FONT_SIZE / 3.0),
        op.symbol(),
        &style,
    );
}

fn fraction_text(f: Fraction) -> String {
    format!("{}/{}", f.numerator, f.denominator)
}

fn no_room(context: &str, width: f64, height: f64) -> WidgetError {
    WidgetError::invalid_dimensions(
        context,
        format!("canvas {width}x{height} is too small for the figures"),
    )
}

/// A fraction with its fill color
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilledFraction {
    #[serde(deserialize_with = "crate::schema::integral")]
    pub numerator: u32,
    #[serde(deserialize_with = "crate::schema::integral")]
    pub denominator: u32,
    pub fill_color: String,
}

impl FilledFraction {
    fn schema() -> Schema {
        let [(n, ns), (d, ds)] = fraction_fields();
        object()
            .field(n, ns)
            .field(d, ds)
            .field("fillColor", color())
            .into()
    }

    fn fraction(&self) -> Fraction {
        Fraction {
            numerator: self.numerator,
            denominator: self.denominator,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CirclePieceComparisonDiagramProps {
    pub width: f64,
    pub height: f64,
    pub left: FilledFraction,
    pub right: FilledFraction,
    pub operator: ComparisonOperator,
}

impl Describe for CirclePieceComparisonDiagramProps {
    fn schema() -> Schema {
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("left", FilledFraction::schema())
            .field("right", FilledFraction::schema())
            .field("operator", ComparisonOperator::schema())
            .into()
    }
}

impl Generate for CirclePieceComparisonDiagramProps {
    fn check_references(&self, issues: &mut Vec<FieldIssue>) {
        let root = FieldPath::root();
        check_proper(root.key("left"), self.left.numerator, self.left.denominator, issues);
        check_proper(root.key("right"), self.right.numerator, self.right.denominator, issues);
    }

    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "circlePieceComparisonDiagram";
        let pad = theme::DIAGRAM_PADDING;
        let r = ((self.width - 2.0 * pad - theme::OPERATOR_GAP) / 4.0)
            .min((self.height - 2.0 * pad) / 2.0);
        if !(r > 0.0) {
            return Err(no_room(CONTEXT, self.width, self.height));
        }
        let cy = self.height / 2.0;
        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        draw_pie(
            &mut canvas,
            (pad + r, cy),
            r,
            self.left.fraction(),
            &self.left.fill_color,
        );
        draw_pie(
            &mut canvas,
            (self.width - pad - r, cy),
            r,
            self.right.fraction(),
            &self.right.fill_color,
        );
        draw_operator(&mut canvas, (self.width / 2.0, cy), self.operator);
        canvas.finish()
    }
}

/// A fraction with fill color and a label drawn left of its tape
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabeledTape {
    #[serde(deserialize_with = "crate::schema::integral")]
    pub numerator: u32,
    #[serde(deserialize_with = "crate::schema::integral")]
    pub denominator: u32,
    pub fill_color: String,
    pub label: String,
}

impl LabeledTape {
    fn schema() -> Schema {
        let [(n, ns), (d, ds)] = fraction_fields();
        object()
            .field(n, ns)
            .field(d, ds)
            .field("fillColor", color())
            .field("label", string())
            .into()
    }

    fn fraction(&self) -> Fraction {
        Fraction {
            numerator: self.numerator,
            denominator: self.denominator,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FractionTapeDiagramProps {
    pub width: f64,
    pub height: f64,
    pub top: LabeledTape,
    pub bottom: LabeledTape,
    pub operator: ComparisonOperator,
}

impl Describe for FractionTapeDiagramProps {
    fn schema() -> Schema {
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("top", LabeledTape::schema())
            .field("bottom", LabeledTape::schema())
            .field("operator", ComparisonOperator::schema())
            .into()
    }
}

const TAPE_LABEL_WIDTH: f64 = 60.0;
const TAPE_GAP: f64 = 40.0;

impl Generate for FractionTapeDiagramProps {
    fn check_references(&self, issues: &mut Vec<FieldIssue>) {
        let root = FieldPath::root();
        check_proper(root.key("top"), self.top.numerator, self.top.denominator, issues);
        check_proper(root.key("bottom"), self.bottom.numerator, self.bottom.denominator, issues);
    }

    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "fractionTapeDiagram";
        let pad = theme::DIAGRAM_PADDING;
        let x = pad + TAPE_LABEL_WIDTH;
        let w = self.width - x - pad;
        let h = (self.height - 2.0 * pad - TAPE_GAP) / 2.0;
        if !(w > 0.0 && h > 0.0) {
            return Err(no_room(CONTEXT, self.width, self.height));
        }
        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        let label_style = TextStyle::label()
            .size(theme::LABEL_FONT_SIZE)
            .anchor(Anchor::End);
        for (tape, y) in [(&self.top, pad), (&self.bottom, pad + h + TAPE_GAP)] {
            draw_tape(&mut canvas, (x, y, w, h), tape.fraction(), &tape.fill_color);
            canvas.text(
                Layer::Labels,
                (x - 8.0, y + h / 2.0 + 5.0),
                &tape.label,
                &label_style,
            );
        }
        draw_operator(
            &mut canvas,
            (x + w / 2.0, pad + h + TAPE_GAP / 2.0),
            self.operator,
        );
        canvas.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelShape {
    Circle,
    Rectangle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EquivalentFractionModelProps {
    pub width: f64,
    pub height: f64,
    pub shape: ModelShape,
    pub fractions: Vec<Fraction>,
    pub fill_color: String,
    pub operator: ComparisonOperator,
}

impl Describe for EquivalentFractionModelProps {
    fn schema() -> Schema {
        object()
            .field("width", canvas_extent())
            .field("height", canvas_extent())
            .field("shape", enumeration(&["circle", "rectangle"]))
            .field("fractions", array(Fraction::schema()).min_items(2).max_items(4))
            .field("fillColor", color())
            .field("operator", ComparisonOperator::schema())
            .into()
    }
}

const CAPTION_BAND: f64 = 24.0;

impl Generate for EquivalentFractionModelProps {
    fn check_references(&self, issues: &mut Vec<FieldIssue>) {
        let root = FieldPath::root().key("fractions");
        for (i, f) in self.fractions.iter().enumerate() {
            check_proper(root.index(i), f.numerator, f.denominator, issues);
        }
    }

    fn generate(&self) -> WidgetResult<String> {
        const CONTEXT: &str = "equivalentFractionModel";
        let n = self.fractions.len();
        if n == 0 {
            return Err(WidgetError::invalid_dimensions(CONTEXT, "no fractions to draw"));
        }
        let pad = theme::DIAGRAM_PADDING;
        let gaps = (n - 1) as f64 * theme::OPERATOR_GAP;
        let cell = (self.width - 2.0 * pad - gaps) / n as f64;
        let figure_h = self.height - 2.0 * pad - CAPTION_BAND;
        if !(cell > 0.0 && figure_h > 0.0) {
            return Err(no_room(CONTEXT, self.width, self.height));
        }

        let mut canvas = Canvas::new(CONTEXT, self.width, self.height);
        let cy = pad + figure_h / 2.0;
        let caption = TextStyle::label().size(theme::LABEL_FONT_SIZE);
        for (i, f) in self.fractions.iter().enumerate() {
            let left = pad + i as f64 * (cell + theme::OPERATOR_GAP);
            let cx = left + cell / 2.0;
            match self.shape {
                ModelShape::Circle => {
                    let r = cell.min(figure_h) / 2.0;
                    draw_pie(&mut canvas, (cx, cy), r, *f, &self.fill_color);
                }
                ModelShape::Rectangle => {
                    draw_tape(&mut canvas, (left, pad, cell, figure_h), *f, &self.fill_color);
                }
            }
            canvas.text(
                Layer::Labels,
                (cx, pad + figure_h + CAPTION_BAND - 6.0),
                &fraction_text(*f),
                &caption,
            );
            if i + 1 < n {
                draw_operator(
                    &mut canvas,
                    (left + cell + theme::OPERATOR_GAP / 2.0, cy),
                    self.operator,
                );
            }
        }
        canvas.finish()
    }
}
