use serde::{Deserialize, Serialize};
use zpl_label_diagnostics::Span;

use crate::symbology::Symbology;

/// Label width used when a document has no `^PW`.
pub const DEFAULT_WIDTH_DOTS: u32 = 600;
/// Label length used when a document has no `^LL`.
pub const DEFAULT_HEIGHT_DOTS: u32 = 400;

/// Print orientation declared by `^PON` / `^POI`.
///
/// Advisory only: the previewer does not rotate the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// `^PON`.
    #[default]
    Normal,
    /// `^POI` (printed upside down).
    Rotated,
}

/// Document-level setup of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDocument {
    /// Label width in dots (`^PW`), always positive.
    pub width_dots: u32,
    /// Label length in dots (`^LL`), always positive.
    pub height_dots: u32,
    /// Declared print orientation.
    pub orientation: Orientation,
}

impl Default for LabelDocument {
    fn default() -> Self {
        Self {
            width_dots: DEFAULT_WIDTH_DOTS,
            height_dots: DEFAULT_HEIGHT_DOTS,
            orientation: Orientation::Normal,
        }
    }
}

/// A position in document dot-space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: u32,
    /// Vertical offset from the top edge.
    pub y: u32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Font selected by `^A<font>,<width>,<height>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font name and any orientation suffix, e.g. `"0N"`.
    pub family: String,
    /// First numeric argument.
    pub width: u32,
    /// Second numeric argument; drives the rendered glyph size.
    pub height: u32,
}

/// A drawable field, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[non_exhaustive]
pub enum DrawCommand {
    /// A text field (`^FD...^FS`).
    Text {
        /// Field origin inherited from the latest `^FO`.
        origin: Point,
        /// Literal field data.
        text: String,
        /// Font in effect when the field was read, if any `^A` was seen.
        #[serde(skip_serializing_if = "Option::is_none")]
        font: Option<FontSpec>,
        /// Source span of the logical line holding the field.
        span: Span,
    },
    /// A graphic box (`^GB<w>,<h>,<t>^FS`).
    Box {
        /// Field origin inherited from the latest `^FO`.
        origin: Point,
        /// Box width in dots.
        width: u32,
        /// Box height in dots.
        height: u32,
        /// Border thickness in dots.
        thickness: u32,
        /// Source span of the logical line holding the field.
        span: Span,
    },
    /// A barcode field (`^B3`, `^BC`, `^BE` or `^BQ` followed by `^FD...^FS`).
    Barcode {
        /// Field origin inherited from the latest `^FO`.
        origin: Point,
        /// Symbology selected by the barcode directive.
        symbology: Symbology,
        /// Data to encode (QR mode prefix removed).
        data: String,
        /// Source span of the logical line holding the field.
        span: Span,
    },
}

impl DrawCommand {
    /// Field origin in dot-space.
    pub fn origin(&self) -> Point {
        match self {
            DrawCommand::Text { origin, .. }
            | DrawCommand::Box { origin, .. }
            | DrawCommand::Barcode { origin, .. } => *origin,
        }
    }

    /// Source span of the command.
    pub fn span(&self) -> Span {
        match self {
            DrawCommand::Text { span, .. }
            | DrawCommand::Box { span, .. }
            | DrawCommand::Barcode { span, .. } => *span,
        }
    }
}
