//! Placement of draw commands on an output canvas.
//!
//! This is where document dot-space and canvas pixel-space meet. One
//! [`ScaleContext`] is computed per call and every position and size goes
//! through it, so all elements of a label stay mutually consistent.
//!
//! Font sizes are heuristics, not font metrics: text is stamped with a
//! fixed-width bitmap font whose magnification approximates the requested
//! pixel size.

mod bars;

use serde::Serialize;

use crate::grammar::ast::{DrawCommand, FontSpec, LabelDocument, Point};
use crate::raster::font::{CELL_HEIGHT, CELL_WIDTH, text_width};
use crate::symbology::{Symbol, Symbology, encode};

// ─── Placed primitives ──────────────────────────────────────────────────────

/// An axis-aligned rectangle in canvas pixels; both corners are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x0: i32,
    /// Top edge.
    pub y0: i32,
    /// Right edge (inclusive).
    pub x1: i32,
    /// Bottom edge (inclusive).
    pub y1: i32,
}

impl Rect {
    /// Build a rectangle from two opposite corners, in any order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Width in pixels, counting both edges.
    pub fn width(&self) -> u32 {
        self.x0.abs_diff(self.x1) + 1
    }

    /// Height in pixels, counting both edges.
    pub fn height(&self) -> u32 {
        self.y0.abs_diff(self.y1) + 1
    }
}

/// A line of bitmap text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextStamp {
    /// Left edge of the first character cell.
    pub x: i32,
    /// Top edge of the character cells.
    pub y: i32,
    /// Characters to stamp.
    pub text: String,
    /// Integer scale applied to every glyph pixel.
    pub magnification: u32,
}

/// A drawing operation for the rasterizer, in canvas pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    /// Solid black rectangle.
    Fill(Rect),
    /// One-pixel black rectangle outline.
    Stroke(Rect),
    /// Bitmap text.
    Text(TextStamp),
}

// ─── Scale ──────────────────────────────────────────────────────────────────

/// Conversion factors from document dots to canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    /// Horizontal pixels per dot.
    pub scale_x: f64,
    /// Vertical pixels per dot.
    pub scale_y: f64,
}

impl ScaleContext {
    /// Scale that maps `doc` onto a `canvas_w` x `canvas_h` canvas.
    pub fn new(doc: &LabelDocument, canvas_w: u32, canvas_h: u32) -> Self {
        Self {
            scale_x: f64::from(canvas_w) / f64::from(doc.width_dots.max(1)),
            scale_y: f64::from(canvas_h) / f64::from(doc.height_dots.max(1)),
        }
    }

    /// The same factor on both axes.
    pub fn uniform(scale: f64) -> Self {
        Self {
            scale_x: scale,
            scale_y: scale,
        }
    }

    /// The smaller of the two factors; used for sizes that must not distort.
    pub fn min(&self) -> f64 {
        self.scale_x.min(self.scale_y)
    }

    /// Scale a horizontal distance, truncating toward zero.
    pub fn x(&self, dots: u32) -> i32 {
        truncate(f64::from(dots) * self.scale_x)
    }

    /// Scale a vertical distance, truncating toward zero.
    pub fn y(&self, dots: u32) -> i32 {
        truncate(f64::from(dots) * self.scale_y)
    }

    fn point(&self, p: Point) -> (i32, i32) {
        (self.x(p.x), self.y(p.y))
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn truncate(v: f64) -> i32 {
    // `as` saturates at the i32 bounds and maps NaN to 0.
    v as i32
}

// ─── Layout ─────────────────────────────────────────────────────────────────

/// Minimum text size with an explicit `^A` font.
const MIN_FONT_PX: u32 = 10;
/// Minimum text size without a font.
const MIN_DEFAULT_FONT_PX: u32 = 20;
/// Default text size at scale 1 without a font.
const DEFAULT_FONT_PX: f64 = 60.0;
/// Minimum size of a centered serial number.
const MIN_SERIAL_FONT_PX: u32 = 30;
/// Barcode area width as a share of the document width.
const BARCODE_WIDTH_SHARE: f64 = 0.8;
/// Barcode area height in dots before scaling.
const BARCODE_HEIGHT_DOTS: f64 = 40.0;
/// Gap between the barcode area and its caption.
const CAPTION_GAP: i32 = 5;

/// Place `commands` on a `canvas_w` x `canvas_h` canvas.
///
/// Primitives come out in command order; each command may produce several.
pub fn layout(
    doc: &LabelDocument,
    commands: &[DrawCommand],
    canvas_w: u32,
    canvas_h: u32,
) -> Vec<Primitive> {
    let placer = Placer {
        doc,
        scale: ScaleContext::new(doc, canvas_w, canvas_h),
        canvas_w,
        canvas_h,
    };
    let mut out = Vec::new();
    for command in commands {
        placer.place(command, &mut out);
    }
    out
}

struct Placer<'a> {
    doc: &'a LabelDocument,
    scale: ScaleContext,
    canvas_w: u32,
    canvas_h: u32,
}

impl Placer<'_> {
    fn place(&self, command: &DrawCommand, out: &mut Vec<Primitive>) {
        match command {
            DrawCommand::Text {
                origin, text, font, ..
            } => out.push(Primitive::Text(self.text(*origin, text, font.as_ref()))),
            DrawCommand::Box {
                origin,
                width,
                height,
                thickness,
                ..
            } => self.boxed(*origin, *width, *height, *thickness, out),
            DrawCommand::Barcode {
                origin,
                symbology,
                data,
                ..
            } => self.barcode(*origin, *symbology, data, out),
        }
    }

    fn text(&self, origin: Point, text: &str, font: Option<&FontSpec>) -> TextStamp {
        if is_serial(text) {
            let px = MIN_SERIAL_FONT_PX.max(pixels(
                f64::from(self.doc.height_dots) * 0.6 * self.scale.scale_y,
            ));
            let magnification = self.magnification(px, text);
            return TextStamp {
                x: self.centered(text_width(text, magnification)),
                y: truncate(f64::from(self.canvas_h) * 0.1),
                text: text.to_string(),
                magnification,
            };
        }

        let px = match font {
            Some(f) => MIN_FONT_PX.max(pixels(f64::from(f.height) * self.scale.scale_y * 0.6)),
            None => MIN_DEFAULT_FONT_PX.max(pixels(DEFAULT_FONT_PX * self.scale.min())),
        };
        let (x, y) = self.scale.point(origin);
        TextStamp {
            x,
            y,
            text: text.to_string(),
            magnification: self.magnification(px, text),
        }
    }

    fn boxed(
        &self,
        origin: Point,
        width: u32,
        height: u32,
        thickness: u32,
        out: &mut Vec<Primitive>,
    ) {
        let (x, y) = self.scale.point(origin);
        let w = self.scale.x(width);
        let h = self.scale.y(height);
        let t = truncate(f64::from(thickness) * self.scale.min()).max(1);
        // Insets past the middle of the shorter side only redraw inked pixels,
        // and insets past the canvas edge are never visible.
        let visible = i32::try_from(self.canvas_w.min(self.canvas_h)).unwrap_or(i32::MAX);
        let t = t.min(w.min(h) / 2 + 1).min(visible.saturating_add(1));
        let (right, bottom) = (x.saturating_add(w), y.saturating_add(h));
        for i in 0..t {
            out.push(Primitive::Stroke(Rect::new(
                x.saturating_add(i),
                y.saturating_add(i),
                right - i,
                bottom - i,
            )));
        }
    }

    fn barcode(&self, origin: Point, symbology: Symbology, data: &str, out: &mut Vec<Primitive>) {
        let bar_w =
            truncate(f64::from(self.doc.width_dots) * BARCODE_WIDTH_SHARE * self.scale.scale_x);
        let bar_h = truncate(BARCODE_HEIGHT_DOTS * self.scale.scale_y);
        let x = self.centered(u32::try_from(bar_w).unwrap_or(0));
        let y = self.scale.y(origin.y);

        match encode(symbology, data) {
            Symbol::Linear(pattern) => bars::linear(&pattern, x, y, bar_w, bar_h, out),
            Symbol::QrPlaceholder(_) => bars::qr_placeholder(x, y, bar_w, bar_h, out),
        }

        let px = 4_u32.max(pixels(6.0 * self.scale.min()));
        let magnification = self.magnification(px, data);
        out.push(Primitive::Text(TextStamp {
            x: self.centered(text_width(data, magnification)),
            y: y.saturating_add(bar_h).saturating_add(CAPTION_GAP),
            text: data.to_string(),
            magnification,
        }));
    }

    /// Left edge that centers `width` pixels on the canvas.
    fn centered(&self, width: u32) -> i32 {
        truncate((f64::from(self.canvas_w) - f64::from(width)) / 2.0)
    }

    /// Glyph magnification for a `px`-high font, reduced until `text` fits
    /// the canvas width. Never below 1.
    fn magnification(&self, px: u32, text: &str) -> u32 {
        let wanted = (px / CELL_HEIGHT).max(1);
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        if chars == 0 {
            return wanted;
        }
        let fits = self.canvas_w / chars.saturating_mul(CELL_WIDTH);
        wanted.min(fits.max(1))
    }
}

/// A run of more than five ASCII digits: a serial number that the
/// generator lays out large and centered.
pub fn is_serial(text: &str) -> bool {
    text.len() > 5 && text.bytes().all(|b| b.is_ascii_digit())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixels(v: f64) -> u32 {
    v as u32
}
