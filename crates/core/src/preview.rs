//! The preview pipeline: parse, lay out and rasterize in one call.

use serde::{Deserialize, Serialize};

use crate::grammar::ast::{DrawCommand, LabelDocument};
use crate::grammar::diag::Diagnostic;
use crate::grammar::lexer::split_forms;
use crate::grammar::parser::parse_str;
use crate::layout::{layout, truncate};
use crate::raster::{PixelCanvas, rasterize};

/// Options for [`render_preview`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Canvas pixels per document dot. Clamped to
    /// [`MIN_SCALE`](Self::MIN_SCALE)..=[`MAX_SCALE`](Self::MAX_SCALE).
    pub scale: f64,
}

impl RenderOptions {
    /// Smallest accepted scale.
    pub const MIN_SCALE: f64 = 0.5;
    /// Largest accepted scale.
    pub const MAX_SCALE: f64 = 5.0;
    /// Scale used when none is given.
    pub const DEFAULT_SCALE: f64 = 2.0;

    /// Options with the given scale.
    pub fn with_scale(scale: f64) -> Self {
        Self { scale }
    }

    /// The scale actually used: clamped to the accepted range, with NaN
    /// replaced by the default.
    pub fn effective_scale(&self) -> f64 {
        if self.scale.is_nan() {
            Self::DEFAULT_SCALE
        } else {
            self.scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE)
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: Self::DEFAULT_SCALE,
        }
    }
}

/// A rendered label.
#[derive(Debug, Clone)]
pub struct Preview {
    /// Document setup the preview was rendered from.
    pub document: LabelDocument,
    /// Parsed draw commands.
    pub commands: Vec<DrawCommand>,
    /// Scale that was applied, after [`fit_scale`].
    pub scale: f64,
    /// The rendered pixels.
    pub canvas: PixelCanvas,
    /// Parser findings.
    pub diagnostics: Vec<Diagnostic>,
}

/// Longest canvas side in pixels.
pub const MAX_CANVAS_SIDE: u32 = 10_000;

/// `scale`, lowered on both axes so the longer side of `doc` stays within
/// [`MAX_CANVAS_SIDE`]. May fall below [`RenderOptions::MIN_SCALE`].
pub fn fit_scale(doc: &LabelDocument, scale: f64) -> f64 {
    let longest = doc.width_dots.max(doc.height_dots).max(1);
    scale.min(f64::from(MAX_CANVAS_SIDE) / f64::from(longest))
}

/// Canvas size for `doc` at `scale` (after [`fit_scale`]): truncated and
/// at least 1 x 1.
pub fn canvas_size(doc: &LabelDocument, scale: f64) -> (u32, u32) {
    let scale = fit_scale(doc, scale);
    let side = |dots: u32| {
        u32::try_from(truncate(f64::from(dots) * scale))
            .unwrap_or(0)
            .clamp(1, MAX_CANVAS_SIDE)
    };
    (side(doc.width_dots), side(doc.height_dots))
}

/// Render ZPL text to a 1-bit preview.
pub fn render_preview(input: &str, options: &RenderOptions) -> Preview {
    let parsed = parse_str(input);
    let scale = fit_scale(&parsed.document, options.effective_scale());
    let (canvas_w, canvas_h) = canvas_size(&parsed.document, scale);
    let primitives = layout(&parsed.document, &parsed.commands, canvas_w, canvas_h);
    Preview {
        document: parsed.document,
        commands: parsed.commands,
        scale,
        canvas: rasterize(canvas_w, canvas_h, &primitives),
        diagnostics: parsed.diagnostics,
    }
}

/// Render each `^XA ... ^XZ` form of `input` separately.
pub fn render_forms(input: &str, options: &RenderOptions) -> Vec<Preview> {
    split_forms(input)
        .into_iter()
        .map(|form| render_preview(form, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_clamped() {
        assert_eq!(RenderOptions::with_scale(10.0).effective_scale(), 5.0);
        assert_eq!(RenderOptions::with_scale(0.1).effective_scale(), 0.5);
        assert_eq!(RenderOptions::with_scale(f64::NAN).effective_scale(), 2.0);
        assert_eq!(RenderOptions::default().effective_scale(), 2.0);
    }

    #[test]
    fn canvas_size_truncates() {
        let doc = LabelDocument {
            width_dots: 233,
            height_dots: 1,
            ..LabelDocument::default()
        };
        assert_eq!(canvas_size(&doc, 0.5), (116, 1));
    }

    #[test]
    fn canvas_cap_keeps_aspect_ratio() {
        let doc = LabelDocument {
            width_dots: 32_000,
            height_dots: 400,
            ..LabelDocument::default()
        };
        assert_eq!(fit_scale(&doc, 5.0), 0.3125);
        assert_eq!(canvas_size(&doc, 5.0), (MAX_CANVAS_SIDE, 125));
    }

    #[test]
    fn small_labels_keep_requested_scale() {
        let doc = LabelDocument {
            width_dots: 600,
            height_dots: 400,
            ..LabelDocument::default()
        };
        assert_eq!(fit_scale(&doc, 5.0), 5.0);
    }

    #[test]
    fn scale_one_keeps_document_size() {
        let preview = render_preview("^XA^PW600^LL400^XZ", &RenderOptions::with_scale(1.0));
        assert_eq!((preview.canvas.width(), preview.canvas.height()), (600, 400));
    }

    #[test]
    fn options_deserialize_with_default() {
        let opts: RenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, RenderOptions::default());
    }
}
