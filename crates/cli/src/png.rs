//! PNG output for rendered previews.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{GrayImage, ImageFormat, Luma};
use zpl_label_core::PixelCanvas;

const BLACK: Luma<u8> = Luma([0]);
const WHITE: Luma<u8> = Luma([255]);

/// Write `canvas` as an 8-bit grayscale PNG.
pub(crate) fn write_png(canvas: &PixelCanvas, path: &Path) -> Result<()> {
    let image = GrayImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        if canvas.is_black(x, y) { BLACK } else { WHITE }
    });
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Output path for form `index` (0-based) of `count`: the path itself for a
/// single form, `stem-N.ext` (1-based) otherwise.
pub(crate) fn form_path(base: &Path, index: usize, count: usize) -> PathBuf {
    if count <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map_or(Cow::Borrowed("preview"), |s| s.to_string_lossy());
    let ext = base
        .extension()
        .map_or(Cow::Borrowed("png"), |e| e.to_string_lossy());
    base.with_file_name(format!("{stem}-{}.{ext}", index + 1))
}
