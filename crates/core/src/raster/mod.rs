//! 1-bit raster canvas.
//!
//! [`rasterize`] owns the canvas while drawing and hands it out read-only.
//! Primitives are drawn in order onto a white canvas; later primitives
//! overwrite earlier ones and everything outside the canvas is clipped.

/// Fixed-width bitmap font used for text stamps.
pub mod font;

use crate::layout::{Primitive, Rect, TextStamp};

/// A width x height grid of black/white pixels.
///
/// Rows are packed eight pixels per byte with the most significant bit
/// first, and padded to whole bytes. A set bit is black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    stride: usize,
    bits: Vec<u8>,
}

impl PixelCanvas {
    fn blank(width: u32, height: u32) -> Self {
        let stride = (width as usize).div_ceil(8);
        Self {
            width,
            height,
            stride,
            bits: vec![0; stride * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at `(x, y)` is black. Out-of-range reads are white.
    pub fn is_black(&self, x: u32, y: u32) -> bool {
        x < self.width
            && y < self.height
            && self.bits[y as usize * self.stride + x as usize / 8] & (0x80 >> (x % 8)) != 0
    }

    /// Number of black pixels.
    pub fn black_pixels(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Bytes per row in [`packed_rows`](Self::packed_rows).
    pub fn row_stride(&self) -> usize {
        self.stride
    }

    /// The pixel buffer, top row first. Padding bits are always `0`.
    pub fn packed_rows(&self) -> &[u8] {
        &self.bits
    }

    // ── Drawing ─────────────────────────────────────────────────────────

    fn fill(&mut self, rect: &Rect) {
        let (Some((x0, x1)), Some((y0, y1))) = (
            clip(rect.x0, rect.x1, self.width),
            clip(rect.y0, rect.y1, self.height),
        ) else {
            return;
        };
        for y in y0..=y1 {
            self.fill_row(y as usize * self.stride, x0, x1);
        }
    }

    /// Set pixels `x0..=x1` of the row starting at byte `row`.
    fn fill_row(&mut self, row: usize, x0: u32, x1: u32) {
        let (first, last) = (row + x0 as usize / 8, row + x1 as usize / 8);
        let head = 0xFF_u8 >> (x0 % 8);
        let tail = 0xFF_u8 << (7 - x1 % 8);
        if first == last {
            self.bits[first] |= head & tail;
        } else {
            self.bits[first] |= head;
            self.bits[first + 1..last].fill(0xFF);
            self.bits[last] |= tail;
        }
    }

    fn stroke(&mut self, rect: &Rect) {
        let Rect { x0, y0, x1, y1 } = *rect;
        self.fill(&Rect::new(x0, y0, x1, y0));
        self.fill(&Rect::new(x0, y1, x1, y1));
        self.fill(&Rect::new(x0, y0, x0, y1));
        self.fill(&Rect::new(x1, y0, x1, y1));
    }

    fn stamp(&mut self, stamp: &TextStamp) {
        let m = i64::from(stamp.magnification.max(1));
        let cell_w = i64::from(font::CELL_WIDTH) * m;
        for (k, c) in stamp.text.chars().enumerate() {
            let cell_x = i64::from(stamp.x) + k as i64 * cell_w;
            if cell_x >= i64::from(self.width) {
                break;
            }
            for col in 0..font::GLYPH_COLUMNS {
                for row in 0..font::GLYPH_ROWS {
                    if !font::ink(c, col, row) {
                        continue;
                    }
                    let px = cell_x + i64::from(col) * m;
                    let py = i64::from(stamp.y) + i64::from(row) * m;
                    self.fill(&Rect::new(
                        saturate(px),
                        saturate(py),
                        saturate(px + m - 1),
                        saturate(py + m - 1),
                    ));
                }
            }
        }
    }
}

/// Clamp the inclusive span `a..=b` to `0..len`, or `None` if it misses.
fn clip(a: i32, b: i32, len: u32) -> Option<(u32, u32)> {
    let (lo, hi) = (i64::from(a.min(b)), i64::from(a.max(b)));
    let last = i64::from(len) - 1;
    if len == 0 || hi < 0 || lo > last {
        return None;
    }
    let lo = u32::try_from(lo.max(0)).ok()?;
    let hi = u32::try_from(hi.min(last)).ok()?;
    Some((lo, hi))
}

fn saturate(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}

/// Draw `primitives` in order onto a white `width` x `height` canvas.
///
/// An empty list yields a blank canvas.
pub fn rasterize(width: u32, height: u32, primitives: &[Primitive]) -> PixelCanvas {
    let mut canvas = PixelCanvas::blank(width, height);
    for primitive in primitives {
        match primitive {
            Primitive::Fill(rect) => canvas.fill(rect),
            Primitive::Stroke(rect) => canvas.stroke(rect),
            Primitive::Text(stamp) => canvas.stamp(stamp),
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_blank() {
        let canvas = rasterize(600, 400, &[]);
        assert_eq!((canvas.width(), canvas.height()), (600, 400));
        assert_eq!(canvas.black_pixels(), 0);
    }

    #[test]
    fn fill_is_inclusive_and_clipped() {
        let canvas = rasterize(10, 10, &[Primitive::Fill(Rect::new(-5, 8, 2, 20))]);
        // x 0..=2, y 8..=9
        assert_eq!(canvas.black_pixels(), 3 * 2);
        assert!(canvas.is_black(2, 9));
        assert!(!canvas.is_black(3, 9));
        assert!(!canvas.is_black(100, 100));
    }

    #[test]
    fn off_canvas_primitives_draw_nothing() {
        let canvas = rasterize(
            10,
            10,
            &[
                Primitive::Fill(Rect::new(20, 20, 30, 30)),
                Primitive::Stroke(Rect::new(-9, -9, -1, -1)),
            ],
        );
        assert_eq!(canvas.black_pixels(), 0);
    }

    #[test]
    fn stroke_draws_outline_only() {
        let canvas = rasterize(10, 10, &[Primitive::Stroke(Rect::new(1, 1, 5, 4))]);
        assert!(canvas.is_black(1, 1));
        assert!(canvas.is_black(5, 4));
        assert!(!canvas.is_black(3, 2));
        // 5 wide x 4 high outline
        assert_eq!(canvas.black_pixels(), 2 * 5 + 2 * 2);
    }

    #[test]
    fn text_stamp_is_magnified() {
        let stamp = |m| {
            Primitive::Text(TextStamp {
                x: 0,
                y: 0,
                text: "|".into(),
                magnification: m,
            })
        };
        let one = rasterize(20, 20, &[stamp(1)]);
        let two = rasterize(20, 20, &[stamp(2)]);
        assert_eq!(one.black_pixels(), 7);
        assert_eq!(two.black_pixels(), 7 * 4);
        assert!(one.is_black(2, 0));
        assert!(two.is_black(4, 13));
    }

    #[test]
    fn packed_rows_are_msb_first() {
        let canvas = rasterize(
            10,
            2,
            &[
                Primitive::Fill(Rect::new(0, 0, 0, 0)),
                Primitive::Fill(Rect::new(9, 1, 9, 1)),
            ],
        );
        assert_eq!(canvas.row_stride(), 2);
        assert_eq!(canvas.packed_rows(), &[0x80, 0x00, 0x00, 0x40]);
    }

    #[test]
    fn row_fill_spans_byte_boundaries() {
        let canvas = rasterize(20, 1, &[Primitive::Fill(Rect::new(3, 0, 17, 0))]);
        assert_eq!(canvas.packed_rows(), &[0x1F, 0xFF, 0xC0]);
        assert_eq!(canvas.black_pixels(), 15);
        assert!(!canvas.is_black(2, 0));
        assert!(canvas.is_black(3, 0));
        assert!(canvas.is_black(17, 0));
        assert!(!canvas.is_black(18, 0));
    }

    #[test]
    fn buffer_holds_one_bit_per_pixel() {
        let canvas = rasterize(1000, 1000, &[]);
        assert_eq!(canvas.packed_rows().len(), 125 * 1000);
    }
}
