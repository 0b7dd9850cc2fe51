//! Bar drawing for encoded symbols.

use super::{Primitive, Rect, TextStamp, truncate};
use crate::symbology::{QrPlaceholder, SymbolPattern};

/// Space left under linear bars inside the barcode area.
const BAR_BOTTOM_MARGIN: i32 = 10;
/// Gap between neighbouring QR placeholder cells.
const QR_CELL_GAP: i32 = 2;

/// Draw `pattern` across a `width` x `height` area at `(x, y)`.
///
/// Every module gets `width / len` pixels (fractional); bar modules become
/// filled rectangles from the top of the area to `height - 10`.
pub(super) fn linear(
    pattern: &SymbolPattern,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    out: &mut Vec<Primitive>,
) {
    if pattern.is_empty() {
        return;
    }
    let module = f64::from(width) / pattern.len() as f64;
    let bottom = y.saturating_add((height - BAR_BOTTOM_MARGIN).max(0));
    for (i, _) in pattern.modules().iter().enumerate().filter(|&(_, &bar)| bar) {
        let left = f64::from(x) + i as f64 * module;
        out.push(Primitive::Fill(Rect::new(
            truncate(left),
            y,
            truncate(left + module),
            bottom,
        )));
    }
}

/// Draw the QR stand-in: an outlined square of side `min(width, height)`,
/// its ring of filled cells, and a "QR" stamp near the middle.
pub(super) fn qr_placeholder(x: i32, y: i32, width: i32, height: i32, out: &mut Vec<Primitive>) {
    let size = width.min(height);
    out.push(Primitive::Stroke(Rect::new(
        x,
        y,
        x.saturating_add(size),
        y.saturating_add(size),
    )));

    let cell = f64::from(size) / QrPlaceholder::GRID as f64;
    let at = |origin: i32, i: usize| truncate(f64::from(origin) + i as f64 * cell);
    for (col, row) in QrPlaceholder::filled_cells() {
        out.push(Primitive::Fill(Rect::new(
            at(x, col),
            at(y, row),
            at(x, col + 1) - QR_CELL_GAP,
            at(y, row + 1) - QR_CELL_GAP,
        )));
    }

    out.push(Primitive::Text(TextStamp {
        x: x.saturating_add(size / 2 - 10),
        y: y.saturating_add(size / 2 - 5),
        text: QrPlaceholder::LABEL.to_string(),
        magnification: 1,
    }));
}
