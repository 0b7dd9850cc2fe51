//! QR placeholder.
//!
//! A 7x7 grid whose inner 5x5 ring (rows and columns 1..=5, on the edge of
//! that range) is filled, with a "QR" caption stamped in the middle. It
//! only marks where a QR symbol would go; it cannot be scanned.

/// The fixed QR stand-in pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QrPlaceholder;

impl QrPlaceholder {
    /// Cells per side of the grid.
    pub const GRID: usize = 7;

    /// Text stamped at the center of the placeholder.
    pub const LABEL: &'static str = "QR";

    /// Whether the cell at `(col, row)` is filled.
    pub fn is_filled(col: usize, row: usize) -> bool {
        let inner = 1..=5;
        if !inner.contains(&col) || !inner.contains(&row) {
            return false;
        }
        col == 1 || col == 5 || row == 1 || row == 5
    }

    /// All filled cells as `(col, row)`, column-major.
    pub fn filled_cells() -> impl Iterator<Item = (usize, usize)> {
        (0..Self::GRID)
            .flat_map(|col| (0..Self::GRID).map(move |row| (col, row)))
            .filter(|&(col, row)| Self::is_filled(col, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_has_sixteen_cells() {
        assert_eq!(QrPlaceholder::filled_cells().count(), 16);
    }

    #[test]
    fn outer_border_and_center_are_empty() {
        for i in 0..QrPlaceholder::GRID {
            assert!(!QrPlaceholder::is_filled(0, i));
            assert!(!QrPlaceholder::is_filled(6, i));
            assert!(!QrPlaceholder::is_filled(i, 0));
            assert!(!QrPlaceholder::is_filled(i, 6));
        }
        assert!(!QrPlaceholder::is_filled(3, 3));
        assert!(!QrPlaceholder::is_filled(2, 4));
        assert!(QrPlaceholder::is_filled(1, 1));
        assert!(QrPlaceholder::is_filled(5, 3));
    }
}
