//! Typed errors for the label core.
//!
//! Parsing, layout and rasterizing never fail; these errors cover the few
//! places where a caller must supply something: a non-empty code list for
//! generation, and option names typed in by a user.

use thiserror::Error;

/// Errors returned by the label core.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// A required argument was missing or empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A label format key that is not in the format table.
    #[error("unknown label format '{0}' (expected one of: auto, 100x150, 60x40, 58x100, 80x50)")]
    UnknownFormat(String),

    /// A barcode symbology name that is not supported.
    #[error("unknown symbology '{0}' (expected one of: code128, code39, ean13, qr)")]
    UnknownSymbology(String),

    /// An orientation name other than portrait or landscape.
    #[error("unknown orientation '{0}' (expected portrait or landscape)")]
    UnknownOrientation(String),
}
