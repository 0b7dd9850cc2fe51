//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection.
//! Every ID listed here has an entry in [`crate::explain`].

/// A recognized directive carried arguments that could not be read.
pub const PARSER_MALFORMED_DIRECTIVE: &str = "LBL1001";

/// Field data (`^FD`) appeared without a closing `^FS` on the same line.
pub const PARSER_FIELD_NOT_CLOSED: &str = "LBL1002";

/// A field was opened and closed without any data (`^FD^FS`).
pub const PARSER_EMPTY_FIELD_DATA: &str = "LBL1003";

/// The document declares no `^PW` or `^LL`; defaults were used.
pub const PARSER_DIMENSION_MISSING: &str = "LBL1004";

/// A later `^PW`, `^LL` or `^PO` disagreed with the first one and was ignored.
pub const PARSER_CONFLICTING_SETUP: &str = "LBL1005";

/// The document contains no drawable fields.
pub const PARSER_NO_FIELDS: &str = "LBL1006";

/// All known diagnostic IDs, in numeric order.
pub const ALL: &[&str] = &[
    PARSER_MALFORMED_DIRECTIVE,
    PARSER_FIELD_NOT_CLOSED,
    PARSER_EMPTY_FIELD_DATA,
    PARSER_DIMENSION_MISSING,
    PARSER_CONFLICTING_SETUP,
    PARSER_NO_FIELDS,
];
