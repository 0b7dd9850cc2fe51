//! ZPL label core library.
//!
//! Turns a small subset of ZPL (Zebra Programming Language) into a 1-bit
//! raster preview, and generates ZPL for a list of codes. The main entry
//! points are [`parse_str`] for parsing, [`render_preview`] for the whole
//! parse, layout and rasterize pipeline, [`encode`] for barcode patterns,
//! and [`generate`] for ZPL output.
//!
//! Everything here is pure and synchronous; image encoding and printer I/O
//! belong to callers.

#![warn(missing_docs)]

/// Typed errors.
pub mod error;
/// Label stock formats.
pub mod format;
/// ZPL grammar: line splitting, parser, document model.
pub mod grammar;
/// Placement of draw commands on a scaled canvas.
pub mod layout;
/// Parse, layout and rasterize in one call.
pub mod preview;
/// 1-bit pixel canvas and primitive drawing.
pub mod raster;
/// Barcode symbol encoders.
pub mod symbology;
/// ZPL template generation.
pub mod template;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Parser
pub use grammar::lexer::split_forms;
pub use grammar::parser::{ParseResult, parse_str};

// Document model
pub use grammar::ast::{DrawCommand, FontSpec, LabelDocument, Orientation, Point};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{Diagnostic, Severity, Span, codes};

// Pipeline
pub use layout::{Primitive, Rect, ScaleContext, TextStamp, layout};
pub use preview::{Preview, RenderOptions, render_forms, render_preview};
pub use raster::{PixelCanvas, rasterize};

// Symbols
pub use symbology::{Symbol, SymbolPattern, Symbology, encode};

// Generation
pub use format::LabelFormat;
pub use template::{GenerateOptions, PrintOrientation, generate, parse_codes};

pub use error::LabelError;

// Serialization helpers
pub use grammar::dump::to_pretty_json;
