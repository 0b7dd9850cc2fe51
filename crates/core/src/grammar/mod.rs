/// Label document and draw command types.
pub mod ast;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// JSON serialization helpers for parse results.
pub mod dump;
/// Line and directive splitting over borrowed input.
pub mod lexer;
/// Directive parser: text to document and draw commands.
pub mod parser;
