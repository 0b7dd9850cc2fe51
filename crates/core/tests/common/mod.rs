//! Shared test helpers for `zpl_label_core` integration tests.

#![allow(unreachable_pub)]

use std::path::PathBuf;

use zpl_label_core::grammar::ast::DrawCommand;
use zpl_label_core::grammar::parser::ParseResult;
use zpl_label_diagnostics::Severity;

// ─── Parse-result helpers ────────────────────────────────────────────────────

/// Collect diagnostic codes from parser diagnostics.
#[allow(dead_code)]
pub fn extract_diag_codes(result: &ParseResult) -> Vec<String> {
    result
        .diagnostics
        .iter()
        .map(|d| d.id.to_string())
        .collect()
}

/// Diagnostics of a given severity.
#[allow(dead_code)]
pub fn count_severity(result: &ParseResult, severity: Severity) -> usize {
    result
        .diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .count()
}

/// Command kinds in order, as `"text"`, `"box"` or `"barcode"`.
#[allow(dead_code)]
pub fn command_kinds(result: &ParseResult) -> Vec<&'static str> {
    result
        .commands
        .iter()
        .map(|c| match c {
            DrawCommand::Text { .. } => "text",
            DrawCommand::Box { .. } => "box",
            DrawCommand::Barcode { .. } => "barcode",
            _ => "other",
        })
        .collect()
}

// ─── Sample files ────────────────────────────────────────────────────────────

/// Path of the repository `samples/` directory.
#[allow(dead_code)]
pub fn samples_dir() -> PathBuf {
    let mut root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/core -> repo root
    root.pop();
    root.pop();
    root.join("samples")
}

/// Read a sample file by name.
#[allow(dead_code)]
pub fn sample(name: &str) -> String {
    let path = samples_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}
