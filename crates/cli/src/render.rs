//! Terminal output: output mode selection and diagnostic rendering.
//!
//! Diagnostics with a span are drawn with ariadne against the ZPL source;
//! the rest become one-line messages. Everything diagnostic goes to stderr
//! so stdout stays clean for data.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use serde::Serialize;
use zpl_label_diagnostics::{Diagnostic, Severity};

// ─── Output mode ────────────────────────────────────────────────────────────

/// How results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Human-oriented text with colour.
    Pretty,
    /// One JSON document on stdout.
    Json,
}

impl Format {
    /// The explicit `--output` choice, or pretty on a terminal and JSON
    /// when piped.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ if io::stdout().is_terminal() => Format::Pretty,
            _ => Format::Json,
        }
    }
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ─── Diagnostics ────────────────────────────────────────────────────────────

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

fn context_note(diag: &Diagnostic) -> Option<String> {
    let ctx = diag.context.as_ref().filter(|c| !c.is_empty())?;
    Some(
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Draw `diagnostics` for `source` (shown as `filename`) on stderr.
pub(crate) fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    let config = Config::default().with_compact(false);
    let mut cache = (filename, Source::from(source));

    for diag in diagnostics {
        let note = context_note(diag);
        let Some(span) = diag.span else {
            eprintln!("{}[{}]: {}", diag.severity, diag.id, diag.message);
            if let Some(note) = note {
                eprintln!("  = note: {note}");
            }
            continue;
        };

        // spans may point past a truncated source
        let start = span.start.min(source.len());
        let end = span.end.min(source.len()).max(start);
        let label = note.clone().unwrap_or_else(|| diag.message.clone());

        let mut report = Report::build(report_kind(diag.severity), (filename, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(label)
                    .with_color(severity_color(diag.severity)),
            );
        if let Some(help) = diag.explain() {
            report = report.with_help(help);
        }
        report.finish().eprint(&mut cache).ok();
    }
}

/// Severity counts, e.g. `1 warning, 2 info`. Nothing for no findings.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let count = |wanted: Severity| diagnostics.iter().filter(|d| d.severity == wanted).count();
    let plural = |n: usize| if n == 1 { "" } else { "s" };

    let warnings = count(Severity::Warn);
    let infos = count(Severity::Info);

    let mut parts = Vec::new();
    if warnings > 0 {
        let text = format!("{warnings} warning{}", plural(warnings));
        parts.push(text.fg(Color::Yellow).to_string());
    }
    if infos > 0 {
        parts.push(format!("{infos} info").fg(Color::Blue).to_string());
    }
    if !parts.is_empty() {
        eprintln!("{}", parts.join(", "));
    }
}
