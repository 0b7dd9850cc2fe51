//! ZPL template generation.
//!
//! [`generate`] writes one complete `^XA ... ^XZ` form per code, using the
//! same directives the parser reads back: a large centered code, a barcode
//! below it, and a timestamp line. Several codes produce several forms
//! separated by newlines; `^XB` is never emitted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;
use crate::format::LabelFormat;
use crate::symbology::Symbology;

/// Print orientation requested for generated labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintOrientation {
    /// Printed as read (`^PON`).
    Portrait,
    /// Printed inverted (`^POI`).
    #[default]
    Landscape,
}

impl PrintOrientation {
    /// The ZPL directive for this orientation.
    pub fn directive(self) -> &'static str {
        match self {
            PrintOrientation::Portrait => "^PON",
            PrintOrientation::Landscape => "^POI",
        }
    }
}

impl FromStr for PrintOrientation {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(PrintOrientation::Portrait),
            "landscape" => Ok(PrintOrientation::Landscape),
            _ => Err(LabelError::UnknownOrientation(s.to_string())),
        }
    }
}

impl fmt::Display for PrintOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintOrientation::Portrait => f.write_str("portrait"),
            PrintOrientation::Landscape => f.write_str("landscape"),
        }
    }
}

/// Options for [`generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Barcode symbology for every label.
    pub barcode: Symbology,
    /// Print orientation directive.
    pub orientation: PrintOrientation,
    /// Label stock; decides `^PW` and `^LL`.
    pub format: LabelFormat,
}

/// Generate ZPL for `codes`, one form per code.
///
/// Codes are trimmed and empty ones dropped. `timestamp` is printed at the
/// bottom of every label as given.
///
/// # Errors
///
/// Returns [`LabelError::InvalidInput`] if no non-empty code remains.
pub fn generate<S: AsRef<str>>(
    codes: &[S],
    options: &GenerateOptions,
    timestamp: &str,
) -> Result<String, LabelError> {
    let codes: Vec<&str> = codes
        .iter()
        .map(|c| c.as_ref().trim())
        .filter(|c| !c.is_empty())
        .collect();
    if codes.is_empty() {
        return Err(LabelError::InvalidInput("no codes to generate".into()));
    }

    let forms: Vec<String> = codes
        .iter()
        .map(|code| form(code, options, timestamp))
        .collect();
    Ok(forms.join("\n"))
}

fn form(code: &str, options: &GenerateOptions, timestamp: &str) -> String {
    let (w, h) = options.format.dimensions();
    let large_height = h * 6 / 10;
    let large_width = large_height * 6 / 10;
    let barcode_y = 10 + large_height + 10;
    let small = h * 8 / 100;

    [
        "^XA".to_string(),
        format!("^PW{w}"),
        format!("^LL{h}"),
        options.orientation.directive().to_string(),
        format!("^FO0,10^A0N,{large_height},{large_width}^FB{w},1,0,C^FD{code}^FS"),
        barcode_line(options.barcode, code, w, barcode_y),
        format!(
            "^FO{},{}^A0N,{small},{small}^FD{timestamp}^FS",
            w.saturating_sub(120) / 2,
            barcode_y + 55
        ),
        "^XZ".to_string(),
    ]
    .join("\n")
}

fn barcode_line(symbology: Symbology, code: &str, w: u32, y: u32) -> String {
    let span = w.saturating_sub(40);
    match symbology {
        Symbology::Qr => format!(
            "^FO{},{y}^BQN,2,6^FDQA,{code}^FS",
            w.saturating_sub(100) / 2
        ),
        Symbology::Code39 => format!("^FO20,{y}^BY2^B3N,N,{span},Y,N^FD{code}^FS"),
        Symbology::Ean13 => format!("^FO20,{y}^BY2^BEN,{span},Y,N^FD{code}^FS"),
        Symbology::Code128 => format!("^FO20,{y}^BY2^BCN,40,Y,N,N^FD{code}^FS"),
    }
}

/// Split user input into codes on runs of commas and whitespace.
pub fn parse_codes(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
