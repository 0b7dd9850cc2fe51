//! Barcode symbol encoders.
//!
//! Each linear encoder turns a data string into an exact module pattern
//! (bars and spaces), including start/stop characters and parity. Encoding
//! is pure: the same input always yields the same pattern, and characters a
//! symbology cannot carry are dropped or substituted rather than reported.
//!
//! QR output is a fixed decorative placeholder, not a decodable symbol.

mod code128;
mod code39;
mod ean13;
mod qr;

pub use code128::checksum as code128_checksum;
pub use qr::QrPlaceholder;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// Barcode symbologies known to the parser, layout engine and generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbology {
    /// Code 128, simplified subset B (`^BC`).
    #[default]
    #[serde(alias = "Code128")]
    Code128,
    /// Code 39 (`^B3`).
    #[serde(alias = "Code39")]
    Code39,
    /// EAN-13 (`^BE`).
    #[serde(alias = "EAN13")]
    Ean13,
    /// QR placeholder (`^BQ`).
    #[serde(alias = "QR")]
    Qr,
}

impl Symbology {
    /// Every symbology.
    pub const ALL: [Symbology; 4] = [
        Symbology::Code128,
        Symbology::Code39,
        Symbology::Ean13,
        Symbology::Qr,
    ];

    /// The ZPL directive that selects this symbology.
    pub fn directive(self) -> &'static str {
        match self {
            Symbology::Code128 => "^BC",
            Symbology::Code39 => "^B3",
            Symbology::Ean13 => "^BE",
            Symbology::Qr => "^BQ",
        }
    }

    /// Lower-case name used on the command line and in JSON.
    pub fn name(self) -> &'static str {
        match self {
            Symbology::Code128 => "code128",
            Symbology::Code39 => "code39",
            Symbology::Ean13 => "ean13",
            Symbology::Qr => "qr",
        }
    }
}

impl FromStr for Symbology {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "code128" | "128" => Ok(Symbology::Code128),
            "code39" | "39" => Ok(Symbology::Code39),
            "ean13" | "ean" => Ok(Symbology::Ean13),
            "qr" | "qrcode" => Ok(Symbology::Qr),
            _ => Err(LabelError::UnknownSymbology(s.to_string())),
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered run of barcode modules; `true` is a bar, `false` a space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolPattern {
    modules: Vec<bool>,
}

impl SymbolPattern {
    /// Build a pattern from a string of `'1'` and `'0'` characters.
    ///
    /// Any character other than `'1'` is read as a space.
    pub fn from_bits(bits: &str) -> Self {
        let mut pattern = Self::default();
        pattern.push_bits(bits);
        pattern
    }

    fn push_bits(&mut self, bits: &str) {
        self.modules.extend(bits.bytes().map(|b| b == b'1'));
    }

    /// The modules, left to right.
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// Number of modules in the pattern.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the pattern has no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Number of bar modules.
    pub fn bar_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    /// The pattern as a `'1'`/`'0'` string.
    pub fn to_bit_string(&self) -> String {
        self.modules
            .iter()
            .map(|&m| if m { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for SymbolPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

/// Output of [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A one-dimensional bar pattern.
    Linear(SymbolPattern),
    /// The fixed QR stand-in.
    QrPlaceholder(QrPlaceholder),
}

impl Symbol {
    /// The bar pattern, for linear symbols.
    pub fn as_linear(&self) -> Option<&SymbolPattern> {
        match self {
            Symbol::Linear(p) => Some(p),
            Symbol::QrPlaceholder(_) => None,
        }
    }
}

/// Encode `data` with the given symbology.
pub fn encode(symbology: Symbology, data: &str) -> Symbol {
    match symbology {
        Symbology::Code128 => Symbol::Linear(code128::encode(data)),
        Symbology::Code39 => Symbol::Linear(code39::encode(data)),
        Symbology::Ean13 => Symbol::Linear(ean13::encode(data)),
        Symbology::Qr => Symbol::QrPlaceholder(QrPlaceholder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbology_names_parse_back() {
        for s in Symbology::ALL {
            assert_eq!(s.name().parse::<Symbology>().unwrap(), s);
        }
        assert_eq!("EAN-13".parse::<Symbology>().unwrap(), Symbology::Ean13);
        assert_eq!("QR".parse::<Symbology>().unwrap(), Symbology::Qr);
        assert!("pdf417".parse::<Symbology>().is_err());
    }

    #[test]
    fn pattern_bit_string_round_trip() {
        let p = SymbolPattern::from_bits("1011000");
        assert_eq!(p.len(), 7);
        assert_eq!(p.bar_count(), 3);
        assert_eq!(p.to_string(), "1011000");
    }

    #[test]
    fn qr_encodes_to_placeholder() {
        let symbol = encode(Symbology::Qr, "https://example.com");
        assert_eq!(symbol, Symbol::QrPlaceholder(QrPlaceholder));
        assert!(symbol.as_linear().is_none());
    }

    #[test]
    fn encoding_is_deterministic() {
        for s in Symbology::ALL {
            assert_eq!(encode(s, "ABC-123"), encode(s, "ABC-123"));
        }
    }
}
