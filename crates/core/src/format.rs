//! Label stock formats and their size in printer dots.
//!
//! This table is the single source of truth for label dimensions: the
//! template generator writes these values as `^PW`/`^LL`, and the directive
//! parser reads them back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// A supported label stock, named by its size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LabelFormat {
    /// Alias for [`LabelFormat::Mm100x150`].
    #[default]
    #[serde(rename = "auto")]
    Auto,
    /// 100 x 150 mm shipping label.
    #[serde(rename = "100x150")]
    Mm100x150,
    /// 60 x 40 mm inventory label.
    #[serde(rename = "60x40")]
    Mm60x40,
    /// 58 x 100 mm receipt-width label.
    #[serde(rename = "58x100")]
    Mm58x100,
    /// 80 x 50 mm label.
    #[serde(rename = "80x50")]
    Mm80x50,
}

impl LabelFormat {
    /// Every format, in the order they are offered to users.
    pub const ALL: [LabelFormat; 5] = [
        LabelFormat::Auto,
        LabelFormat::Mm100x150,
        LabelFormat::Mm60x40,
        LabelFormat::Mm58x100,
        LabelFormat::Mm80x50,
    ];

    /// The format key as written by users (`"auto"`, `"60x40"`, ...).
    pub fn key(self) -> &'static str {
        match self {
            LabelFormat::Auto => "auto",
            LabelFormat::Mm100x150 => "100x150",
            LabelFormat::Mm60x40 => "60x40",
            LabelFormat::Mm58x100 => "58x100",
            LabelFormat::Mm80x50 => "80x50",
        }
    }

    /// Label size as `(width_dots, height_dots)`.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            LabelFormat::Auto | LabelFormat::Mm100x150 => (600, 400),
            LabelFormat::Mm60x40 => (240, 160),
            LabelFormat::Mm58x100 => (232, 400),
            LabelFormat::Mm80x50 => (320, 200),
        }
    }

    /// Look up a format key, falling back to [`LabelFormat::Auto`] for
    /// anything unknown.
    pub fn from_key_or_auto(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl FromStr for LabelFormat {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LabelFormat::ALL
            .into_iter()
            .find(|f| f.key() == wanted)
            .ok_or_else(|| LabelError::UnknownFormat(s.to_string()))
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_aliases_100x150() {
        assert_eq!(
            LabelFormat::Auto.dimensions(),
            LabelFormat::Mm100x150.dimensions()
        );
    }

    #[test]
    fn every_format_has_positive_dimensions() {
        for format in LabelFormat::ALL {
            let (w, h) = format.dimensions();
            assert!(w > 0 && h > 0, "{format} has zero dimension");
        }
    }

    #[test]
    fn keys_round_trip_through_from_str() {
        for format in LabelFormat::ALL {
            assert_eq!(format.key().parse::<LabelFormat>().unwrap(), format);
        }
        assert_eq!("AUTO".parse::<LabelFormat>().unwrap(), LabelFormat::Auto);
    }

    #[test]
    fn unknown_key_is_rejected_strictly_and_defaulted_leniently() {
        assert_eq!(
            "4x6".parse::<LabelFormat>(),
            Err(LabelError::UnknownFormat("4x6".into()))
        );
        assert_eq!(LabelFormat::from_key_or_auto("4x6"), LabelFormat::Auto);
    }

    #[test]
    fn serde_uses_format_keys() {
        let json = serde_json::to_string(&LabelFormat::Mm58x100).unwrap();
        assert_eq!(json, "\"58x100\"");
        let back: LabelFormat = serde_json::from_str("\"80x50\"").unwrap();
        assert_eq!(back, LabelFormat::Mm80x50);
    }
}
