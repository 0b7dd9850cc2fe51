//! Code 128, simplified subset B.
//!
//! Only ASCII 32 (space) through 57 (`9`) have patterns; every other byte is
//! encoded as a space. The symbol is `Start B` + data + stop. The mod-103
//! check character is computed by [`checksum`] but is not part of the
//! encoded pattern, so existing scanned labels keep decoding the same way.

use super::SymbolPattern;

const START_B: &str = "11010010000";
const STOP: &str = "1100011101011";
const START_B_VALUE: i64 = 104;

fn pattern(byte: u8) -> Option<&'static str> {
    Some(match byte {
        b' ' => "11011001100",
        b'!' => "11001101100",
        b'"' => "11001100110",
        b'#' => "10010011000",
        b'$' => "10010001100",
        b'%' => "10001001100",
        b'&' => "10011001000",
        b'\'' => "10011000100",
        b'(' => "10001100100",
        b')' => "11001001000",
        b'*' => "11001000100",
        b'+' => "11000100100",
        b',' => "10110011100",
        b'-' => "10011011100",
        b'.' => "10011001110",
        b'/' => "10111001100",
        b'0' => "10011101100",
        b'1' => "10011100110",
        b'2' => "11001110010",
        b'3' => "11001011100",
        b'4' => "11001001110",
        b'5' => "11011100100",
        b'6' => "11001110100",
        b'7' => "11101101110",
        b'8' => "11101001100",
        b'9' => "11100101100",
        _ => return None,
    })
}

/// Encode `data` as simplified Code 128 subset B.
pub(super) fn encode(data: &str) -> SymbolPattern {
    let space = pattern(b' ').unwrap_or_default();
    let mut out = SymbolPattern::from_bits(START_B);
    for byte in data.bytes() {
        out.push_bits(pattern(byte).unwrap_or(space));
    }
    out.push_bits(STOP);
    out
}

/// The Code 128 mod-103 check value for `data` in subset B.
///
/// Computed over the raw bytes: `(104 + Σ (byte - 32) * position) mod 103`
/// with 1-based positions.
pub fn checksum(data: &str) -> u8 {
    let sum = data
        .bytes()
        .enumerate()
        .fold(START_B_VALUE, |acc, (i, b)| {
            acc + (i64::from(b) - 32) * (i as i64 + 1)
        });
    // rem_euclid keeps the result in 0..103 even for control bytes below 32.
    sum.rem_euclid(103) as u8
}
