//! EAN-13.
//!
//! Non-digits are removed, the rest is left-padded with `0` and cut to 13
//! digits. The leading digit picks the parity of digits 2..=7; positions
//! with `G` parity take their pattern from the right-hand table.

use super::SymbolPattern;

const GUARD: &str = "101";
const CENTER: &str = "01010";
const DIGITS: usize = 13;

const LEFT: [&str; 10] = [
    "0001101", "0011001", "0010011", "0111101", "0100011", "0110001", "0101111", "0111011",
    "0110111", "0001011",
];

const RIGHT: [&str; 10] = [
    "1110010", "1100110", "1101100", "1000010", "1011100", "1001110", "1010000", "1000100",
    "1001000", "1110100",
];

const PARITY: [&str; 10] = [
    "LLLLLL", "LLGLGG", "LLGGLG", "LLGGGL", "LGLLGG", "LGGLLG", "LGGGLL", "LGLGLG", "LGLGGL",
    "LGGLGL",
];

/// Normalize `data` to exactly 13 digits.
pub(super) fn normalize(data: &str) -> Vec<usize> {
    let digits: Vec<usize> = data
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as usize)
        .collect();
    let pad = DIGITS.saturating_sub(digits.len());
    std::iter::repeat_n(0, pad)
        .chain(digits)
        .take(DIGITS)
        .collect()
}

/// Encode `data` as EAN-13 (always 95 modules).
pub(super) fn encode(data: &str) -> SymbolPattern {
    let digits = normalize(data);
    let parity = PARITY[digits[0]].as_bytes();

    let mut out = SymbolPattern::from_bits(GUARD);
    for (i, &d) in digits[1..7].iter().enumerate() {
        out.push_bits(if parity[i] == b'L' { LEFT[d] } else { RIGHT[d] });
    }
    out.push_bits(CENTER);
    for &d in &digits[7..] {
        out.push_bits(RIGHT[d]);
    }
    out.push_bits(GUARD);
    out
}
