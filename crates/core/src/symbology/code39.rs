//! Code 39.
//!
//! Each character is a fixed 12-module wide/narrow pattern. The symbol is
//! framed by `*` and every character (including the closing `*`) is
//! preceded by a single narrow space.

use super::SymbolPattern;

const START_STOP: &str = "100101101101";
const GAP: &str = "0";

fn pattern(c: char) -> Option<&'static str> {
    Some(match c {
        '0' => "101001101101",
        '1' => "110100101011",
        '2' => "101100101011",
        '3' => "110110010101",
        '4' => "101001101011",
        '5' => "110100110101",
        '6' => "101100110101",
        '7' => "101001011011",
        '8' => "110100101101",
        '9' => "101100101101",
        'A' => "110101001011",
        'B' => "101101001011",
        'C' => "110110100101",
        'D' => "101011001011",
        'E' => "110101100101",
        'F' => "101101100101",
        'G' => "101010011011",
        'H' => "110101001101",
        'I' => "101101001101",
        'J' => "101011001101",
        'K' => "110101010011",
        'L' => "101101010011",
        'M' => "110110101001",
        'N' => "101011010011",
        'O' => "110101101001",
        'P' => "101101101001",
        'Q' => "101010110011",
        'R' => "110101011001",
        'S' => "101101011001",
        'T' => "101011011001",
        'U' => "110010101011",
        'V' => "100110101011",
        'W' => "110011010101",
        'X' => "100101101011",
        'Y' => "110010110101",
        'Z' => "100110110101",
        '-' => "100101011011",
        '.' => "110010101101",
        ' ' => "100110101101",
        '*' => START_STOP,
        '$' => "100100100101",
        '/' => "100100101001",
        '+' => "100101001001",
        '%' => "101001001001",
        _ => return None,
    })
}

/// Encode `data` as Code 39. Lower-case letters are folded to upper case;
/// characters outside the Code 39 set are dropped.
pub(super) fn encode(data: &str) -> SymbolPattern {
    let mut out = SymbolPattern::from_bits(START_STOP);
    for c in data.chars().map(|c| c.to_ascii_uppercase()) {
        if let Some(bits) = pattern(c) {
            out.push_bits(GAP);
            out.push_bits(bits);
        }
    }
    out.push_bits(GAP);
    out.push_bits(START_STOP);
    out
}
