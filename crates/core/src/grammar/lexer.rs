//! Line and directive splitting.
//!
//! Everything here borrows from the source text and records byte offsets so
//! the parser can attach [`Span`](zpl_label_diagnostics::Span)s to commands
//! and diagnostics without copying.

/// Command leader for format directives.
pub const LEADER: char = '^';

const FIELD_SEPARATOR: &str = "^FS";

/// A trimmed logical line of input.
///
/// A physical line holding several `^FS`-terminated fields is split into one
/// logical line per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Trimmed line text.
    pub text: &'a str,
    /// Byte offset of `text` in the source input.
    pub start: usize,
}

impl Line<'_> {
    /// Byte offset one past the end of the line.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// One `^`-led directive on a line, without its leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Directive text after the leader, up to the next leader.
    pub body: &'a str,
    /// Byte offset of the leader in the source input.
    pub start: usize,
}

impl<'a> Directive<'a> {
    /// Byte offset one past the end of the directive.
    pub fn end(&self) -> usize {
        self.start + LEADER.len_utf8() + self.body.len()
    }

    /// The remainder of the body if it starts with `code`.
    pub fn strip(&self, code: &str) -> Option<&'a str> {
        self.body.strip_prefix(code)
    }

    /// Whether the directive is exactly `code` with no trailing text.
    pub fn is(&self, code: &str) -> bool {
        self.body == code
    }
}

/// Split `input` into trimmed, non-empty logical lines.
///
/// `\n` separates physical lines and a trailing `\r` is dropped. Each
/// physical line is further split immediately after every `^FS`.
pub fn lines(input: &str) -> Vec<Line<'_>> {
    let mut out = Vec::new();
    let mut offset = 0;
    for physical in input.split('\n') {
        let line_start = offset;
        offset += physical.len() + 1;
        let physical = physical.strip_suffix('\r').unwrap_or(physical);

        let mut rest = physical;
        let mut rest_start = line_start;
        while !rest.is_empty() {
            let cut = rest
                .find(FIELD_SEPARATOR)
                .map_or(rest.len(), |i| i + FIELD_SEPARATOR.len());
            push_trimmed(&mut out, &rest[..cut], rest_start);
            rest = &rest[cut..];
            rest_start += cut;
        }
    }
    out
}

fn push_trimmed<'a>(out: &mut Vec<Line<'a>>, segment: &'a str, start: usize) {
    let lead = segment.len() - segment.trim_start().len();
    let text = segment.trim();
    if !text.is_empty() {
        out.push(Line {
            text,
            start: start + lead,
        });
    }
}

/// The `^`-led directives of a line, in order. Text before the first
/// leader is ignored.
pub fn directives<'a>(line: &Line<'a>) -> impl Iterator<Item = Directive<'a>> + 'a {
    let base = line.start;
    let text = line.text;
    text.match_indices(LEADER).map(move |(i, _)| {
        let body_start = i + LEADER.len_utf8();
        let body_end = text[body_start..]
            .find(LEADER)
            .map_or(text.len(), |j| body_start + j);
        Directive {
            body: &text[body_start..body_end],
            start: base + i,
        }
    })
}

/// Parse an argument as an unsigned integer, allowing surrounding spaces.
pub fn parse_uint(arg: &str) -> Option<u32> {
    let arg = arg.trim();
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    arg.parse().ok()
}

/// Parse the first `N` comma-separated arguments as unsigned integers.
///
/// Extra trailing arguments are ignored; fewer than `N`, or any of the
/// first `N` not numeric, yields `None`.
pub fn parse_uints<const N: usize>(args: &str) -> Option<[u32; N]> {
    let mut out = [0; N];
    let mut parts = args.split(',');
    for slot in &mut out {
        *slot = parse_uint(parts.next()?)?;
    }
    Some(out)
}

/// Split a multi-form document into its `^XA ... ^XZ` blocks.
///
/// Each returned slice starts at `^XA` and ends after the matching `^XZ`
/// (or at end of input for an unterminated last form). Input with no `^XA`
/// is returned whole, so a bare field list still previews.
pub fn split_forms(input: &str) -> Vec<&str> {
    let mut forms = Vec::new();
    let mut rest = input;
    while let Some(open) = rest.find("^XA") {
        let form = &rest[open..];
        let len = form.find("^XZ").map_or(form.len(), |close| close + 3);
        forms.push(&form[..len]);
        rest = &form[len..];
    }
    if forms.is_empty() && !input.trim().is_empty() {
        forms.push(input);
    }
    forms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_trimmed_and_offsets_kept() {
        let input = "^XA\r\n  ^FO10,20^FDHi^FS  \n\n^XZ";
        let got = lines(input);
        assert_eq!(got.len(), 3);
        assert_eq!(got[1].text, "^FO10,20^FDHi^FS");
        assert_eq!(&input[got[1].start..got[1].end()], "^FO10,20^FDHi^FS");
        assert_eq!(got[2].text, "^XZ");
    }

    #[test]
    fn several_fields_on_one_line_are_split() {
        let input = "^FO1,1^FDA^FS^FO2,2^FDB^FS";
        let got: Vec<_> = lines(input).iter().map(|l| l.text).collect();
        assert_eq!(got, vec!["^FO1,1^FDA^FS", "^FO2,2^FDB^FS"]);
    }

    #[test]
    fn directives_split_on_leader() {
        let input = "x^FO10,20^A0N,30,20^FDHello^FS";
        let line = lines(input)[0];
        let got: Vec<_> = directives(&line).map(|d| (d.body, d.start)).collect();
        assert_eq!(
            got,
            vec![("FO10,20", 1), ("A0N,30,20", 9), ("FDHello", 19), ("FS", 27)]
        );
        let fs = directives(&line).last().unwrap();
        assert_eq!(fs.end(), input.len());
        assert!(fs.is("FS"));
    }

    #[test]
    fn uint_arguments() {
        assert_eq!(parse_uint(" 42 "), Some(42));
        assert_eq!(parse_uint("-1"), None);
        assert_eq!(parse_uint(""), None);
        assert_eq!(parse_uints::<2>("10,20,30"), Some([10, 20]));
        assert_eq!(parse_uints::<3>("10,20"), None);
        assert_eq!(parse_uints::<2>("10,x"), None);
    }

    #[test]
    fn forms_are_split() {
        let input = "^XA^FDa^FS^XZ\n^XA^FDb^FS^XZ\n";
        assert_eq!(split_forms(input), vec!["^XA^FDa^FS^XZ", "^XA^FDb^FS^XZ"]);
        assert_eq!(split_forms("^FDa^FS"), vec!["^FDa^FS"]);
        assert_eq!(split_forms("^XA^FDa^FS"), vec!["^XA^FDa^FS"]);
        assert!(split_forms("  \n").is_empty());
    }
}
