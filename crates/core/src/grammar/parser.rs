use super::{
    ast::{
        DEFAULT_HEIGHT_DOTS, DEFAULT_WIDTH_DOTS, DrawCommand, FontSpec, LabelDocument,
        Orientation, Point,
    },
    diag::{Diagnostic, Span, codes},
    lexer::{Directive, Line, directives, lines, parse_uint, parse_uints},
};
use crate::symbology::Symbology;

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Result of parsing a ZPL input string.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ParseResult {
    /// Document-level setup, with defaults applied.
    pub document: LabelDocument,
    /// Drawable fields in document order.
    pub commands: Vec<DrawCommand>,
    /// Findings about skipped or defaulted input. Never fatal.
    pub diagnostics: Vec<Diagnostic>,
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse ZPL text into a document and its draw commands.
///
/// Never fails: directives with unusable arguments are skipped (and
/// reported), unknown directives are ignored, and missing label dimensions
/// fall back to 600 x 400 dots.
pub fn parse_str(input: &str) -> ParseResult {
    lines(input)
        .iter()
        .fold(Fold::default(), Fold::apply_line)
        .finish()
}

// ─── Fold State ─────────────────────────────────────────────────────────────

/// Accumulator threaded through the lines of one document.
///
/// Field origin and font persist from line to line until a later `^FO` or
/// `^A` replaces them.
#[derive(Default)]
struct Fold {
    width: Option<u32>,
    height: Option<u32>,
    orientation: Option<Orientation>,
    origin: Point,
    font: Option<FontSpec>,
    commands: Vec<DrawCommand>,
    diagnostics: Vec<Diagnostic>,
}

/// Which barcode markers appeared before the field data.
#[derive(Default)]
struct BarcodeMarkers {
    qr: bool,
    code39: bool,
    ean13: bool,
    code128: bool,
}

impl BarcodeMarkers {
    fn any(&self) -> bool {
        self.qr || self.code39 || self.ean13 || self.code128
    }

    fn symbology(&self) -> Symbology {
        if self.qr {
            Symbology::Qr
        } else if self.code39 {
            Symbology::Code39
        } else if self.ean13 {
            Symbology::Ean13
        } else {
            Symbology::Code128
        }
    }
}

impl Fold {
    fn apply_line(mut self, line: &Line<'_>) -> Self {
        let dirs: Vec<Directive<'_>> = directives(line).collect();
        self.apply_setup(&dirs);
        self.apply_origin(&dirs);
        self.apply_font(&dirs);
        self.classify(line, &dirs);
        self
    }

    fn finish(mut self) -> ParseResult {
        if self.width.is_none() {
            self.diagnostics.push(
                Diagnostic::info(
                    codes::PARSER_DIMENSION_MISSING,
                    format!("no ^PW found; using default width of {DEFAULT_WIDTH_DOTS} dots"),
                    None,
                )
                .with_context(ctx!(
                    "directive" => "^PW",
                    "default" => DEFAULT_WIDTH_DOTS.to_string(),
                )),
            );
        }
        if self.height.is_none() {
            self.diagnostics.push(
                Diagnostic::info(
                    codes::PARSER_DIMENSION_MISSING,
                    format!("no ^LL found; using default length of {DEFAULT_HEIGHT_DOTS} dots"),
                    None,
                )
                .with_context(ctx!(
                    "directive" => "^LL",
                    "default" => DEFAULT_HEIGHT_DOTS.to_string(),
                )),
            );
        }
        if self.commands.is_empty() {
            self.diagnostics.push(Diagnostic::info(
                codes::PARSER_NO_FIELDS,
                "no drawable fields found",
                None,
            ));
        }

        ParseResult {
            document: LabelDocument {
                width_dots: self.width.unwrap_or(DEFAULT_WIDTH_DOTS),
                height_dots: self.height.unwrap_or(DEFAULT_HEIGHT_DOTS),
                orientation: self.orientation.unwrap_or_default(),
            },
            commands: self.commands,
            diagnostics: self.diagnostics,
        }
    }

    // ── Document setup ──────────────────────────────────────────────────

    fn apply_setup(&mut self, dirs: &[Directive<'_>]) {
        for d in dirs {
            if let Some(args) = d.strip("PW") {
                match dimension(args) {
                    Some(n) => set_once(&mut self.width, n, "^PW", d, &mut self.diagnostics),
                    None => self.malformed(d, "^PW", "expected a width of 1 to 32000 dots"),
                }
            } else if let Some(args) = d.strip("LL") {
                match dimension(args) {
                    Some(n) => set_once(&mut self.height, n, "^LL", d, &mut self.diagnostics),
                    None => self.malformed(d, "^LL", "expected a length of 1 to 32000 dots"),
                }
            } else if let Some(args) = d.strip("PO") {
                let orientation = match args.trim() {
                    "N" => Orientation::Normal,
                    "I" => Orientation::Rotated,
                    _ => {
                        self.malformed(d, "^PO", "expected N or I");
                        continue;
                    }
                };
                set_once(
                    &mut self.orientation,
                    orientation,
                    "^PO",
                    d,
                    &mut self.diagnostics,
                );
            }
        }
    }

    // ── Field state ─────────────────────────────────────────────────────

    fn apply_origin(&mut self, dirs: &[Directive<'_>]) {
        for d in dirs {
            let Some(args) = d.strip("FO") else { continue };
            match parse_uints::<2>(args) {
                Some([x, y]) => {
                    self.origin = Point::new(x, y);
                    return;
                }
                None => self.malformed(d, "^FO", "expected ^FO<x>,<y>"),
            }
        }
    }

    fn apply_font(&mut self, dirs: &[Directive<'_>]) {
        for d in dirs {
            let Some(args) = d.strip("A") else { continue };
            // ^A@ and similar select fonts by name; only ^A<alnum> is a font size.
            if !args.starts_with(|c: char| c.is_ascii_alphanumeric()) {
                continue;
            }
            let parsed = args.split_once(',').and_then(|(family, sizes)| {
                if !family.bytes().all(|b| b.is_ascii_alphanumeric()) {
                    return None;
                }
                let [width, height] = parse_uints::<2>(sizes)?;
                Some(FontSpec {
                    family: family.to_string(),
                    width,
                    height,
                })
            });
            match parsed {
                Some(font) => {
                    self.font = Some(font);
                    return;
                }
                None => self.malformed(d, "^A", "expected ^A<font>,<width>,<height>"),
            }
        }
    }

    // ── Field classification ────────────────────────────────────────────

    fn classify(&mut self, line: &Line<'_>, dirs: &[Directive<'_>]) {
        let span = Span::new(line.start, line.end());
        let field = dirs.iter().position(|d| d.body.starts_with("FD"));

        let mut markers = BarcodeMarkers::default();
        for d in &dirs[..field.unwrap_or(0)] {
            markers.qr |= d.body.starts_with("BQ");
            markers.code39 |= d.body.starts_with("B3");
            markers.ean13 |= d.body.starts_with("BE");
            markers.code128 |= d.body.starts_with("BC");
        }

        let closed = field.and_then(|i| {
            let data = dirs[i].strip("FD")?;
            dirs.get(i + 1).filter(|next| next.is("FS")).map(|_| data)
        });

        if let (Some(data), true) = (closed, markers.any()) {
            if self.non_empty(data, &dirs[field.unwrap_or(0)]) {
                self.commands.push(DrawCommand::Barcode {
                    origin: self.origin,
                    symbology: markers.symbology(),
                    data: data.to_string(),
                    span,
                });
            }
            return;
        }

        let has_separator = dirs.iter().any(|d| d.is("FS"));
        if let Some(gb) = dirs.iter().find(|d| d.body.starts_with("GB"))
            && has_separator
        {
            match gb.strip("GB").and_then(parse_uints::<3>) {
                Some([width, height, thickness]) => self.commands.push(DrawCommand::Box {
                    origin: self.origin,
                    width,
                    height,
                    thickness,
                    span,
                }),
                None => self.malformed(gb, "^GB", "expected ^GB<width>,<height>,<thickness>"),
            }
            return;
        }

        match (closed, field) {
            (Some(text), Some(i)) => {
                if self.non_empty(text, &dirs[i]) {
                    self.commands.push(DrawCommand::Text {
                        origin: self.origin,
                        text: text.to_string(),
                        font: self.font.clone(),
                        span,
                    });
                }
            }
            (None, Some(i)) => {
                let d = &dirs[i];
                self.diagnostics.push(
                    Diagnostic::warn(
                        codes::PARSER_FIELD_NOT_CLOSED,
                        "field data is not followed by ^FS; field skipped",
                        Some(Span::new(d.start, d.end())),
                    )
                    .with_context(ctx!("directive" => "^FD")),
                );
            }
            _ => {}
        }
    }

    // ── Diagnostics helpers ─────────────────────────────────────────────

    fn non_empty(&mut self, data: &str, fd: &Directive<'_>) -> bool {
        if !data.trim().is_empty() {
            return true;
        }
        self.diagnostics.push(
            Diagnostic::warn(
                codes::PARSER_EMPTY_FIELD_DATA,
                "field data is empty; field skipped",
                Some(Span::new(fd.start, fd.end())),
            )
            .with_context(ctx!("directive" => "^FD")),
        );
        false
    }

    fn malformed(&mut self, d: &Directive<'_>, code: &str, expected: &str) {
        self.diagnostics.push(
            Diagnostic::warn(
                codes::PARSER_MALFORMED_DIRECTIVE,
                format!("{code}: {expected}; directive skipped"),
                Some(Span::new(d.start, d.end())),
            )
            .with_context(ctx!("directive" => code, "found" => format!("^{}", d.body))),
        );
    }
}

/// Record a document setup value; the first occurrence wins.
fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    code: &str,
    d: &Directive<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) where
    T: Copy + PartialEq + std::fmt::Debug,
{
    match slot {
        None => *slot = Some(value),
        Some(first) if *first != value => diagnostics.push(
            Diagnostic::info(
                codes::PARSER_CONFLICTING_SETUP,
                format!("{code} repeated with a different value; keeping the first"),
                Some(Span::new(d.start, d.end())),
            )
            .with_context(ctx!(
                "directive" => code,
                "kept" => format!("{first:?}"),
                "ignored" => format!("{value:?}"),
            )),
        ),
        Some(_) => {}
    }
}

/// Largest `^PW` / `^LL` value a printer accepts.
const MAX_DIMENSION_DOTS: u32 = 32_000;

fn dimension(args: &str) -> Option<u32> {
    parse_uint(args).filter(|n| (1..=MAX_DIMENSION_DOTS).contains(n))
}
