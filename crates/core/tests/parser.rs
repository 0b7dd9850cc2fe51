//! Integration tests for the directive parser.
//!
//! Covers: document setup, field origin and font inheritance, command
//! classification, span tracking, and diagnostics for skipped input.

mod common;

use common::{command_kinds, count_severity, extract_diag_codes};
use zpl_label_core::grammar::ast::{DrawCommand, FontSpec, Orientation, Point};
use zpl_label_core::grammar::parser::parse_str;
use zpl_label_core::symbology::Symbology;
use zpl_label_diagnostics::{Severity, codes};

// ─── Document setup ─────────────────────────────────────────────────────────

#[test]
fn dimensions_and_orientation() {
    let res = parse_str("^XA\n^PW240\n^LL160\n^POI\n^FDx^FS\n^XZ");
    assert_eq!(res.document.width_dots, 240);
    assert_eq!(res.document.height_dots, 160);
    assert_eq!(res.document.orientation, Orientation::Rotated);
    assert!(res.diagnostics.is_empty(), "{:?}", res.diagnostics);
}

#[test]
fn missing_dimensions_default_with_info() {
    let res = parse_str("^XA^FO1,1^FDhello^FS^XZ");
    assert_eq!(res.document.width_dots, 600);
    assert_eq!(res.document.height_dots, 400);
    assert_eq!(res.document.orientation, Orientation::Normal);
    let ids = extract_diag_codes(&res);
    assert_eq!(
        ids,
        vec![
            codes::PARSER_DIMENSION_MISSING,
            codes::PARSER_DIMENSION_MISSING
        ]
    );
    assert_eq!(count_severity(&res, Severity::Info), 2);
}

#[test]
fn empty_input_never_fails() {
    let res = parse_str("");
    assert!(res.commands.is_empty());
    let ids = extract_diag_codes(&res);
    assert!(ids.contains(&codes::PARSER_NO_FIELDS.to_string()));
}

// ─── Field state ────────────────────────────────────────────────────────────

#[test]
fn origin_is_inherited_until_next_fo() {
    let res = parse_str("^PW600^LL400\n^FO10,20\n^FDfirst^FS\n^FDsecond^FS\n^FO5,6^FDthird^FS");
    let origins: Vec<Point> = res.commands.iter().map(DrawCommand::origin).collect();
    assert_eq!(
        origins,
        vec![Point::new(10, 20), Point::new(10, 20), Point::new(5, 6)]
    );
}

#[test]
fn font_applies_before_field_on_same_line_and_persists() {
    let res = parse_str("^PW600^LL400\n^FO0,0^A0N,30,40^FDa^FS\n^FO0,50^FDb^FS");
    let fonts: Vec<_> = res
        .commands
        .iter()
        .map(|c| match c {
            DrawCommand::Text { font, .. } => font.clone(),
            _ => None,
        })
        .collect();
    let expected = FontSpec {
        family: "0N".into(),
        width: 30,
        height: 40,
    };
    assert_eq!(fonts, vec![Some(expected.clone()), Some(expected)]);
}

#[test]
fn malformed_origin_keeps_previous() {
    let res = parse_str("^PW600^LL400\n^FO7,8^FDa^FS\n^FOx,1^FDb^FS");
    assert_eq!(res.commands[1].origin(), Point::new(7, 8));
    assert_eq!(
        extract_diag_codes(&res),
        vec![codes::PARSER_MALFORMED_DIRECTIVE]
    );
    assert_eq!(count_severity(&res, Severity::Warn), 1);
}

// ─── Classification ─────────────────────────────────────────────────────────

#[test]
fn barcode_markers_select_symbology() {
    let input = "^PW600^LL400\n\
                 ^FO20,100^BY2^BCN,40,Y,N,N^FD123^FS\n\
                 ^FO20,100^B3N,N,100,Y,N^FDABC^FS\n\
                 ^FO20,100^BEN,100,Y,N^FD590123412345^FS\n\
                 ^FO20,100^BQN,2,6^FDQA,hello^FS\n\
                 ^FO20,100^BY3^FDplain^FS";
    let res = parse_str(input);
    let got: Vec<_> = res
        .commands
        .iter()
        .map(|c| match c {
            DrawCommand::Barcode {
                symbology, data, ..
            } => (Some(*symbology), data.as_str()),
            DrawCommand::Text { text, .. } => (None, text.as_str()),
            _ => panic!("unexpected {c:?}"),
        })
        .collect();
    assert_eq!(
        got,
        vec![
            (Some(Symbology::Code128), "123"),
            (Some(Symbology::Code39), "ABC"),
            (Some(Symbology::Ean13), "590123412345"),
            (Some(Symbology::Qr), "QA,hello"),
            (None, "plain"),
        ]
    );
}

#[test]
fn barcode_marker_after_field_data_is_text() {
    let res = parse_str("^PW600^LL400\n^FDabc^FS^BCN");
    assert_eq!(command_kinds(&res), vec!["text"]);
}

#[test]
fn graphic_box() {
    let res = parse_str("^PW600^LL400\n^FO10,10^GB580,380,3^FS");
    assert_eq!(
        res.commands,
        vec![DrawCommand::Box {
            origin: Point::new(10, 10),
            width: 580,
            height: 380,
            thickness: 3,
            span: res.commands[0].span(),
        }]
    );
}

#[test]
fn box_without_separator_is_ignored() {
    let res = parse_str("^PW600^LL400\n^FO10,10^GB580,380,3");
    assert!(res.commands.is_empty());
}

#[test]
fn several_fields_on_one_physical_line() {
    let res = parse_str("^PW600^LL400\n^FO1,2^FDa^FS^FO3,4^GB5,5,1^FS^FO6,7^BCN^FD9^FS");
    assert_eq!(command_kinds(&res), vec!["text", "box", "barcode"]);
    assert_eq!(res.commands[2].origin(), Point::new(6, 7));
}

#[test]
fn crlf_line_endings() {
    let res = parse_str("^XA\r\n^PW300\r\n^LL200\r\n^FO1,1^FDok^FS\r\n^XZ\r\n");
    assert_eq!(res.document.width_dots, 300);
    assert_eq!(command_kinds(&res), vec!["text"]);
}

// ─── Diagnostics ────────────────────────────────────────────────────────────

#[test]
fn unclosed_field_is_reported() {
    let input = "^PW600^LL400\n^FO1,1^FDnever closed";
    let res = parse_str(input);
    assert!(command_kinds(&res).is_empty());
    let diag = res
        .diagnostics
        .iter()
        .find(|d| d.id == codes::PARSER_FIELD_NOT_CLOSED)
        .expect("field-not-closed diagnostic");
    let span = diag.span.expect("span");
    assert_eq!(&input[span.start..span.end], "^FDnever closed");
}

#[test]
fn empty_field_is_reported() {
    let res = parse_str("^PW600^LL400\n^FO1,1^FD^FS\n^FO1,1^BQN^FD^FS");
    assert!(res.commands.is_empty());
    let ids = extract_diag_codes(&res);
    assert_eq!(
        ids.iter()
            .filter(|id| *id == codes::PARSER_EMPTY_FIELD_DATA)
            .count(),
        2
    );
}

#[test]
fn command_spans_cover_logical_lines() {
    let input = "^PW600^LL400\n  ^FO1,1^FDa^FS  \n";
    let res = parse_str(input);
    let span = res.commands[0].span();
    assert_eq!(&input[span.start..span.end], "^FO1,1^FDa^FS");
}

#[test]
fn unknown_directives_are_silent() {
    let res = parse_str("^PW600^LL400\n^MMT\n^CI28\n^FO1,1^FB100,1,0,C^FDa^FS");
    assert!(res.diagnostics.is_empty(), "{:?}", res.diagnostics);
    assert_eq!(command_kinds(&res), vec!["text"]);
}

#[test]
fn parse_result_serializes_with_kind_tags() {
    let res = parse_str("^PW600^LL400\n^FO1,2^BCN^FD12^FS");
    let json = zpl_label_core::to_pretty_json(&res).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["document"]["width_dots"], 600);
    assert_eq!(value["commands"][0]["kind"], "barcode");
    assert_eq!(value["commands"][0]["symbology"], "code128");
    assert_eq!(value["commands"][0]["origin"]["y"], 2);
}
