//! Generator tests, including reading generated ZPL back through the parser.

mod common;

use common::command_kinds;
use zpl_label_core::grammar::ast::{DrawCommand, Orientation};
use zpl_label_core::{
    GenerateOptions, LabelError, LabelFormat, PrintOrientation, RenderOptions, Symbology,
    generate, parse_codes, parse_str, render_forms, split_forms,
};

const TS: &str = "2024-05-01 12:30";

#[test]
fn every_format_declares_its_dimensions() {
    for format in LabelFormat::ALL {
        let opts = GenerateOptions {
            format,
            ..GenerateOptions::default()
        };
        let zpl = generate(&["123"], &opts, TS).unwrap();
        let (w, h) = format.dimensions();
        assert!(zpl.contains(&format!("^PW{w}")), "{format}: {zpl}");
        assert!(zpl.contains(&format!("^LL{h}")), "{format}: {zpl}");
    }
}

#[test]
fn auto_round_trips_to_600_by_400() {
    let zpl = generate(&["123456789"], &GenerateOptions::default(), TS).unwrap();
    assert!(zpl.contains("^PW600") && zpl.contains("^LL400"));
    let res = parse_str(&zpl);
    assert_eq!(res.document.width_dots, 600);
    assert_eq!(res.document.height_dots, 400);
    assert_eq!(res.document.orientation, Orientation::Rotated);
    assert!(res.diagnostics.is_empty(), "{:?}", res.diagnostics);
}

#[test]
fn generated_fields_parse_back_in_order() {
    for barcode in Symbology::ALL {
        let opts = GenerateOptions {
            barcode,
            orientation: PrintOrientation::Portrait,
            format: LabelFormat::Mm80x50,
        };
        let zpl = generate(&["4006381333931"], &opts, TS).unwrap();
        let res = parse_str(&zpl);
        assert_eq!(command_kinds(&res), vec!["text", "barcode", "text"]);
        assert_eq!(res.document.orientation, Orientation::Normal);
        match &res.commands[1] {
            DrawCommand::Barcode {
                symbology, data, ..
            } => {
                assert_eq!(*symbology, barcode);
                assert_eq!(data, "4006381333931");
            }
            other => panic!("expected barcode, got {other:?}"),
        }
        match &res.commands[2] {
            DrawCommand::Text { text, .. } => assert_eq!(text, TS),
            other => panic!("expected timestamp, got {other:?}"),
        }
    }
}

#[test]
fn codes_from_user_input_become_forms() {
    let codes = parse_codes("111111, 222222\n333333");
    let zpl = generate(&codes, &GenerateOptions::default(), TS).unwrap();
    let forms = split_forms(&zpl);
    assert_eq!(forms.len(), 3);
    assert!(forms[2].contains("^FD333333^FS"));

    let previews = render_forms(&zpl, &RenderOptions::with_scale(1.0));
    assert_eq!(previews.len(), 3);
    assert!(previews.iter().all(|p| p.canvas.black_pixels() > 0));
}

#[test]
fn separator_only_input_is_invalid() {
    let codes = parse_codes(" ,, \n ");
    assert!(codes.is_empty());
    assert!(matches!(
        generate(&codes, &GenerateOptions::default(), TS),
        Err(LabelError::InvalidInput(_))
    ));
}
