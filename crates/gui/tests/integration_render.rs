//! Integration tests for the artwork engine: raw markup in, display-ready markup out.

use dental_gui_lib::artwork::{
    fit_frame, render, ElementKind, LineJoin, Paint, RenderState, Rgb, VectorDocument,
};
use dental_gui_lib::fixtures::{CROWN_SVG, ROOT_SVG};
use shared::{PartKind, PartTransform, ShapeVariant};

fn display(raw: &str, kind: PartKind, state: RenderState, shape: ShapeVariant) -> VectorDocument {
    let doc = VectorDocument::parse(raw).unwrap();
    let transform = PartTransform {
        shape,
        ..PartTransform::default()
    };
    let mut out = render(&doc, kind, state, &transform).unwrap();
    fit_frame(&mut out, kind);
    out
}

#[test]
fn test_render_idle_crown_is_outlined_white() {
    let doc = display(CROWN_SVG, PartKind::Crown, RenderState::default(), ShapeVariant::Default);
    for el in doc.primitives() {
        assert_eq!(el.style.fill, Some(Paint::Color(Rgb::WHITE)));
        assert_eq!(el.style.stroke, Some(Paint::Color(Rgb::BLACK)));
        assert_eq!(el.style.stroke_width, Some(2.0));
    }
    assert_eq!(doc.root.attr("viewBox"), Some("0 0 54 55"));
    assert_eq!(doc.root.attr("width"), Some("50"));
    assert_eq!(doc.root.attr("height"), Some("45"));
}

#[test]
fn test_render_selection_beats_hover() {
    let state = RenderState {
        selected: true,
        hovered: true,
    };
    let doc = display(ROOT_SVG, PartKind::Root, state, ShapeVariant::Default);
    let green = Rgb::new(0x10, 0xB9, 0x81);
    for el in doc.primitives() {
        assert_eq!(el.style.fill, Some(Paint::Color(green)));
        assert_eq!(el.style.stroke, Some(Paint::Color(green)));
    }
}

#[test]
fn test_render_hover_tints_fill_only() {
    let state = RenderState {
        selected: false,
        hovered: true,
    };
    let doc = display(CROWN_SVG, PartKind::Crown, state, ShapeVariant::Default);
    for el in doc.primitives() {
        assert_eq!(el.style.fill, Some(Paint::Color(Rgb::new(0x93, 0xC5, 0xFD))));
        assert_eq!(el.style.stroke, Some(Paint::Color(Rgb::BLACK)));
    }
}

#[test]
fn test_render_square_crown_output_markup() {
    let doc = display(CROWN_SVG, PartKind::Crown, RenderState::default(), ShapeVariant::Square);
    let rect = doc
        .primitives()
        .into_iter()
        .find(|el| el.kind == ElementKind::Rect)
        .unwrap();
    assert_eq!(rect.attr("rx"), Some("1"));
    assert_eq!(rect.style.line_join, Some(LineJoin::Miter));

    let svg = doc.to_svg_string().unwrap();
    assert!(svg.contains(r#"stroke-linejoin="miter""#));
    assert!(svg.contains(r#"rx="1""#));
}

#[test]
fn test_render_thick_root_wraps_content() {
    let doc = display(ROOT_SVG, PartKind::Root, RenderState::default(), ShapeVariant::Thick);
    let svg = doc.to_svg_string().unwrap();
    assert!(svg.contains("scale(1.3, 1)"));
    // Output stays parseable
    assert!(VectorDocument::parse(&svg).is_ok());
}

#[test]
fn test_render_empty_and_malformed_input() {
    assert!(VectorDocument::parse("").is_err());
    assert!(VectorDocument::parse("<svg><path></svg>").is_err());
    assert!(VectorDocument::parse("<html/>").is_err());
}
