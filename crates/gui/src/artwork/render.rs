//! Per-frame recolor/reshape of tooth-part artwork.
//!
//! [`render`] never touches the stored document: every call starts from a fresh clone of the
//! raw artwork, so nothing from a previous selection, hover, or shape variant carries over.

use shared::{PartKind, PartTransform, ShapeVariant};

use super::document::{Element, ElementKind, LineCap, LineJoin, Node, VectorDocument};
use super::paint::{Paint, Rgb};
use super::write::format_number;

pub const NORMALIZED_STROKE_WIDTH: f64 = 2.0;

/// Transient per-part view flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderState {
    pub selected: bool,
    pub hovered: bool,
}

/// Display size and coordinate box for a part kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtworkFrame {
    pub width: f32,
    pub height: f32,
    pub view_box: &'static str,
}

pub fn frame(kind: PartKind) -> ArtworkFrame {
    match kind {
        PartKind::Crown => ArtworkFrame {
            width: 50.0,
            height: 45.0,
            view_box: "0 0 54 55",
        },
        PartKind::Root => ArtworkFrame {
            width: 50.0,
            height: 55.0,
            view_box: "0 0 44 59",
        },
    }
}

/// Blue for crowns, green for roots
pub fn selection_color(kind: PartKind) -> Rgb {
    match kind {
        PartKind::Crown => Rgb::new(0x3B, 0x82, 0xF6),
        PartKind::Root => Rgb::new(0x10, 0xB9, 0x81),
    }
}

/// Lighter tint of the selection color
pub fn hover_color(kind: PartKind) -> Rgb {
    match kind {
        PartKind::Crown => Rgb::new(0x93, 0xC5, 0xFD),
        PartKind::Root => Rgb::new(0x6E, 0xE7, 0xB7),
    }
}

/// Produce the display document for one part, or `None` when there is nothing to draw.
pub fn render(
    raw: &VectorDocument,
    kind: PartKind,
    state: RenderState,
    transform: &PartTransform,
) -> Option<VectorDocument> {
    if raw.is_empty() {
        return None;
    }

    let mut doc = raw.clone();
    normalize_paint(&mut doc);
    apply_shape(&mut doc, kind, transform.shape);

    if state.selected {
        let color = selection_color(kind);
        doc.for_each_primitive_mut(|e| {
            if e.style.fill.as_ref().is_some_and(|p| p.is_color(Rgb::WHITE)) {
                e.style.fill = Some(Paint::Color(color));
            }
            if e.style.stroke.as_ref().is_some_and(|p| p.is_color(Rgb::BLACK)) {
                e.style.stroke = Some(Paint::Color(color));
            }
        });
    } else if state.hovered {
        let color = hover_color(kind);
        doc.for_each_primitive_mut(|e| {
            if e.style.fill.as_ref().is_some_and(|p| p.is_color(Rgb::WHITE)) {
                e.style.fill = Some(Paint::Color(color));
            }
        });
    }

    Some(doc)
}

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Size the root `<svg>` to the kind's display frame and make it a standalone SVG document
pub fn fit_frame(doc: &mut VectorDocument, kind: PartKind) {
    if doc.root.attr("xmlns").is_none() {
        doc.root.set_attr("xmlns", SVG_NAMESPACE);
    }
    let f = frame(kind);
    doc.root.set_attr("width", format_number(f.width as f64));
    doc.root.set_attr("height", format_number(f.height as f64));
    doc.root.set_attr("viewBox", f.view_box);
}

fn normalize_paint(doc: &mut VectorDocument) {
    doc.root.walk_mut(&mut |e: &mut Element| {
        if e.kind.is_primitive() {
            e.style.fill = Some(Paint::Color(Rgb::WHITE));
            e.style.stroke = Some(Paint::Color(Rgb::BLACK));
            e.style.stroke_width = Some(NORMALIZED_STROKE_WIDTH);
        } else if e.kind.is_container() {
            // Inherited paint would otherwise leak into text and unknown children
            e.style.clear_paint();
        }
    });
}

fn apply_shape(doc: &mut VectorDocument, kind: PartKind, shape: ShapeVariant) {
    match (kind, shape) {
        (PartKind::Crown, ShapeVariant::Round) => {
            crown_corners(doc, 8.0, LineJoin::Round, LineCap::Round)
        }
        (PartKind::Crown, ShapeVariant::Square) => {
            crown_corners(doc, 1.0, LineJoin::Miter, LineCap::Square)
        }
        (PartKind::Crown, ShapeVariant::Pointed) => {
            crown_corners(doc, 0.0, LineJoin::Miter, LineCap::Butt)
        }
        (PartKind::Root, ShapeVariant::Thin) => wrap_content(doc, "scale(0.7, 1)"),
        (PartKind::Root, ShapeVariant::Thick) => wrap_content(doc, "scale(1.3, 1)"),
        (PartKind::Root, ShapeVariant::Curved) => {
            doc.for_each_primitive_mut(|e| {
                if e.kind == ElementKind::Path {
                    e.style.line_join = Some(LineJoin::Round);
                    e.style.line_cap = Some(LineCap::Round);
                }
            });
            wrap_content(doc, "skewX(5)");
        }
        // Default, or a variant that belongs to the other kind
        _ => {}
    }
}

fn crown_corners(doc: &mut VectorDocument, radius: f64, join: LineJoin, cap: LineCap) {
    let radius = format_number(radius);
    doc.for_each_primitive_mut(|e| match e.kind {
        ElementKind::Rect => {
            e.set_attr("rx", radius.as_str());
            e.set_attr("ry", radius.as_str());
        }
        ElementKind::Path => {
            e.style.line_join = Some(join);
            e.style.line_cap = Some(cap);
        }
        _ => {}
    });
}

fn wrap_content(doc: &mut VectorDocument, transform: &str) {
    let mut group = Element::new("g");
    group.set_attr("transform", transform);
    group.children = std::mem::take(&mut doc.root.children);
    doc.root.children.push(Node::Element(group));
}
