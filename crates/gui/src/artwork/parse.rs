//! SVG text → [`VectorDocument`]

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::document::{Element, ElementKind, LineCap, LineJoin, Node, Style, VectorDocument};
use super::paint::Paint;
use super::ArtworkError;

impl VectorDocument {
    /// Parse artwork markup. Presentation attributes and `style` declarations are folded into
    /// [`Style`]; declarations win over attributes.
    pub fn parse(svg: &str) -> Result<Self, ArtworkError> {
        if svg.trim().is_empty() {
            return Err(ArtworkError::Empty);
        }

        let mut reader = Reader::from_str(svg);
        reader.trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => stack.push(element_from_start(e)?),
                Event::Empty(ref e) => {
                    let element = element_from_start(e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| ArtworkError::Malformed("unbalanced end tag".into()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(ref e) => {
                    let text = e.unescape()?;
                    if let Some(parent) = stack.last_mut() {
                        if !text.is_empty() {
                            parent.children.push(Node::Text(text.into_owned()));
                        }
                    }
                }
                Event::CData(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(e).into_owned();
                        parent.children.push(Node::Text(text));
                    }
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(ArtworkError::Malformed("unclosed element".into()));
        }
        let root = root.ok_or(ArtworkError::Empty)?;
        if root.kind != ElementKind::Svg {
            return Err(ArtworkError::Malformed(format!(
                "root element is <{}>, expected <svg>",
                root.name
            )));
        }
        Ok(Self { root })
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ArtworkError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(ArtworkError::Malformed(
                "more than one top-level element".into(),
            ))
        }
    }
    Ok(())
}

fn element_from_start(e: &BytesStart<'_>) -> Result<Element, ArtworkError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    let mut style_decl: Option<String> = None;

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        if key == "style" {
            style_decl = Some(value);
        } else if !apply_property(&mut element.style, &key, &value) {
            element.attributes.push((key, value));
        }
    }

    if let Some(decl) = style_decl {
        for (prop, value) in parse_declarations(&decl) {
            if !apply_property(&mut element.style, &prop, &value) {
                element.style.extra.push((prop, value));
            }
        }
    }

    Ok(element)
}

/// Fold a paint property into `style`. Returns false for properties `Style` does not model.
fn apply_property(style: &mut Style, key: &str, value: &str) -> bool {
    match key {
        "fill" => style.fill = Some(Paint::parse(value)),
        "stroke" => style.stroke = Some(Paint::parse(value)),
        "stroke-width" => style.stroke_width = parse_length(value),
        "stroke-linejoin" => style.line_join = LineJoin::parse(value),
        "stroke-linecap" => style.line_cap = LineCap::parse(value),
        _ => return false,
    }
    true
}

fn parse_declarations(decl: &str) -> Vec<(String, String)> {
    decl.split(';')
        .filter_map(|d| {
            let (prop, value) = d.split_once(':')?;
            let prop = prop.trim();
            let value = value.trim();
            (!prop.is_empty()).then(|| (prop.to_string(), value.to_string()))
        })
        .collect()
}

fn parse_length(value: &str) -> Option<f64> {
    let v = value.trim();
    let v = v.strip_suffix("px").unwrap_or(v);
    v.trim().parse::<f64>().ok().filter(|w| w.is_finite())
}
