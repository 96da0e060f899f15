//! [`VectorDocument`] → SVG text

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::document::{Element, Node, Style, VectorDocument};
use super::ArtworkError;

impl VectorDocument {
    /// Serialize to markup. Typed paint properties are written as presentation attributes,
    /// the remaining `style` declarations as a `style` attribute.
    pub fn to_svg_string(&self) -> Result<String, ArtworkError> {
        let mut writer = Writer::new(Vec::new());
        write_element(&mut writer, &self.root)?;
        String::from_utf8(writer.into_inner())
            .map_err(|_| ArtworkError::Malformed("invalid UTF-8 in output".into()))
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), ArtworkError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    for (key, value) in style_attributes(&element.style) {
        start.push_attribute((key, value.as_str()));
    }

    if element.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| ArtworkError::Xml(e.into()))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| ArtworkError::Xml(e.into()))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| ArtworkError::Xml(e.into()))?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| ArtworkError::Xml(e.into()))?;
    Ok(())
}

fn style_attributes(style: &Style) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();
    if let Some(fill) = &style.fill {
        out.push(("fill", fill.to_string()));
    }
    if let Some(stroke) = &style.stroke {
        out.push(("stroke", stroke.to_string()));
    }
    if let Some(width) = style.stroke_width {
        out.push(("stroke-width", format_number(width)));
    }
    if let Some(join) = style.line_join {
        out.push(("stroke-linejoin", join.as_str().to_string()));
    }
    if let Some(cap) = style.line_cap {
        out.push(("stroke-linecap", cap.as_str().to_string()));
    }
    if !style.extra.is_empty() {
        let decl = style
            .extra
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        out.push(("style", decl));
    }
    out
}

/// Integers without a fractional part, everything else trimmed to 4 decimals
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
