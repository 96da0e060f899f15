//! Vector artwork for tooth parts.
//!
//! Raw SVG text is parsed once into a [`VectorDocument`] whose paint attributes are typed
//! ([`Style`]), so the per-frame recolor/reshape pass in [`render`] works on structure
//! instead of rewriting markup.

mod document;
mod paint;
mod parse;
mod render;
mod write;

pub use document::{Element, ElementKind, LineCap, LineJoin, Node, Style, VectorDocument};
pub use paint::{Paint, Rgb};
pub use render::{
    fit_frame, frame, hover_color, render, selection_color, ArtworkFrame, RenderState,
    NORMALIZED_STROKE_WIDTH, SVG_NAMESPACE,
};

use thiserror::Error;

/// Errors from parsing or writing artwork
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// Document has no content (not yet loaded, or blank response)
    #[error("artwork document is empty")]
    Empty,

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Well-formed XML that is not usable artwork
    #[error("malformed artwork: {0}")]
    Malformed(String),
}
