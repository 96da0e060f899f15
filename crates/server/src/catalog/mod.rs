//! Artwork catalog: maps tooth numbers to crown/root SVG resources by filename convention

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use shared::{PartKind, TeethCatalog, ToothId};

use crate::error::CatalogError;

/// URL prefix the artwork directory is served under
pub const ARTWORK_ROUTE: &str = "/dental";

// "teeth 11 crown.svg", "teeth 11 root.svg", "teeth 11 crown-1.svg", "teeth 11  crown.svg"
static ARTWORK_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"teeth\s+(\d+)\s+(crown-1|crown|root)\.svg$").expect("artwork filename pattern")
});

/// A filename that matched the naming convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkFile {
    pub tooth: ToothId,
    pub kind: PartKind,
    /// `crown-1` style alternate name, used only when no primary file exists
    pub alternate: bool,
}

/// Parse an artwork filename. Non-conforming names and non-FDI numbers yield `None`.
pub fn parse_artwork_filename(name: &str) -> Option<ArtworkFile> {
    let caps = ARTWORK_FILE.captures(name)?;
    let tooth = ToothId::parse(&caps[1]).ok()?;
    let (kind, alternate) = match &caps[2] {
        "crown" => (PartKind::Crown, false),
        "crown-1" => (PartKind::Crown, true),
        _ => (PartKind::Root, false),
    };
    Some(ArtworkFile {
        tooth,
        kind,
        alternate,
    })
}

/// Scan the artwork directory and build the tooth catalog
pub fn scan_catalog(dir: &Path) -> Result<TeethCatalog, CatalogError> {
    let entries = std::fs::read_dir(dir).map_err(|source| CatalogError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| name.ends_with(".svg"))
        .collect();
    names.sort();

    let mut catalog = TeethCatalog::new();
    for name in names {
        let Some(file) = parse_artwork_filename(&name) else {
            tracing::debug!("Ignoring artwork file {name}");
            continue;
        };
        let record = catalog.entry(file.tooth).or_default();
        if file.alternate && record.get(file.kind).is_some() {
            continue;
        }
        record.set(file.kind, resource_path(&name));
    }

    tracing::debug!("Catalog scan found {} teeth in {}", catalog.len(), dir.display());
    Ok(catalog)
}

/// `/dental/<percent-encoded filename>`
pub fn resource_path(file_name: &str) -> String {
    format!("{ARTWORK_ROUTE}/{}", encode_component(file_name))
}

// Same unreserved set as JavaScript's encodeURIComponent
fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
