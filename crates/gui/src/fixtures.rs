//! Factory functions for chart test data.
//!
//! Artwork, catalogs and layouts used by unit tests, integration tests and the headless
//! harness.

use shared::{
    ArtworkRecord, DefaultLayout, Offset, PartKey, PartKind, PartMap, PartTransform, TeethCatalog,
    ToothId,
};

use crate::backend::ApiResult;

/// Crown outline: a rounded body and a fissure line
pub const CROWN_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 54 55">
  <rect x="4" y="4" width="46" height="47" rx="4" fill="#f5f5f5" stroke="#333"/>
  <path d="M12 20 Q27 30 42 20" fill="none"/>
</svg>"##;

/// Root outline: a single tapered path
pub const ROOT_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 44 59">
  <g id="root">
    <path d="M6 2 L22 57 L38 2 Z" style="fill:#eee;stroke:#222;stroke-width:1"/>
  </g>
</svg>"##;

// ── Identifiers ─────────────────────────────────────────────────

/// Tooth by FDI code. Panics on codes outside the chart.
pub fn tooth(code: u8) -> ToothId {
    ToothId::new(code).unwrap_or_else(|| panic!("{code} is not an FDI tooth code"))
}

pub fn part(code: u8, kind: PartKind) -> PartKey {
    PartKey::new(tooth(code), kind)
}

// ── Catalogs ────────────────────────────────────────────────────

/// Resource path the server hands out for a part
pub fn artwork_path(tooth: ToothId, kind: PartKind) -> String {
    format!("/dental/teeth%20{}%20{}.svg", tooth, kind.as_str())
}

/// Every tooth with both crown and root artwork
pub fn full_catalog() -> TeethCatalog {
    ToothId::all()
        .map(|t| {
            (
                t,
                ArtworkRecord {
                    crown: Some(artwork_path(t, PartKind::Crown)),
                    root: Some(artwork_path(t, PartKind::Root)),
                },
            )
        })
        .collect()
}

/// Full catalog minus the given parts
pub fn catalog_without(parts: &[PartKey]) -> TeethCatalog {
    let mut catalog = full_catalog();
    for key in parts {
        if let Some(record) = catalog.get_mut(&key.tooth) {
            match key.kind {
                PartKind::Crown => record.crown = None,
                PartKind::Root => record.root = None,
            }
        }
    }
    catalog
}

/// Markup for a resource path produced by [`artwork_path`]
pub fn svg_for_path(path: &str) -> ApiResult<String> {
    if path.contains("crown") {
        Ok(CROWN_SVG.to_string())
    } else {
        Ok(ROOT_SVG.to_string())
    }
}

// ── Layouts ─────────────────────────────────────────────────────

pub fn layout_with_offset(key: PartKey, x: f64, y: f64) -> DefaultLayout {
    let mut positions = PartMap::new();
    positions.insert(key, Offset::new(x, y));
    DefaultLayout::new(positions, PartMap::new())
}

pub fn layout_with_transform(key: PartKey, transform: PartTransform) -> DefaultLayout {
    let mut transforms = PartMap::new();
    transforms.insert(key, transform);
    DefaultLayout::new(PartMap::new(), transforms)
}
