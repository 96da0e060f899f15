//! Общие типы зубной карты: модель данных и тела HTTP-запросов

pub mod api;
pub mod layout;
pub mod tooth;

pub use api::{ApiAck, ApiErrorBody, ArtworkRecord, SaveSelectionsRequest, SetDefaultsRequest, TeethCatalog};
pub use layout::{
    clamp_scale, normalize_rotation, snap_scale, DefaultLayout, MissingFlag, Offset, PartMap, PartTransform,
    MAX_SCALE, MIN_SCALE, SCALE_STEP,
};
pub use tooth::{Arch, InvalidToothId, PartKey, PartKind, ShapeVariant, ToothId, LOWER_ARCH, UPPER_ARCH};

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: serde::Serialize + for<'de> serde::Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    fn tooth(code: u8) -> ToothId {
        ToothId::new(code).unwrap()
    }

    // --- ToothId ---

    #[test]
    fn test_tooth_id_accepts_fdi_codes_only() {
        assert!(ToothId::new(11).is_some());
        assert!(ToothId::new(48).is_some());
        assert!(ToothId::new(10).is_none());
        assert!(ToothId::new(19).is_none());
        assert!(ToothId::new(51).is_none());
        assert!(ToothId::parse("x1").is_err());
        assert_eq!(ToothId::parse(" 36 ").unwrap(), tooth(36));
    }

    #[test]
    fn test_all_teeth_count() {
        assert_eq!(ToothId::all().count(), 32);
        assert_eq!(PartKey::all().count(), 64);
    }

    #[test]
    fn test_arch_of_tooth() {
        assert_eq!(tooth(18).arch(), Arch::Upper);
        assert_eq!(tooth(21).arch(), Arch::Upper);
        assert_eq!(tooth(31).arch(), Arch::Lower);
        assert_eq!(tooth(48).arch(), Arch::Lower);
        assert_eq!(Arch::Upper.stacking(), [PartKind::Root, PartKind::Crown]);
    }

    #[test]
    fn test_tooth_id_serializes_as_string() {
        assert_eq!(serde_json::to_string(&tooth(11)).unwrap(), r#""11""#);
        assert!(serde_json::from_str::<ToothId>(r#""99""#).is_err());
    }

    // --- Shape cycle ---

    #[test]
    fn test_crown_shape_cycle() {
        let k = PartKind::Crown;
        assert_eq!(k.next_shape(ShapeVariant::Default), ShapeVariant::Round);
        assert_eq!(k.next_shape(ShapeVariant::Round), ShapeVariant::Square);
        assert_eq!(k.next_shape(ShapeVariant::Square), ShapeVariant::Pointed);
        assert_eq!(k.next_shape(ShapeVariant::Pointed), ShapeVariant::Default);
    }

    #[test]
    fn test_root_shape_cycle() {
        let k = PartKind::Root;
        assert_eq!(k.next_shape(ShapeVariant::Default), ShapeVariant::Thin);
        assert_eq!(k.next_shape(ShapeVariant::Thin), ShapeVariant::Thick);
        assert_eq!(k.next_shape(ShapeVariant::Thick), ShapeVariant::Curved);
        assert_eq!(k.next_shape(ShapeVariant::Curved), ShapeVariant::Default);
    }

    #[test]
    fn test_foreign_shape_restarts_cycle() {
        assert_eq!(PartKind::Crown.next_shape(ShapeVariant::Thin), ShapeVariant::Default);
    }

    // --- Transform ---

    #[test]
    fn test_scale_steps_and_clamps() {
        let mut t = PartTransform::default();
        for _ in 0..3 {
            t = t.with_scale_delta(SCALE_STEP);
        }
        assert_eq!(t.scale, 1.3);
        t = t.with_scale_delta(-SCALE_STEP);
        assert_eq!(t.scale, 1.2);
        for _ in 0..20 {
            t = t.with_scale_delta(SCALE_STEP);
        }
        assert_eq!(t.scale, MAX_SCALE);
        for _ in 0..40 {
            t = t.with_scale_delta(-SCALE_STEP);
        }
        assert_eq!(t.scale, MIN_SCALE);
    }

    #[test]
    fn test_rotation_normalized() {
        let t = PartTransform::default().with_rotation_delta(-15.0);
        assert_eq!(t.rotation, 345.0);
        let t = t.with_rotation_delta(30.0);
        assert_eq!(t.rotation, 15.0);
        assert_eq!(normalize_rotation(720.0), 0.0);
    }

    #[test]
    fn test_transform_wire_format() {
        let t = PartTransform { scale: 1.5, rotation: 0.0, shape: ShapeVariant::Round };
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains(r#""shape":"round""#));
        let partial: PartTransform = serde_json::from_str(r#"{"shape":"thin"}"#).unwrap();
        assert_eq!(partial.scale, 1.0);
        assert_eq!(partial.shape, ShapeVariant::Thin);
    }

    #[test]
    fn test_sanitized_restores_invariants() {
        let t = PartTransform { scale: 9.0, rotation: -90.0, shape: ShapeVariant::Default }.sanitized();
        assert_eq!(t.scale, MAX_SCALE);
        assert_eq!(t.rotation, 270.0);
    }

    #[test]
    fn test_sanitized_keeps_in_range_scale() {
        let t = PartTransform { scale: 1.25, rotation: 0.0, shape: ShapeVariant::Default }.sanitized();
        assert_eq!(t.scale, 1.25);
        assert_eq!(clamp_scale(0.2), MIN_SCALE);
        assert_eq!(snap_scale(1.34), 1.3);
    }

    // --- PartMap ---

    #[test]
    fn test_part_map_nested_json() {
        let mut m = PartMap::new();
        m.insert(PartKey::new(tooth(11), PartKind::Crown), Offset::new(5.0, 3.0));
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"11":{"crown":{"x":5.0,"y":3.0}}}"#);
        roundtrip(&m);
    }

    #[test]
    fn test_part_map_remove_prunes_tooth() {
        let key = PartKey::new(tooth(21), PartKind::Root);
        let mut m = PartMap::new();
        m.insert(key, true);
        assert_eq!(m.len(), 1);
        assert_eq!(m.remove(key), Some(true));
        assert!(m.is_empty());
        assert!(m.tooth(tooth(21)).is_none());
    }

    #[test]
    fn test_part_map_get_or_default() {
        let m: PartMap<Offset> = PartMap::new();
        assert_eq!(m.get_or_default(PartKey::new(tooth(11), PartKind::Crown)), Offset::default());
    }

    // --- MissingFlag ---

    #[test]
    fn test_missing_flag_hides() {
        assert!(MissingFlag::Entire.hides(PartKind::Crown));
        assert!(MissingFlag::Entire.hides(PartKind::Root));
        assert!(MissingFlag::Crown.hides(PartKind::Crown));
        assert!(!MissingFlag::Crown.hides(PartKind::Root));
        assert!(!MissingFlag::None.hides(PartKind::Root));
    }

    #[test]
    fn test_missing_menu_options() {
        assert_eq!(MissingFlag::None.menu_options().len(), 3);
        assert_eq!(MissingFlag::Root.menu_options(), &[MissingFlag::None]);
    }

    // --- Wire bodies ---

    #[test]
    fn test_empty_defaults_body() {
        let d: DefaultLayout =
            serde_json::from_str(r#"{"positions":{},"transforms":{},"updatedAt":null}"#).unwrap();
        assert!(d.positions.is_empty());
        assert!(d.updated_at.is_none());
        let d: DefaultLayout = serde_json::from_str("{}").unwrap();
        assert!(d.transforms.is_empty());
    }

    #[test]
    fn test_set_defaults_camel_case() {
        let req = SetDefaultsRequest::default();
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("defaultPositions"));
        assert!(json.contains("defaultTransforms"));
    }

    #[test]
    fn test_save_selections_body() {
        let mut req = SaveSelectionsRequest::default();
        req.selections.insert(PartKey::new(tooth(11), PartKind::Crown), true);
        req.missing_teeth.insert(tooth(36), MissingFlag::Entire);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""missingTeeth":{"36":"entire"}"#));
        roundtrip(&req);
    }

    #[test]
    fn test_catalog_parses_partial_records() {
        let json = r#"{"11":{"crown":"/dental/a.svg","root":"/dental/b.svg"},"36":{"crown":"/dental/c.svg"}}"#;
        let catalog: TeethCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[&tooth(36)].get(PartKind::Root), None);
        assert_eq!(catalog[&tooth(11)].get(PartKind::Root), Some("/dental/b.svg"));
    }
}
