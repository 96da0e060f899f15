use shared::{DefaultLayout, Offset, PartKey, PartMap, PartTransform, ShapeVariant};

/// Working positions/transforms plus the cached default they reset to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutState {
    positions: PartMap<Offset>,
    transforms: PartMap<PartTransform>,
    baseline: DefaultLayout,
}

impl LayoutState {
    /// Adopt `layout` as the new baseline and copy it into the working maps
    pub fn seed(&mut self, layout: DefaultLayout) {
        self.set_baseline(layout);
        self.reset_to_baseline();
    }

    /// Replace the cached default without touching working values
    pub fn set_baseline(&mut self, layout: DefaultLayout) {
        let transforms = layout
            .transforms
            .iter()
            .map(|(key, t)| (key, t.sanitized()))
            .collect();
        self.baseline = DefaultLayout {
            transforms,
            ..layout
        };
    }

    pub fn baseline(&self) -> &DefaultLayout {
        &self.baseline
    }

    pub fn reset_to_baseline(&mut self) {
        self.positions = self.baseline.positions.clone();
        self.transforms = self.baseline.transforms.clone();
    }

    pub fn offset(&self, key: PartKey) -> Offset {
        self.positions.get_or_default(key)
    }

    pub fn transform(&self, key: PartKey) -> PartTransform {
        self.transforms.get_or_default(key)
    }

    pub fn move_by(&mut self, key: PartKey, dx: f64, dy: f64) {
        let next = self.offset(key).translated(dx, dy);
        self.positions.insert(key, next);
    }

    pub fn scale_by(&mut self, key: PartKey, delta: f64) -> f64 {
        let next = self.transform(key).with_scale_delta(delta);
        self.transforms.insert(key, next);
        next.scale
    }

    pub fn rotate_by(&mut self, key: PartKey, degrees: f64) -> f64 {
        let next = self.transform(key).with_rotation_delta(degrees);
        self.transforms.insert(key, next);
        next.rotation
    }

    pub fn cycle_shape(&mut self, key: PartKey) -> ShapeVariant {
        let next = self.transform(key).with_next_shape(key.kind);
        self.transforms.insert(key, next);
        next.shape
    }

    pub fn positions(&self) -> &PartMap<Offset> {
        &self.positions
    }

    pub fn transforms(&self) -> &PartMap<PartTransform> {
        &self.transforms
    }

    /// Working values as a layout record (no timestamp)
    pub fn snapshot(&self) -> DefaultLayout {
        DefaultLayout::new(self.positions.clone(), self.transforms.clone())
    }

    /// Parts carrying a non-zero offset or non-identity transform
    pub fn modified_parts(&self) -> usize {
        PartKey::all()
            .filter(|k| {
                self.offset(*k) != Offset::default() || !self.transform(*k).is_identity()
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{PartKind, ToothId};

    fn key(code: u8, kind: PartKind) -> PartKey {
        PartKey::new(ToothId::new(code).unwrap(), kind)
    }

    #[test]
    fn test_seed_only_touches_listed_parts() {
        let k = key(11, PartKind::Crown);
        let mut positions = PartMap::new();
        positions.insert(k, Offset::new(5.0, 3.0));

        let mut layout = LayoutState::default();
        layout.seed(DefaultLayout::new(positions, PartMap::new()));

        assert_eq!(layout.offset(k), Offset::new(5.0, 3.0));
        assert_eq!(layout.offset(key(11, PartKind::Root)), Offset::default());
        assert_eq!(layout.transform(k), PartTransform::default());
    }

    #[test]
    fn test_seed_sanitizes_transforms() {
        let k = key(21, PartKind::Root);
        let mut transforms = PartMap::new();
        transforms.insert(
            k,
            PartTransform {
                scale: 7.0,
                rotation: -90.0,
                shape: ShapeVariant::Thin,
            },
        );
        let mut layout = LayoutState::default();
        layout.seed(DefaultLayout::new(PartMap::new(), transforms));

        let t = layout.transform(k);
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.rotation, 270.0);
        assert_eq!(t.shape, ShapeVariant::Thin);
    }

    #[test]
    fn test_reset_restores_baseline_not_zero() {
        let k = key(11, PartKind::Crown);
        let mut positions = PartMap::new();
        positions.insert(k, Offset::new(5.0, 3.0));
        let mut layout = LayoutState::default();
        layout.seed(DefaultLayout::new(positions, PartMap::new()));

        layout.move_by(k, 10.0, -4.0);
        layout.scale_by(k, 0.1);
        layout.move_by(key(12, PartKind::Root), 1.0, 1.0);
        layout.reset_to_baseline();

        assert_eq!(layout.offset(k), Offset::new(5.0, 3.0));
        assert_eq!(layout.transform(k).scale, 1.0);
        assert_eq!(layout.offset(key(12, PartKind::Root)), Offset::default());
    }

    #[test]
    fn test_reset_restores_loaded_scale_exactly() {
        let k = key(11, PartKind::Crown);
        let stored = PartTransform {
            scale: 1.25,
            ..PartTransform::default()
        };
        let mut transforms = PartMap::new();
        transforms.insert(k, stored);
        let mut layout = LayoutState::default();
        layout.seed(DefaultLayout::new(PartMap::new(), transforms));
        assert_eq!(layout.transform(k).scale, 1.25);

        layout.scale_by(k, 0.1);
        assert_ne!(layout.transform(k).scale, 1.25);

        layout.reset_to_baseline();
        assert_eq!(layout.transform(k), stored);
        assert_eq!(layout.snapshot().transforms.get(k), Some(&stored));
    }

    #[test]
    fn test_cycle_shape_per_kind() {
        let crown = key(36, PartKind::Crown);
        let root = key(36, PartKind::Root);
        let mut layout = LayoutState::default();

        assert_eq!(layout.cycle_shape(crown), ShapeVariant::Round);
        assert_eq!(layout.cycle_shape(root), ShapeVariant::Thin);
        assert_eq!(layout.cycle_shape(crown), ShapeVariant::Square);
    }

    #[test]
    fn test_modified_parts() {
        let mut layout = LayoutState::default();
        assert_eq!(layout.modified_parts(), 0);
        layout.move_by(key(18, PartKind::Crown), 1.0, 0.0);
        layout.rotate_by(key(18, PartKind::Root), 15.0);
        assert_eq!(layout.modified_parts(), 2);
    }
}
