//! Positions, transforms and missing-part flags

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tooth::{PartKey, PartKind, ShapeVariant, ToothId};

/// Минимальный масштаб части
pub const MIN_SCALE: f64 = 0.5;
/// Максимальный масштаб части
pub const MAX_SCALE: f64 = 2.0;
/// Шаг масштаба (колесо мыши, Shift/Ctrl+клик)
pub const SCALE_STEP: f64 = 0.1;

/// Смещение части относительно её места в раскладке
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Трансформация части: масштаб, поворот, форма
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartTransform {
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub shape: ShapeVariant,
}

fn default_scale() -> f64 {
    1.0
}

impl Default for PartTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
            shape: ShapeVariant::Default,
        }
    }
}

/// Clamp into [MIN_SCALE, MAX_SCALE]; non-finite values fall back to 1
pub fn clamp_scale(scale: f64) -> f64 {
    if !scale.is_finite() {
        return 1.0;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Clamp and snap to a tenth, so repeated gesture steps don't drift
pub fn snap_scale(scale: f64) -> f64 {
    if !scale.is_finite() {
        return 1.0;
    }
    clamp_scale((scale * 10.0).round() / 10.0)
}

/// Normalize degrees into [0, 360)
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let r = degrees.rem_euclid(360.0);
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

impl PartTransform {
    pub fn with_scale_delta(self, delta: f64) -> Self {
        Self {
            scale: snap_scale(self.scale + delta),
            ..self
        }
    }

    pub fn with_rotation_delta(self, delta: f64) -> Self {
        Self {
            rotation: normalize_rotation(self.rotation + delta),
            ..self
        }
    }

    pub fn with_next_shape(self, kind: PartKind) -> Self {
        Self {
            shape: kind.next_shape(self.shape),
            ..self
        }
    }

    /// Re-establish the scale/rotation invariants on values read from the wire.
    /// In-range scales are kept exactly as stored.
    pub fn sanitized(self) -> Self {
        Self {
            scale: clamp_scale(self.scale),
            rotation: normalize_rotation(self.rotation),
            shape: self.shape,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Значения по частям: `{ "11": { "crown": T, "root": T } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartMap<T>(BTreeMap<ToothId, BTreeMap<PartKind, T>>);

impl<T> Default for PartMap<T> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<T> PartMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: PartKey) -> Option<&T> {
        self.0.get(&key.tooth)?.get(&key.kind)
    }

    pub fn insert(&mut self, key: PartKey, value: T) -> Option<T> {
        self.0.entry(key.tooth).or_default().insert(key.kind, value)
    }

    pub fn remove(&mut self, key: PartKey) -> Option<T> {
        let parts = self.0.get_mut(&key.tooth)?;
        let removed = parts.remove(&key.kind);
        if parts.is_empty() {
            self.0.remove(&key.tooth);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|parts| parts.is_empty())
    }

    /// Number of tooth-parts with a value
    pub fn len(&self) -> usize {
        self.0.values().map(|parts| parts.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PartKey, &T)> {
        self.0.iter().flat_map(|(tooth, parts)| {
            parts
                .iter()
                .map(move |(kind, value)| (PartKey::new(*tooth, *kind), value))
        })
    }

    /// Values stored for one tooth
    pub fn tooth(&self, tooth: ToothId) -> Option<&BTreeMap<PartKind, T>> {
        self.0.get(&tooth)
    }
}

impl<T: Copy + Default> PartMap<T> {
    /// Stored value or the zero-value default
    pub fn get_or_default(&self, key: PartKey) -> T {
        self.get(key).copied().unwrap_or_default()
    }
}

impl<T> FromIterator<(PartKey, T)> for PartMap<T> {
    fn from_iter<I: IntoIterator<Item = (PartKey, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Отсутствие зуба или его части
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFlag {
    #[default]
    None,
    Crown,
    Root,
    Entire,
}

impl MissingFlag {
    /// Whether this flag hides the given part
    pub fn hides(&self, kind: PartKind) -> bool {
        match self {
            MissingFlag::None => false,
            MissingFlag::Entire => true,
            MissingFlag::Crown => kind == PartKind::Crown,
            MissingFlag::Root => kind == PartKind::Root,
        }
    }

    /// Entries offered by the tooth-level menu for the current flag
    pub fn menu_options(&self) -> &'static [MissingFlag] {
        match self {
            MissingFlag::None => &[MissingFlag::Entire, MissingFlag::Crown, MissingFlag::Root],
            _ => &[MissingFlag::None],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MissingFlag::None => "none",
            MissingFlag::Crown => "crown",
            MissingFlag::Root => "root",
            MissingFlag::Entire => "entire",
        }
    }
}

/// Раскладка по умолчанию (хранится на сервере)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultLayout {
    #[serde(default)]
    pub positions: PartMap<Offset>,
    #[serde(default)]
    pub transforms: PartMap<PartTransform>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DefaultLayout {
    pub fn new(positions: PartMap<Offset>, transforms: PartMap<PartTransform>) -> Self {
        Self {
            positions,
            transforms,
            updated_at: None,
        }
    }
}
