//! Tooth identifiers (FDI numbering) and per-part policy tables

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Номер зуба по системе FDI (11–18, 21–28, 31–38, 41–48)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToothId(u8);

/// Верхняя дуга в порядке отображения (справа налево у пациента)
pub const UPPER_ARCH: [ToothId; 16] = [
    ToothId(18), ToothId(17), ToothId(16), ToothId(15),
    ToothId(14), ToothId(13), ToothId(12), ToothId(11),
    ToothId(21), ToothId(22), ToothId(23), ToothId(24),
    ToothId(25), ToothId(26), ToothId(27), ToothId(28),
];

/// Нижняя дуга в порядке отображения
pub const LOWER_ARCH: [ToothId; 16] = [
    ToothId(48), ToothId(47), ToothId(46), ToothId(45),
    ToothId(44), ToothId(43), ToothId(42), ToothId(41),
    ToothId(31), ToothId(32), ToothId(33), ToothId(34),
    ToothId(35), ToothId(36), ToothId(37), ToothId(38),
];

/// Ошибка разбора номера зуба
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidToothId(pub String);

impl fmt::Display for InvalidToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not an FDI tooth number", self.0)
    }
}

impl std::error::Error for InvalidToothId {}

impl ToothId {
    /// Construct from a numeric FDI code
    pub fn new(code: u8) -> Option<Self> {
        let quadrant = code / 10;
        let position = code % 10;
        if (1..=4).contains(&quadrant) && (1..=8).contains(&position) {
            Some(Self(code))
        } else {
            None
        }
    }

    /// Parse a tooth identifier string such as `"11"`
    pub fn parse(s: &str) -> Result<Self, InvalidToothId> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidToothId(s.to_string()))
    }

    pub fn code(&self) -> u8 {
        self.0
    }

    /// Jaw the tooth belongs to
    pub fn arch(&self) -> Arch {
        match self.0 / 10 {
            1 | 2 => Arch::Upper,
            _ => Arch::Lower,
        }
    }

    /// All 32 teeth, upper arch first, in display order
    pub fn all() -> impl Iterator<Item = ToothId> {
        UPPER_ARCH.into_iter().chain(LOWER_ARCH)
    }
}

impl fmt::Display for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ToothId {
    type Err = InvalidToothId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// JSON-ключи: строки ("11"), поэтому сериализуем как строку
impl Serialize for ToothId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ToothId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ToothId::parse(&raw).map_err(de::Error::custom)
    }
}

/// Челюсть
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Upper,
    Lower,
}

impl Arch {
    /// Part drawn nearest the top of the chart row: roots point outward from the bite
    pub fn stacking(&self) -> [PartKind; 2] {
        match self {
            Arch::Upper => [PartKind::Root, PartKind::Crown],
            Arch::Lower => [PartKind::Crown, PartKind::Root],
        }
    }
}

/// Часть зуба
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Crown,
    Root,
}

const CROWN_SHAPES: [ShapeVariant; 4] = [
    ShapeVariant::Default,
    ShapeVariant::Round,
    ShapeVariant::Square,
    ShapeVariant::Pointed,
];

const ROOT_SHAPES: [ShapeVariant; 4] = [
    ShapeVariant::Default,
    ShapeVariant::Thin,
    ShapeVariant::Thick,
    ShapeVariant::Curved,
];

impl PartKind {
    pub const ALL: [PartKind; 2] = [PartKind::Crown, PartKind::Root];

    /// Fixed, wrap-around shape cycle for this kind
    pub fn shape_cycle(&self) -> &'static [ShapeVariant; 4] {
        match self {
            PartKind::Crown => &CROWN_SHAPES,
            PartKind::Root => &ROOT_SHAPES,
        }
    }

    /// Next shape in the cycle. A variant that does not belong to this kind restarts at `Default`.
    pub fn next_shape(&self, current: ShapeVariant) -> ShapeVariant {
        let cycle = self.shape_cycle();
        match cycle.iter().position(|s| *s == current) {
            Some(i) => cycle[(i + 1) % cycle.len()],
            None => ShapeVariant::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::Crown => "crown",
            PartKind::Root => "root",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartKind::Crown => "Crown",
            PartKind::Root => "Root",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Вариант формы части зуба
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeVariant {
    #[default]
    Default,
    Round,
    Square,
    Pointed,
    Thin,
    Thick,
    Curved,
}

impl ShapeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeVariant::Default => "default",
            ShapeVariant::Round => "round",
            ShapeVariant::Square => "square",
            ShapeVariant::Pointed => "pointed",
            ShapeVariant::Thin => "thin",
            ShapeVariant::Thick => "thick",
            ShapeVariant::Curved => "curved",
        }
    }
}

impl fmt::Display for ShapeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Адрес одной части зуба (зуб + коронка/корень)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartKey {
    pub tooth: ToothId,
    pub kind: PartKind,
}

impl PartKey {
    pub fn new(tooth: ToothId, kind: PartKind) -> Self {
        Self { tooth, kind }
    }

    /// All 64 tooth-parts in display order
    pub fn all() -> impl Iterator<Item = PartKey> {
        ToothId::all().flat_map(|tooth| PartKind::ALL.into_iter().map(move |kind| PartKey { tooth, kind }))
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tooth, self.kind)
    }
}
