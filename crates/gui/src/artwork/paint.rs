use std::fmt;

/// sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)` or the named colors used by tooth artwork
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Some(args) = s
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<u8> = args
                .split(',')
                .filter_map(|p| p.trim().parse().ok())
                .collect();
            return match parts.as_slice() {
                [r, g, b] => Some(Self::new(*r, *g, *b)),
                _ => None,
            };
        }
        match s.to_ascii_lowercase().as_str() {
            "white" => Some(Self::WHITE),
            "black" => Some(Self::BLACK),
            "red" => Some(Self::new(0xFF, 0x00, 0x00)),
            "gray" | "grey" => Some(Self::new(0x80, 0x80, 0x80)),
            _ => None,
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let digit = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
        match hex.len() {
            3 => {
                let r = digit(0, 1)?;
                let g = digit(1, 1)?;
                let b = digit(2, 1)?;
                Some(Self::new(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::new(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Fill or stroke paint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paint {
    None,
    Color(Rgb),
    /// Gradients, `currentColor` and anything else kept verbatim
    Other(String),
}

impl Paint {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Paint::None;
        }
        match Rgb::parse(s) {
            Some(rgb) => Paint::Color(rgb),
            None => Paint::Other(s.to_string()),
        }
    }

    pub fn is_color(&self, rgb: Rgb) -> bool {
        matches!(self, Paint::Color(c) if *c == rgb)
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::None => f.write_str("none"),
            Paint::Color(rgb) => rgb.fmt(f),
            Paint::Other(raw) => f.write_str(raw),
        }
    }
}
