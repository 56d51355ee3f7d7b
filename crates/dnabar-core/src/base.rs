use serde::{Deserialize, Serialize};

/// An opaque RGB colour for one barcode block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form, lowercase
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex())
    }
}

pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
pub const GREEN: Color = Color::rgb(0x00, 0x80, 0x00);
pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xff);
pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0x00);
pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);

/// Colour used for any symbol outside the recognised alphabet
pub const FALLBACK_COLOR: Color = GRAY;

/// One nucleotide of the recognised alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Base {
    A,
    T,
    G,
    C,
}

impl Base {
    pub const ALL: [Base; 4] = [Base::A, Base::T, Base::G, Base::C];

    /// Case-insensitive lookup; `None` for anything outside {A, T, G, C}
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Base::A),
            'T' => Some(Base::T),
            'G' => Some(Base::G),
            'C' => Some(Base::C),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Base::A => 'A',
            Base::T => 'T',
            Base::G => 'G',
            Base::C => 'C',
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Base::A => RED,
            Base::T => GREEN,
            Base::G => BLUE,
            Base::C => YELLOW,
        }
    }
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Colour for an arbitrary symbol, falling back to gray instead of failing
pub fn color_for(symbol: char) -> Color {
    Base::from_char(symbol)
        .map(|base| base.color())
        .unwrap_or(FALLBACK_COLOR)
}
