use serde::Serialize;

use crate::base::{color_for, Base, Color};

/// Logical canvas height; every block is one unit tall
pub const CANVAS_HEIGHT: usize = 1;

/// One coloured block of the barcode, in logical units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub color: Color,
    /// Uppercased source symbol this block was drawn for
    pub symbol: char,
}

/// Drawable description of a barcode: blocks ordered by position plus the
/// logical canvas size. No axes, no labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarcodeImage {
    pub rects: Vec<UnitRect>,
    pub width: usize,
    pub height: usize,
}

impl BarcodeImage {
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn colors(&self) -> Vec<Color> {
        self.rects.iter().map(|r| r.color).collect()
    }

    /// Physical width for a given per-base unit width, never below `min_width`
    pub fn render_width(&self, unit_width: u32, min_width: u32) -> u32 {
        u32::try_from(self.width)
            .unwrap_or(u32::MAX)
            .saturating_mul(unit_width)
            .max(min_width)
    }

    /// Positions that were drawn with the fallback colour
    pub fn unrecognized_positions(&self) -> Vec<usize> {
        self.rects
            .iter()
            .filter(|r| Base::from_char(r.symbol).is_none())
            .map(|r| r.x)
            .collect()
    }
}

/// Map a sequence to its barcode description.
///
/// Infallible: symbols outside the alphabet get the fallback colour.
pub fn encode(sequence: &str) -> BarcodeImage {
    let rects: Vec<UnitRect> = sequence
        .chars()
        .enumerate()
        .map(|(x, symbol)| UnitRect {
            x,
            y: 0,
            width: 1,
            height: 1,
            color: color_for(symbol),
            symbol: symbol.to_ascii_uppercase(),
        })
        .collect();

    BarcodeImage {
        width: rects.len(),
        height: CANVAS_HEIGHT,
        rects,
    }
}
