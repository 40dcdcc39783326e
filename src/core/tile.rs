//! Numbered tiles as in 2048.
//!
//! A tile carries a power-of-two number and derives its display color from
//! it: a fixed table covers 2..=2048, anything larger gets a deterministic
//! color computed from the value's bit length.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Ordered value -> background color table, light blue through deep purple.
const COLOR_TABLE: [(u32, Rgb); 11] = [
    (2, Rgb::new(173, 216, 230)),
    (4, Rgb::new(100, 149, 237)),
    (8, Rgb::new(144, 238, 144)),
    (16, Rgb::new(60, 179, 113)),
    (32, Rgb::new(255, 223, 0)),
    (64, Rgb::new(255, 165, 0)),
    (128, Rgb::new(255, 99, 71)),
    (256, Rgb::new(255, 69, 0)),
    (512, Rgb::new(255, 0, 0)),
    (1024, Rgb::new(148, 0, 211)),
    (2048, Rgb::new(75, 0, 130)),
];

/// A numbered cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    number: u32,
}

impl Tile {
    /// Create a tile with the given number.
    pub fn new(number: u32) -> Self {
        debug_assert!(number > 0 && number.is_power_of_two());
        Self { number }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Double the number (the surviving tile of a merge).
    pub fn double(&mut self) {
        self.number = self.number.saturating_mul(2);
    }

    /// Background color derived from the number.
    pub fn color(&self) -> Rgb {
        for &(value, color) in COLOR_TABLE.iter() {
            if value == self.number {
                return color;
            }
        }
        fallback_color(self.number)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Deterministic color for values beyond the table, derived from the
/// value's bit length so every power of two past 2048 stays distinct
/// within a dark palette.
fn fallback_color(number: u32) -> Rgb {
    let bits = 32 - number.leading_zeros();
    let step = ((bits * 23) % 120) as u8;
    Rgb::new(50 + step, 40, 100 + step / 2)
}

/// Board cell: empty or holding a tile.
pub type Cell = Option<Tile>;
