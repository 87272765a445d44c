//! The character-cell surface the draw passes target. The terminal front end
//! implements [`Surface`] on its frame buffer; tests implement it on a
//! recording grid.

/// Color pair registry. Small integers, resolved to real colors by the
/// rendering backend.
pub mod color {
    pub const DEFAULT: u8 = 0;
    pub const PLAYER: u8 = 1;
    pub const ENEMY: u8 = 2;
    pub const EXIT: u8 = 3;
    pub const ITEM: u8 = 4;
    pub const WALL: u8 = 5;
    pub const WATER: u8 = 6;
    pub const OUTSIDE_SIGHT: u8 = 8;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorAttr {
    pub pair: u8,
    pub bold: bool,
}

impl ColorAttr {
    pub fn pair(pair: u8) -> Self {
        Self { pair, bold: false }
    }

    pub fn bold(pair: u8) -> Self {
        Self { pair, bold: true }
    }
}

impl Default for ColorAttr {
    fn default() -> Self {
        Self::pair(color::DEFAULT)
    }
}

pub trait Surface {
    fn draw_char(&mut self, row: i32, col: i32, glyph: char, attr: ColorAttr);
}

/// One char per column, left to right.
pub fn draw_text(surface: &mut dyn Surface, row: i32, col: i32, text: &str, attr: ColorAttr) {
    for (index, glyph) in text.chars().enumerate() {
        surface.draw_char(row, col + index as i32, glyph, attr);
    }
}
