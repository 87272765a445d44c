//! Double-buffered, diff-based terminal renderer.
//!
//! Each frame is composed into the front buffer, compared cell by cell
//! against the previous frame, and only the differences are emitted as
//! terminal commands. Commands are batched with `queue!` and flushed once,
//! which keeps a full redraw flicker-free.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use game_core::render::{ColorAttr, color};
use game_core::Surface;

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    glyph: char,
    attr: ColorAttr,
}

impl Cell {
    const BLANK: Cell = Cell { glyph: ' ', attr: ColorAttr { pair: color::DEFAULT, bold: false } };

    /// Differs from every real cell, so a fill with this forces a full
    /// repaint on the next flush.
    const INVALID: Cell = Cell { glyph: '\0', attr: ColorAttr { pair: u8::MAX, bold: true } };
}

/// A grid of cells implementing the game's draw surface. Out-of-range
/// writes are dropped, so draw passes never need to clip.
pub struct FrameBuffer {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, cells: vec![Cell::BLANK; (width * height) as usize] }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn in_range(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.height && col >= 0 && col < self.width
    }

    fn cell_at(&self, row: i32, col: i32) -> Cell {
        if self.in_range(row, col) {
            self.cells[(row * self.width + col) as usize]
        } else {
            // Reads clip like writes do: whatever falls off the buffer
            // looks blank.
            Cell::BLANK
        }
    }

    pub fn glyph_at(&self, row: i32, col: i32) -> char {
        self.cell_at(row, col).glyph
    }

    pub fn attr_at(&self, row: i32, col: i32) -> ColorAttr {
        self.cell_at(row, col).attr
    }
}

impl Surface for FrameBuffer {
    fn draw_char(&mut self, row: i32, col: i32, glyph: char, attr: ColorAttr) {
        if self.in_range(row, col) {
            self.cells[(row * self.width + col) as usize] = Cell { glyph, attr };
        }
    }
}

/// Resolve a color-pair index to a terminal color.
fn pair_color(pair: u8) -> Color {
    match pair {
        color::PLAYER => Color::Yellow,
        color::ENEMY => Color::Red,
        color::EXIT => Color::Green,
        color::ITEM => Color::Cyan,
        color::WALL => Color::Grey,
        color::WATER => Color::Blue,
        color::OUTSIDE_SIGHT => Color::DarkGrey,
        _ => Color::White,
    }
}

pub struct Terminal {
    writer: BufWriter<Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
}

impl Terminal {
    pub fn new(width: i32, height: i32) -> Self {
        let mut back = FrameBuffer::new(width, height);
        back.cells.fill(Cell::INVALID);
        Self {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(width, height),
            back,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.writer, terminal::EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    /// Blank surface for the next frame's draw passes.
    pub fn frame(&mut self) -> &mut FrameBuffer {
        self.front.clear();
        &mut self.front
    }

    /// Repaint everything on the next flush, after a resize or any event
    /// that may have disturbed the screen.
    pub fn invalidate(&mut self) {
        self.back.cells.fill(Cell::INVALID);
    }

    /// Emit only the cells that changed since the previous frame, then swap
    /// buffers.
    pub fn flush_frame(&mut self) -> io::Result<()> {
        for row in 0..self.front.height {
            for col in 0..self.front.width {
                let index = (row * self.front.width + col) as usize;
                let cell = self.front.cells[index];
                if cell == self.back.cells[index] {
                    continue;
                }
                queue!(
                    self.writer,
                    MoveTo(col as u16, row as u16),
                    SetAttribute(Attribute::Reset),
                    SetForegroundColor(pair_color(cell.attr.pair)),
                )?;
                if cell.attr.bold {
                    queue!(self.writer, SetAttribute(Attribute::Bold))?;
                }
                queue!(self.writer, Print(cell.glyph))?;
            }
        }
        self.writer.flush()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_draws_are_dropped() {
        let mut buffer = FrameBuffer::new(10, 5);
        buffer.draw_char(-1, 0, 'x', ColorAttr::default());
        buffer.draw_char(0, 10, 'x', ColorAttr::default());
        buffer.draw_char(5, 0, 'x', ColorAttr::default());
        assert!(buffer.cells.iter().all(|cell| *cell == Cell::BLANK));

        buffer.draw_char(4, 9, 'x', ColorAttr::bold(color::PLAYER));
        assert_eq!(buffer.glyph_at(4, 9), 'x');
        assert!(buffer.attr_at(4, 9).bold);
    }

    #[test]
    fn out_of_range_reads_look_blank() {
        let buffer = FrameBuffer::new(10, 5);
        assert_eq!(buffer.glyph_at(-1, 0), ' ');
        assert_eq!(buffer.glyph_at(0, 10), ' ');
        assert_eq!(buffer.glyph_at(5, 0), ' ');
        assert_eq!(buffer.attr_at(-3, 40), ColorAttr::default());
    }

    #[test]
    fn every_color_pair_resolves() {
        for pair in 0..=8 {
            // No panic and no accidental black-on-black.
            assert_ne!(pair_color(pair), Color::Black);
        }
    }
}
