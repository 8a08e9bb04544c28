//! Character-cell canvas
//!
//! Approximates the 128x64 pixel screen with a grid of 3x8 px cells so the
//! keyboard can be shown in a terminal. Filled boxes become reverse video.

use keyboard_core::TextMeasure;
use services_keyboard::{Canvas, Color, Font};

/// Horizontal pixels per cell
pub const CELL_WIDTH: usize = 3;
/// Vertical pixels per cell
pub const CELL_HEIGHT: usize = 8;

const SCREEN_WIDTH: usize = 128;
const SCREEN_HEIGHT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    inverted: bool,
}

const BLANK: Cell = Cell {
    ch: ' ',
    inverted: false,
};

/// Terminal canvas
pub struct TextCanvas {
    cells: Vec<Vec<Cell>>,
    color: Color,
}

impl TextCanvas {
    pub fn new() -> Self {
        Self {
            cells: vec![vec![BLANK; Self::columns()]; Self::rows()],
            color: Color::Black,
        }
    }

    pub fn columns() -> usize {
        SCREEN_WIDTH / CELL_WIDTH + 1
    }

    pub fn rows() -> usize {
        SCREEN_HEIGHT / CELL_HEIGHT
    }

    fn column_of(x: i32) -> Option<usize> {
        usize::try_from(x + 1).ok().map(|x| x / CELL_WIDTH)
    }

    fn row_of(y: i32) -> Option<usize> {
        usize::try_from(y).ok().map(|y| y / CELL_HEIGHT)
    }

    /// Cell rows whose baseline pixel falls inside `(y, y + height]`
    fn rows_in(y: i32, height: usize) -> impl Iterator<Item = usize> {
        (0..Self::rows()).filter(move |row| {
            let baseline = (row * CELL_HEIGHT) as i32;
            baseline > y && baseline <= y + height as i32
        })
    }

    /// Cell columns starting inside `[x, x + width)`
    fn columns_in(x: i32, width: usize) -> impl Iterator<Item = usize> {
        (0..Self::columns()).filter(move |column| {
            let left = (column * CELL_WIDTH) as i32;
            left >= x && left < x + width as i32
        })
    }

    fn put(&mut self, row: usize, column: usize, ch: char) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(column)) {
            cell.ch = ch;
        }
    }

    fn fill(&mut self, x: i32, y: i32, width: usize, height: usize) {
        let inverted = self.color == Color::Black;
        for row in Self::rows_in(y, height) {
            for column in Self::columns_in(x, width) {
                self.cells[row][column] = Cell { ch: ' ', inverted };
            }
        }
    }

    fn outline(&mut self, x: i32, y: i32, width: usize, height: usize) {
        let left = Self::column_of(x);
        let right = Self::column_of(x + width as i32 - 1);
        for row in Self::rows_in(y, height) {
            if let Some(left) = left {
                self.put(row, left, '|');
            }
            if let Some(right) = right {
                self.put(row, right, '|');
            }
        }
    }

    /// Plain text lines, highlight dropped
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.ch).collect::<String>().trim_end().to_string())
            .collect()
    }

    /// Screen contents with ANSI reverse video for filled boxes
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for row in &self.cells {
            let mut inverted = false;
            for cell in row {
                if cell.inverted != inverted {
                    out.push_str(if cell.inverted { "\x1b[7m" } else { "\x1b[0m" });
                    inverted = cell.inverted;
                }
                out.push(cell.ch);
            }
            if inverted {
                out.push_str("\x1b[0m");
            }
            out.push('\n');
        }
        out
    }
}

impl Default for TextCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for TextCanvas {
    fn string_width(&self, text: &str) -> usize {
        text.len() * CELL_WIDTH
    }
}

impl Canvas for TextCanvas {
    fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(BLANK);
        }
        self.color = Color::Black;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_font(&mut self, _font: Font) {}

    fn draw_str(&mut self, x: i32, y: i32, text: &str) {
        let (Some(column), Some(row)) = (Self::column_of(x), Self::row_of(y)) else {
            return;
        };
        for (offset, ch) in text.chars().enumerate() {
            self.put(row, column + offset, ch);
        }
    }

    fn draw_glyph(&mut self, x: i32, y: i32, glyph: u8) {
        if let (Some(column), Some(row)) = (Self::column_of(x), Self::row_of(y)) {
            self.put(row, column, char::from(glyph));
        }
    }

    fn draw_box(&mut self, x: i32, y: i32, width: usize, height: usize) {
        self.fill(x, y, width, height);
    }

    fn draw_rounded_box(&mut self, x: i32, y: i32, width: usize, height: usize, _radius: usize) {
        self.fill(x, y, width, height);
    }

    fn draw_rounded_frame(&mut self, x: i32, y: i32, width: usize, height: usize, _radius: usize) {
        self.outline(x, y, width, height);
    }

    fn draw_multiline_centered(&mut self, x: i32, y: i32, text: &str) {
        let Some(center) = Self::column_of(x) else {
            return;
        };
        let lines: Vec<&str> = text.lines().collect();
        let top = Self::row_of(y).unwrap_or(0).saturating_sub(lines.len() / 2);
        for (index, line) in lines.iter().enumerate() {
            let start = center.saturating_sub(line.len() / 2);
            for (offset, ch) in line.chars().enumerate() {
                self.put(top + index, start + offset, ch);
            }
        }
    }
}
