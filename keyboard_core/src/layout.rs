//! Key layouts
//!
//! Two fixed grids of three rows each. Key positions are pixel offsets from
//! the keyboard origin and are only consumed by renderers; navigation works on
//! row/column indices.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of rows in every layout
pub const ROW_COUNT: usize = 3;

/// Number of selectable layouts
pub const LAYOUT_COUNT: usize = 2;

/// Row and column of the ENTER key on the alphanumeric layout
pub const ENTER_POSITION: (usize, usize) = (2, 9);

/// What a key does when confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    /// Printable single-byte character
    Char(u8),
    /// Submit the buffer
    Enter,
    /// Delete before the cursor
    Backspace,
    /// Toggle between the two layouts
    SwitchLayout,
}

impl KeyKind {
    /// The printable character, if any
    pub fn as_char(&self) -> Option<u8> {
        match self {
            KeyKind::Char(ch) => Some(*ch),
            _ => None,
        }
    }
}

/// A key on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub kind: KeyKind,
    /// Horizontal pixel offset from the keyboard origin
    pub x: u8,
    /// Baseline pixel offset from the keyboard origin
    pub y: u8,
}

impl Key {
    const fn ch(ch: u8, x: u8, y: u8) -> Self {
        Self {
            kind: KeyKind::Char(ch),
            x,
            y,
        }
    }

    const fn special(kind: KeyKind, x: u8, y: u8) -> Self {
        Self { kind, x, y }
    }
}

/// Layout selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutId {
    /// Letters and digits
    #[default]
    Alphanumeric,
    /// Punctuation and digits
    Symbols,
}

impl LayoutId {
    pub fn index(&self) -> usize {
        match self {
            LayoutId::Alphanumeric => 0,
            LayoutId::Symbols => 1,
        }
    }

    /// Layout for an index, wrapping out-of-range values
    pub fn from_index(index: usize) -> Self {
        if index % LAYOUT_COUNT == 0 {
            LayoutId::Alphanumeric
        } else {
            LayoutId::Symbols
        }
    }

    /// The other layout
    pub fn toggle(&self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutId::Alphanumeric => write!(f, "alphanumeric"),
            LayoutId::Symbols => write!(f, "symbols"),
        }
    }
}

/// A complete key grid
#[derive(Debug)]
pub struct Layout {
    pub id: LayoutId,
    pub rows: [&'static [Key]; ROW_COUNT],
}

const ALPHA_ROW_1: [Key; 14] = [
    Key::ch(b'q', 1, 8),
    Key::ch(b'w', 10, 8),
    Key::ch(b'e', 19, 8),
    Key::ch(b'r', 28, 8),
    Key::ch(b't', 37, 8),
    Key::ch(b'y', 46, 8),
    Key::ch(b'u', 55, 8),
    Key::ch(b'i', 64, 8),
    Key::ch(b'o', 73, 8),
    Key::ch(b'p', 82, 8),
    Key::ch(b'0', 91, 8),
    Key::ch(b'1', 100, 8),
    Key::ch(b'2', 110, 8),
    Key::ch(b'3', 120, 8),
];

const ALPHA_ROW_2: [Key; 13] = [
    Key::ch(b'a', 1, 20),
    Key::ch(b's', 10, 20),
    Key::ch(b'd', 19, 20),
    Key::ch(b'f', 28, 20),
    Key::ch(b'g', 37, 20),
    Key::ch(b'h', 46, 20),
    Key::ch(b'j', 55, 20),
    Key::ch(b'k', 64, 20),
    Key::ch(b'l', 73, 20),
    Key::special(KeyKind::Backspace, 82, 22),
    Key::ch(b'4', 100, 20),
    Key::ch(b'5', 110, 20),
    Key::ch(b'6', 120, 20),
];

const ALPHA_ROW_3: [Key; 13] = [
    Key::special(KeyKind::SwitchLayout, 1, 33),
    Key::ch(b'z', 13, 32),
    Key::ch(b'x', 21, 32),
    Key::ch(b'c', 28, 32),
    Key::ch(b'v', 36, 32),
    Key::ch(b'b', 44, 32),
    Key::ch(b'n', 52, 32),
    Key::ch(b'm', 59, 32),
    Key::ch(b'_', 67, 32),
    Key::special(KeyKind::Enter, 74, 33),
    Key::ch(b'7', 100, 32),
    Key::ch(b'8', 110, 32),
    Key::ch(b'9', 120, 32),
];

const SYMBOL_ROW_1: [Key; 13] = [
    Key::ch(b'!', 2, 8),
    Key::ch(b'@', 12, 8),
    Key::ch(b'#', 22, 8),
    Key::ch(b'$', 32, 8),
    Key::ch(b'%', 42, 8),
    Key::ch(b'^', 52, 8),
    Key::ch(b'&', 62, 8),
    Key::ch(b'(', 71, 8),
    Key::ch(b')', 81, 8),
    Key::ch(b'0', 91, 8),
    Key::ch(b'1', 100, 8),
    Key::ch(b'2', 110, 8),
    Key::ch(b'3', 120, 8),
];

const SYMBOL_ROW_2: [Key; 12] = [
    Key::ch(b'~', 2, 20),
    Key::ch(b'+', 12, 20),
    Key::ch(b'-', 22, 20),
    Key::ch(b'=', 32, 20),
    Key::ch(b'[', 42, 20),
    Key::ch(b']', 52, 20),
    Key::ch(b'{', 62, 20),
    Key::ch(b'}', 72, 20),
    Key::special(KeyKind::Backspace, 82, 22),
    Key::ch(b'4', 100, 20),
    Key::ch(b'5', 110, 20),
    Key::ch(b'6', 120, 20),
];

const SYMBOL_ROW_3: [Key; 10] = [
    Key::special(KeyKind::SwitchLayout, 1, 33),
    Key::ch(b'.', 15, 32),
    Key::ch(b',', 29, 32),
    Key::ch(b';', 41, 32),
    Key::ch(b'`', 53, 32),
    Key::ch(b'\'', 65, 32),
    Key::special(KeyKind::Enter, 74, 33),
    Key::ch(b'7', 100, 32),
    Key::ch(b'8', 110, 32),
    Key::ch(b'9', 120, 32),
];

static ALPHANUMERIC: Layout = Layout {
    id: LayoutId::Alphanumeric,
    rows: [&ALPHA_ROW_1, &ALPHA_ROW_2, &ALPHA_ROW_3],
};

static SYMBOLS: Layout = Layout {
    id: LayoutId::Symbols,
    rows: [&SYMBOL_ROW_1, &SYMBOL_ROW_2, &SYMBOL_ROW_3],
};

/// Returns the layout table for `id`
pub fn layout(id: LayoutId) -> &'static Layout {
    match id {
        LayoutId::Alphanumeric => &ALPHANUMERIC,
        LayoutId::Symbols => &SYMBOLS,
    }
}

/// Keys of a row; rows past the last one resolve to the bottom row
pub fn row(id: LayoutId, row: usize) -> &'static [Key] {
    layout(id).rows[row.min(ROW_COUNT - 1)]
}

/// Number of keys in a row
pub fn row_len(id: LayoutId, row_index: usize) -> usize {
    row(id, row_index).len()
}

/// Clamps a column into the given row
pub fn clamp_column(id: LayoutId, row_index: usize, column: usize) -> usize {
    column.min(row_len(id, row_index).saturating_sub(1))
}

/// Key under a (possibly stale) selection
///
/// Row and column are clamped into the layout, so a selection left over from
/// the other layout still resolves to the nearest key on the same row.
pub fn key_at(id: LayoutId, row_index: usize, column: usize) -> Key {
    let keys = row(id, row_index);
    keys[clamp_column(id, row_index, column)]
}
