//! Text buffer editor
//!
//! Cursor handling and placeholder ("default text") semantics on top of a
//! bound [`TextBuffer`]. Every operation on an unbound editor is a no-op.

use crate::buffer::TextBuffer;

/// Uppercase form used by the keyboard; `_` maps to a space
pub fn to_upper(ch: u8) -> u8 {
    if ch == b'_' {
        b' '
    } else {
        ch.to_ascii_uppercase()
    }
}

/// Applies the keyboard's case rules to a confirmed character
///
/// The character is uppercased when shift was requested (long press), or when
/// it is the first character of an empty buffer and a lowercase letter.
pub fn case_fold(ch: u8, shift_requested: bool, is_first_char: bool) -> u8 {
    if shift_requested || (is_first_char && ch.is_ascii_lowercase()) {
        to_upper(ch)
    } else {
        ch
    }
}

/// Editor over a caller-supplied buffer
#[derive(Debug, Clone, Default)]
pub struct TextEditor {
    buffer: Option<TextBuffer>,
    cursor: usize,
    clear_default_text: bool,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a buffer, returning the previously bound one
    ///
    /// The cursor is placed after the existing text.
    pub fn bind(&mut self, buffer: TextBuffer, clear_default_text: bool) -> Option<TextBuffer> {
        self.cursor = buffer.len();
        self.clear_default_text = clear_default_text;
        self.buffer.replace(buffer)
    }

    /// Releases the bound buffer
    pub fn unbind(&mut self) -> Option<TextBuffer> {
        self.cursor = 0;
        self.clear_default_text = false;
        self.buffer.take()
    }

    pub fn is_bound(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn buffer(&self) -> Option<&TextBuffer> {
        self.buffer.as_ref()
    }

    /// Current text, empty when unbound
    pub fn text(&self) -> &str {
        self.buffer.as_ref().map(|b| b.as_str()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.buffer.as_ref().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage capacity of the bound buffer, zero when unbound
    pub fn capacity(&self) -> usize {
        self.buffer.as_ref().map(|b| b.capacity()).unwrap_or(0)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear_default_text(&self) -> bool {
        self.clear_default_text
    }

    pub fn set_clear_default_text(&mut self, clear: bool) {
        self.clear_default_text = clear;
    }

    /// Pulls the cursor back into `[0, len]`
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.len());
    }

    /// Sets the cursor, clamped into the text
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.len());
    }

    pub fn move_cursor_left(&mut self) {
        self.clamp_cursor();
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.buffer.is_some() {
            self.set_cursor(self.cursor + 1);
        }
    }

    /// Inserts a character at the cursor
    ///
    /// In placeholder mode the whole buffer is replaced by `ch`. A full
    /// buffer silently rejects the character. Returns true if the text changed.
    pub fn insert(&mut self, ch: u8) -> bool {
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };

        if self.clear_default_text {
            self.clear_default_text = false;
            if buffer.replace_with_byte(ch) {
                self.cursor = 1;
                return true;
            }
            return false;
        }

        let cursor = self.cursor.min(buffer.len());
        if buffer.insert_at(cursor, ch) {
            self.cursor = cursor + 1;
            true
        } else {
            false
        }
    }

    /// Deletes the character before the cursor
    ///
    /// In placeholder mode the whole buffer is cleared. Returns true if the
    /// text changed.
    pub fn backspace(&mut self) -> bool {
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };

        if self.clear_default_text {
            self.clear_default_text = false;
            let changed = !buffer.is_empty();
            buffer.clear();
            self.cursor = 0;
            return changed;
        }

        let cursor = self.cursor.min(buffer.len());
        if buffer.remove_before(cursor) {
            self.cursor = cursor - 1;
            true
        } else {
            self.cursor = cursor;
            false
        }
    }
}
