//! Grid navigation
//!
//! Tracks which key is highlighted and whether the arrows currently steer the
//! text cursor instead (cursor-edit mode).
//!
//! Rows have different lengths, and the special keys sit in wider slots than
//! letters, so moving between rows nudges the column to keep the highlight
//! roughly under the previous key. The offsets below are layout-specific and
//! must stay as they are: they define where the highlight lands.

use crate::editor::TextEditor;
use crate::layout::{self, Key, LayoutId, ROW_COUNT};
use input_types::Direction;
use serde::{Deserialize, Serialize};

/// Current grid selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub layout: LayoutId,
    pub row: usize,
    /// Column as last navigated; may exceed the row after a layout switch
    pub column: usize,
    /// Arrows move the text cursor instead of the highlight
    pub cursor_select: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection resting on the given key position
    pub fn at(layout: LayoutId, row: usize, column: usize) -> Self {
        Self {
            layout,
            row: row.min(ROW_COUNT - 1),
            column,
            cursor_select: false,
        }
    }

    fn row_len(&self) -> usize {
        layout::row_len(self.layout, self.row)
    }

    /// Column clamped into the current row
    pub fn effective_column(&self) -> usize {
        layout::clamp_column(self.layout, self.row, self.column)
    }

    /// Key under the highlight
    pub fn key(&self) -> Key {
        layout::key_at(self.layout, self.row, self.column)
    }

    /// True when (row, column) is the highlighted key and the grid has focus
    pub fn is_highlighted(&self, row: usize, column: usize) -> bool {
        !self.cursor_select && self.row == row && self.effective_column() == column
    }

    /// Toggles the layout without touching row or column
    pub fn switch_layout(&mut self) {
        self.layout = self.layout.toggle();
    }

    /// Applies a directional move
    pub fn navigate(&mut self, direction: Direction, editor: &mut TextEditor) {
        match direction {
            Direction::Up => self.move_up(editor),
            Direction::Down => self.move_down(),
            Direction::Left => self.move_left(editor),
            Direction::Right => self.move_right(editor),
        }
    }

    /// Moves one row up, or enters cursor-edit mode from the top row
    pub fn move_up(&mut self, editor: &mut TextEditor) {
        if self.row == 0 {
            self.cursor_select = true;
            editor.set_clear_default_text(false);
            return;
        }

        self.row -= 1;
        let row_len = self.row_len();
        let last = row_len.saturating_sub(1);

        if self.row == 0 && self.column > row_len.saturating_sub(6) {
            self.column = (self.column + 1).min(last);
        }

        if self.row == 1 && self.layout == LayoutId::Symbols {
            if self.column > 5 && self.column < row_len {
                self.column = (self.column + 2).min(last);
            } else if self.column > 1 {
                self.column = (self.column + 1).min(last);
            }
        }

        self.column = self.column.min(last);
    }

    /// Leaves cursor-edit mode, or moves one row down
    pub fn move_down(&mut self) {
        if self.cursor_select {
            self.cursor_select = false;
            return;
        }
        if self.row >= ROW_COUNT - 1 {
            return;
        }

        self.row += 1;
        let row_len = self.row_len();
        let last = row_len.saturating_sub(1);

        if self.row == 1 && self.column > row_len.saturating_sub(4) {
            self.column = self.column.saturating_sub(1).min(last);
        }

        if self.row == 2 && self.layout == LayoutId::Symbols {
            let middle_len = layout::row_len(self.layout, 1);
            if self.column > 7 && self.column < middle_len {
                self.column = self.column.saturating_sub(2).min(last);
            } else if self.column > 1 {
                self.column = self.column.saturating_sub(1).min(last);
            }
        }

        self.column = self.column.min(last);
    }

    /// Moves the highlight left with wrap-around, or the text cursor left
    pub fn move_left(&mut self, editor: &mut TextEditor) {
        if self.cursor_select {
            editor.move_cursor_left();
            return;
        }
        self.column = self.effective_column();
        if self.column > 0 {
            self.column -= 1;
        } else {
            self.column = self.row_len().saturating_sub(1);
        }
    }

    /// Moves the highlight right with wrap-around, or the text cursor right
    pub fn move_right(&mut self, editor: &mut TextEditor) {
        if self.cursor_select {
            editor.move_cursor_right();
            return;
        }
        self.column = self.effective_column();
        if self.column + 1 < self.row_len() {
            self.column += 1;
        } else {
            self.column = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;
    use crate::layout::KeyKind;

    fn editor() -> TextEditor {
        let mut editor = TextEditor::new();
        editor.bind(TextBuffer::with_text("abc", 16).unwrap(), true);
        editor
    }

    #[test]
    fn test_up_from_top_row_enters_cursor_mode() {
        let mut editor = editor();
        let mut selection = Selection::new();
        selection.move_up(&mut editor);
        assert!(selection.cursor_select);
        assert_eq!(selection.row, 0);
        assert!(!editor.clear_default_text());
    }

    #[test]
    fn test_down_leaves_cursor_mode_without_moving() {
        let mut selection = Selection {
            cursor_select: true,
            ..Selection::new()
        };
        selection.move_down();
        assert!(!selection.cursor_select);
        assert_eq!(selection.row, 0);
    }

    #[test]
    fn test_down_stops_at_bottom_row() {
        let mut selection = Selection::at(LayoutId::Alphanumeric, 2, 3);
        selection.move_down();
        assert_eq!((selection.row, selection.column), (2, 3));
    }

    #[test]
    fn test_up_from_backspace_shifts_right() {
        // backspace is column 9 of row 1; 9 > 14 - 6 so the column shifts right
        let mut editor = editor();
        let mut selection = Selection::at(LayoutId::Alphanumeric, 1, 9);
        selection.move_up(&mut editor);
        assert_eq!((selection.row, selection.column), (0, 10));
        assert_eq!(selection.key().kind, KeyKind::Char(b'0'));
    }

    #[test]
    fn test_up_from_right_block_keeps_digit_column() {
        let mut editor = editor();
        // '4' on row 1 column 10 goes to '1' on row 0 column 11
        let mut selection = Selection::at(LayoutId::Alphanumeric, 1, 10);
        selection.move_up(&mut editor);
        assert_eq!(selection.key().kind, KeyKind::Char(b'1'));

        // '6' on row 1 column 12 goes to '3', the last key of row 0
        let mut selection = Selection::at(LayoutId::Alphanumeric, 1, 12);
        selection.move_up(&mut editor);
        assert_eq!(selection.column, 13);
        assert_eq!(selection.key().kind, KeyKind::Char(b'3'));
    }

    #[test]
    fn test_down_from_top_row_shifts_left_near_the_end() {
        // '1' on row 0 column 11 goes to '4' on row 1 column 10
        let mut selection = Selection::at(LayoutId::Alphanumeric, 0, 11);
        selection.move_down();
        assert_eq!((selection.row, selection.column), (1, 10));
        assert_eq!(selection.key().kind, KeyKind::Char(b'4'));

        let mut selection = Selection::at(LayoutId::Alphanumeric, 0, 3);
        selection.move_down();
        assert_eq!((selection.row, selection.column), (1, 3));
    }

    #[test]
    fn test_symbol_layout_remapping() {
        let mut editor = editor();

        // ENTER (row 2 column 6) goes up two columns to backspace
        let mut selection = Selection::at(LayoutId::Symbols, 2, 6);
        selection.move_up(&mut editor);
        assert_eq!((selection.row, selection.column), (1, 8));
        assert_eq!(selection.key().kind, KeyKind::Backspace);

        // '.' (row 2 column 1) stays in column 1
        let mut selection = Selection::at(LayoutId::Symbols, 2, 1);
        selection.move_up(&mut editor);
        assert_eq!((selection.row, selection.column), (1, 1));

        // ';' (row 2 column 3) goes to '[' via +1
        let mut selection = Selection::at(LayoutId::Symbols, 2, 3);
        selection.move_up(&mut editor);
        assert_eq!((selection.row, selection.column), (1, 4));

        // backspace (row 1 column 8) goes down two columns to ENTER
        let mut selection = Selection::at(LayoutId::Symbols, 1, 8);
        selection.move_down();
        assert_eq!((selection.row, selection.column), (2, 6));
        assert_eq!(selection.key().kind, KeyKind::Enter);

        // '-' (row 1 column 2) down: column > 1 -> 1
        let mut selection = Selection::at(LayoutId::Symbols, 1, 2);
        selection.move_down();
        assert_eq!((selection.row, selection.column), (2, 1));
    }

    #[test]
    fn test_left_right_wrap() {
        let mut editor = editor();
        let mut selection = Selection::at(LayoutId::Alphanumeric, 0, 0);
        selection.move_left(&mut editor);
        assert_eq!(selection.column, 13);
        selection.move_right(&mut editor);
        assert_eq!(selection.column, 0);
    }

    #[test]
    fn test_left_right_move_text_cursor_in_cursor_mode() {
        let mut editor = editor();
        let mut selection = Selection {
            cursor_select: true,
            ..Selection::new()
        };
        selection.move_left(&mut editor);
        assert_eq!(editor.cursor(), 2);
        selection.move_right(&mut editor);
        selection.move_right(&mut editor);
        assert_eq!(editor.cursor(), 3);
        assert_eq!(selection.column, 0);
    }

    #[test]
    fn test_switch_layout_twice_preserves_column() {
        let mut selection = Selection::at(LayoutId::Alphanumeric, 2, 12);
        selection.switch_layout();
        assert_eq!(selection.layout, LayoutId::Symbols);
        assert_eq!(selection.column, 12);
        assert_eq!(selection.effective_column(), 9);
        assert!(selection.is_highlighted(2, 9));

        selection.switch_layout();
        assert_eq!(selection.layout, LayoutId::Alphanumeric);
        assert_eq!((selection.row, selection.column), (2, 12));
    }

    #[test]
    fn test_right_from_stale_column_wraps_to_start() {
        let mut editor = editor();
        let mut selection = Selection::at(LayoutId::Symbols, 2, 12);
        selection.move_right(&mut editor);
        assert_eq!(selection.column, 0);
    }

    #[test]
    fn test_left_from_stale_column_moves_visible_highlight() {
        let mut editor = editor();
        let mut selection = Selection::at(LayoutId::Alphanumeric, 2, 12);
        selection.switch_layout();
        assert_eq!(selection.effective_column(), 9);

        selection.move_left(&mut editor);
        assert_eq!(selection.column, 8);
        assert_eq!(selection.effective_column(), 8);
        assert!(selection.is_highlighted(2, 8));
    }
}
