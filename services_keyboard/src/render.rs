//! Keyboard rendering
//!
//! Draws a [`KeyboardView`] onto a [`Canvas`] capability sized for a 128 px
//! wide monochrome screen. Rendering reads a copy of the state and never
//! touches the session.

use keyboard_core::layout::{self, KeyKind, ROW_COUNT};
use keyboard_core::shaper::{ELLIPSIS, TEXT_ORIGIN_X};
use keyboard_core::{shape_text, to_upper, KeyboardCore, Selection, ShapeInput, TextMeasure};

/// Keyboard grid origin
pub const KEYBOARD_ORIGIN: (i32, i32) = (1, 29);

/// Baseline of the text field
const TEXT_BASELINE: i32 = 22;

/// Pixel colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

/// Fonts the renderer switches between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Primary,
    Secondary,
    Keyboard,
}

/// Drawing capability
///
/// Width measurement follows the current font.
pub trait Canvas: TextMeasure {
    fn width(&self) -> usize;
    fn clear(&mut self);
    fn set_color(&mut self, color: Color);
    fn set_font(&mut self, font: Font);
    /// Draws `text` with its baseline at `y`
    fn draw_str(&mut self, x: i32, y: i32, text: &str);
    fn draw_glyph(&mut self, x: i32, y: i32, glyph: u8);
    fn draw_box(&mut self, x: i32, y: i32, width: usize, height: usize);
    fn draw_rounded_box(&mut self, x: i32, y: i32, width: usize, height: usize, radius: usize);
    fn draw_rounded_frame(&mut self, x: i32, y: i32, width: usize, height: usize, radius: usize);
    /// Draws possibly multi-line text centred on (x, y)
    fn draw_multiline_centered(&mut self, x: i32, y: i32, text: &str);
}

/// Render-time copy of the keyboard state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardView {
    pub header: String,
    pub text: String,
    pub cursor: usize,
    pub placeholder: bool,
    pub capacity: usize,
    pub selection: Selection,
    pub overlay_visible: bool,
    pub overlay_message: String,
}

impl KeyboardView {
    pub fn from_core(core: &KeyboardCore) -> Self {
        Self {
            header: core.header().to_string(),
            text: core.text().to_string(),
            cursor: core.cursor(),
            placeholder: core.clear_default_text(),
            capacity: core.capacity(),
            selection: core.selection(),
            overlay_visible: core.overlay().is_visible(),
            overlay_message: core.overlay().message().to_string(),
        }
    }

    /// Key glyphs are shown uppercase while nothing has been typed yet
    pub fn uppercase_glyphs(&self) -> bool {
        self.placeholder || self.text.is_empty()
    }
}

/// Highlight box width for a key
pub fn highlight_width(kind: KeyKind) -> usize {
    match kind {
        KeyKind::Char(_) => 7,
        KeyKind::SwitchLayout => 11,
        KeyKind::Backspace => 17,
        KeyKind::Enter => 25,
    }
}

/// Label drawn for a special key
pub fn special_label(kind: KeyKind) -> Option<&'static str> {
    match kind {
        KeyKind::Enter => Some("OK"),
        KeyKind::SwitchLayout => Some("!?"),
        KeyKind::Backspace => Some("<-"),
        KeyKind::Char(_) => None,
    }
}

/// Draws a full frame
pub fn render<C: Canvas + ?Sized>(view: &KeyboardView, canvas: &mut C) {
    canvas.clear();
    canvas.set_color(Color::Black);
    canvas.set_font(Font::Primary);

    canvas.draw_str(2, 8, &view.header);
    canvas.draw_rounded_frame(1, 12, 126, 15, 1);

    render_text_field(view, canvas);
    render_keys(view, canvas);

    if view.overlay_visible {
        render_overlay(&view.overlay_message, canvas);
    }
}

fn render_text_field<C: Canvas + ?Sized>(view: &KeyboardView, canvas: &mut C) {
    canvas.set_font(Font::Secondary);
    let origin = TEXT_ORIGIN_X as i32;

    if view.placeholder {
        let width = canvas.string_width(&view.text) + 2;
        canvas.draw_rounded_box(origin - 1, 14, width, 10, 1);
        canvas.set_color(Color::White);
    }

    let shaped = shape_text(
        &ShapeInput {
            text: &view.text,
            cursor: view.cursor,
            placeholder: view.placeholder,
            capacity: view.capacity,
            available_width: canvas.width().saturating_sub(8),
        },
        &*canvas,
    );

    if shaped.leading_ellipsis {
        canvas.draw_str(origin, TEXT_BASELINE, ELLIPSIS);
    }
    canvas.draw_str(shaped.x as i32, TEXT_BASELINE, &shaped.text);
}

fn render_keys<C: Canvas + ?Sized>(view: &KeyboardView, canvas: &mut C) {
    canvas.set_font(Font::Keyboard);
    let (origin_x, origin_y) = KEYBOARD_ORIGIN;
    let uppercase = view.uppercase_glyphs();

    for row in 0..ROW_COUNT {
        for (column, key) in layout::row(view.selection.layout, row).iter().enumerate() {
            let x = origin_x + i32::from(key.x);
            let y = origin_y + i32::from(key.y);

            canvas.set_color(Color::Black);
            if view.selection.is_highlighted(row, column) {
                canvas.draw_box(x - 1, y - 8, highlight_width(key.kind), 10);
                canvas.set_color(Color::White);
            }

            match (special_label(key.kind), key.kind) {
                (Some(label), _) => canvas.draw_str(x, y, label),
                (None, KeyKind::Char(ch)) => {
                    let glyph = if uppercase { to_upper(ch) } else { ch };
                    canvas.draw_glyph(x, y, glyph);
                }
                (None, _) => {}
            }
        }
    }
}

fn render_overlay<C: Canvas + ?Sized>(message: &str, canvas: &mut C) {
    canvas.set_font(Font::Secondary);
    canvas.set_color(Color::White);
    canvas.draw_box(8, 10, 110, 48);
    canvas.set_color(Color::Black);
    canvas.draw_rounded_frame(8, 8, 112, 50, 3);
    canvas.draw_rounded_frame(9, 9, 110, 48, 2);
    canvas.draw_str(15, 25, "!");
    canvas.draw_multiline_centered(62, 20, message);
    canvas.set_font(Font::Keyboard);
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyboard_core::{LayoutId, TextBuffer};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Clear,
        Color(Color),
        Font(Font),
        Str(i32, i32, String),
        Glyph(i32, i32, u8),
        Box(i32, i32, usize, usize),
        RoundedBox(i32, i32, usize, usize),
        RoundedFrame(i32, i32, usize, usize, usize),
        Multiline(i32, i32, String),
    }

    #[derive(Default)]
    struct RecordingCanvas {
        ops: Vec<Op>,
    }

    impl TextMeasure for RecordingCanvas {
        fn string_width(&self, text: &str) -> usize {
            text.len() * 5
        }
    }

    impl Canvas for RecordingCanvas {
        fn width(&self) -> usize {
            128
        }
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn set_color(&mut self, color: Color) {
            self.ops.push(Op::Color(color));
        }
        fn set_font(&mut self, font: Font) {
            self.ops.push(Op::Font(font));
        }
        fn draw_str(&mut self, x: i32, y: i32, text: &str) {
            self.ops.push(Op::Str(x, y, text.to_string()));
        }
        fn draw_glyph(&mut self, x: i32, y: i32, glyph: u8) {
            self.ops.push(Op::Glyph(x, y, glyph));
        }
        fn draw_box(&mut self, x: i32, y: i32, width: usize, height: usize) {
            self.ops.push(Op::Box(x, y, width, height));
        }
        fn draw_rounded_box(
            &mut self,
            x: i32,
            y: i32,
            width: usize,
            height: usize,
            _radius: usize,
        ) {
            self.ops.push(Op::RoundedBox(x, y, width, height));
        }
        fn draw_rounded_frame(
            &mut self,
            x: i32,
            y: i32,
            width: usize,
            height: usize,
            radius: usize,
        ) {
            self.ops.push(Op::RoundedFrame(x, y, width, height, radius));
        }
        fn draw_multiline_centered(&mut self, x: i32, y: i32, text: &str) {
            self.ops.push(Op::Multiline(x, y, text.to_string()));
        }
    }

    fn view_of(text: &str, placeholder: bool) -> KeyboardView {
        let mut core = KeyboardCore::new();
        core.set_header("Name");
        core.bind(TextBuffer::with_text(text, 32).unwrap(), placeholder);
        KeyboardView::from_core(&core)
    }

    fn draw(view: &KeyboardView) -> Vec<Op> {
        let mut canvas = RecordingCanvas::default();
        render(view, &mut canvas);
        canvas.ops
    }

    #[test]
    fn test_header_and_frame() {
        let ops = draw(&view_of("", false));
        assert_eq!(ops[0], Op::Clear);
        assert!(ops.contains(&Op::Str(2, 8, "Name".to_string())));
        assert!(ops.contains(&Op::RoundedFrame(1, 12, 126, 15, 1)));
    }

    #[test]
    fn test_text_with_cursor() {
        let ops = draw(&view_of("hi", false));
        assert!(ops.contains(&Op::Str(4, 22, "hi|".to_string())));
        assert!(!ops.iter().any(|op| matches!(op, Op::RoundedBox(..))));
    }

    #[test]
    fn test_placeholder_is_inverted() {
        let ops = draw(&view_of("default", true));
        let boxed = ops
            .iter()
            .position(|op| *op == Op::RoundedBox(3, 14, 37, 10))
            .unwrap();
        assert_eq!(ops[boxed + 1], Op::Color(Color::White));
        assert!(ops.contains(&Op::Str(4, 22, "default".to_string())));
    }

    #[test]
    fn test_enter_highlight_when_text_present() {
        // bound text puts the highlight on ENTER at (74, 33)
        let ops = draw(&view_of("abc", false));
        assert!(ops.contains(&Op::Box(1 + 74 - 1, 29 + 33 - 8, 25, 10)));
        assert!(ops.contains(&Op::Str(75, 62, "OK".to_string())));
        assert!(ops.contains(&Op::Str(2, 62, "!?".to_string())));
        assert!(ops.contains(&Op::Str(83, 51, "<-".to_string())));
        // glyphs stay lowercase once text exists
        assert!(ops.contains(&Op::Glyph(2, 37, b'q')));
    }

    #[test]
    fn test_glyphs_uppercase_when_empty() {
        let ops = draw(&view_of("", false));
        assert!(ops.contains(&Op::Glyph(2, 37, b'Q')));
        assert!(ops.contains(&Op::Box(1, 29, 7, 10)));
        // underscore key renders as a blank
        assert!(ops.contains(&Op::Glyph(68, 61, b' ')));
    }

    #[test]
    fn test_symbol_layout_drawn() {
        let mut view = view_of("", false);
        view.selection = Selection::at(LayoutId::Symbols, 0, 0);
        let ops = draw(&view);
        assert!(ops.contains(&Op::Glyph(3, 37, b'!')));
    }

    #[test]
    fn test_no_highlight_in_cursor_mode() {
        let mut view = view_of("", false);
        view.selection.cursor_select = true;
        let ops = draw(&view);
        assert!(!ops.iter().any(|op| matches!(op, Op::Box(..))));
    }

    #[test]
    fn test_overlay_drawn_last() {
        let mut view = view_of("ab", false);
        view.overlay_visible = true;
        view.overlay_message = "too short".to_string();
        let ops = draw(&view);

        let start = ops.iter().position(|op| *op == Op::Box(8, 10, 110, 48)).unwrap();
        assert_eq!(
            &ops[start + 1..],
            &[
                Op::Color(Color::Black),
                Op::RoundedFrame(8, 8, 112, 50, 3),
                Op::RoundedFrame(9, 9, 110, 48, 2),
                Op::Str(15, 25, "!".to_string()),
                Op::Multiline(62, 20, "too short".to_string()),
                Op::Font(Font::Keyboard),
            ]
        );
    }
}
