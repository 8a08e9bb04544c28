//! Display shaping for the text field
//!
//! Projects the buffer into what fits in the text field: the cursor glyph is
//! spliced in, a leading ellipsis slides the window so the cursor stays
//! visible, and a trailing ellipsis marks text cut at the right edge.
//! Shaping works on a scratch copy and never touches the buffer.

use alloc::string::String;

/// Glyph drawn at the cursor position
pub const CURSOR_GLYPH: char = '|';

/// Marker for hidden text
pub const ELLIPSIS: &str = "...";

/// Left edge of the text inside its frame
pub const TEXT_ORIGIN_X: usize = 4;

/// Horizontal space taken by a leading ellipsis
const LEADING_ELLIPSIS_ADVANCE: usize = 6;

/// Width budget given up when the window slides
const LEADING_ELLIPSIS_RESERVE: usize = 8;

/// Width budget given up for a trailing ellipsis
const TRAILING_ELLIPSIS_RESERVE: usize = 4;

/// String width measurement, provided by the renderer's font
pub trait TextMeasure {
    /// Pixel width of `text` in the text field font
    fn string_width(&self, text: &str) -> usize;
}

/// Fixed-pitch measurement, for hosts without a proportional font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMeasure {
    pub glyph_width: usize,
}

impl MonospaceMeasure {
    pub const fn new(glyph_width: usize) -> Self {
        Self { glyph_width }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn string_width(&self, text: &str) -> usize {
        text.len() * self.glyph_width
    }
}

/// What to shape
#[derive(Debug, Clone, Copy)]
pub struct ShapeInput<'a> {
    pub text: &'a str,
    pub cursor: usize,
    /// Placeholder text is shown whole, without a cursor glyph
    pub placeholder: bool,
    /// Capacity of the bound buffer, bounds the trailing ellipsis
    pub capacity: usize,
    /// Width available to the text, in pixels
    pub available_width: usize,
}

/// Shaped text field content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedText {
    /// Visible text, ellipses and cursor glyph included (leading ellipsis excluded)
    pub text: String,
    /// X coordinate where `text` starts
    pub x: usize,
    /// A leading ellipsis must be drawn at [`TEXT_ORIGIN_X`]
    pub leading_ellipsis: bool,
    pub trailing_ellipsis: bool,
    pub placeholder: bool,
}

/// Largest char boundary of `text` at or below `index`
fn floor_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Shapes the buffer for display
///
/// The buffer is ASCII, so byte and glyph positions coincide. Other input is
/// accepted; the cursor and every cut snap down to a char boundary.
pub fn shape_text<M: TextMeasure + ?Sized>(input: &ShapeInput<'_>, measure: &M) -> ShapedText {
    let cursor = floor_boundary(input.text, input.cursor);
    let mut scratch = String::from(input.text);
    if !input.placeholder {
        scratch.insert(cursor, CURSOR_GLYPH);
    }

    let mut x = TEXT_ORIGIN_X;
    let mut budget = input.available_width;
    let mut start = 0;
    let mut leading_ellipsis = false;

    if cursor > 0 && measure.string_width(&scratch) > budget {
        leading_ellipsis = true;
        x += LEADING_ELLIPSIS_ADVANCE;
        budget = budget.saturating_sub(LEADING_ELLIPSIS_RESERVE);
        while start < scratch.len()
            && start < cursor
            && measure.string_width(&scratch[start..]) > budget
        {
            start += scratch[start..].chars().next().map_or(1, char::len_utf8);
        }
    }

    let mut visible = String::from(&scratch[start..]);
    let mut trailing_ellipsis = false;

    if measure.string_width(&visible) > budget {
        let budget = budget.saturating_sub(TRAILING_ELLIPSIS_RESERVE);
        let ellipsis_width = measure.string_width(ELLIPSIS);
        let mut keep = visible.len();
        while keep > 0 && measure.string_width(&visible[..keep]) + ellipsis_width > budget {
            keep = floor_boundary(&visible, keep - 1);
        }
        if keep + ELLIPSIS.len() < input.capacity {
            visible.truncate(keep);
            visible.push_str(ELLIPSIS);
            trailing_ellipsis = true;
        } else {
            let mut fit = visible.len();
            while fit > 0 && measure.string_width(&visible[..fit]) > budget {
                fit = floor_boundary(&visible, fit - 1);
            }
            visible.truncate(fit);
        }
    }

    ShapedText {
        text: visible,
        x,
        leading_ellipsis,
        trailing_ellipsis,
        placeholder: input.placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEASURE: MonospaceMeasure = MonospaceMeasure::new(5);

    fn shape(text: &str, cursor: usize, placeholder: bool, width: usize) -> ShapedText {
        shape_text(
            &ShapeInput {
                text,
                cursor,
                placeholder,
                capacity: 64,
                available_width: width,
            },
            &MEASURE,
        )
    }

    #[test]
    fn test_short_text_gets_cursor_glyph() {
        let shaped = shape("hello", 2, false, 120);
        assert_eq!(shaped.text, "he|llo");
        assert_eq!(shaped.x, TEXT_ORIGIN_X);
        assert!(!shaped.leading_ellipsis);
        assert!(!shaped.trailing_ellipsis);
    }

    #[test]
    fn test_placeholder_has_no_cursor_glyph() {
        let shaped = shape("default", 7, true, 120);
        assert_eq!(shaped.text, "default");
        assert!(shaped.placeholder);
    }

    #[test]
    fn test_cursor_is_clamped() {
        let shaped = shape("ab", 10, false, 120);
        assert_eq!(shaped.text, "ab|");
    }

    #[test]
    fn test_window_slides_to_keep_cursor_visible() {
        // 20 chars + cursor = 105 px, budget 50 px
        let text = "abcdefghijklmnopqrst";
        let shaped = shape(text, 20, false, 50);
        assert!(shaped.leading_ellipsis);
        assert_eq!(shaped.x, TEXT_ORIGIN_X + 6);
        // budget shrinks to 42 px: 8 glyphs fit, and the cursor is the last one
        assert_eq!(shaped.text, "nopqrst|");
        assert!(!shaped.trailing_ellipsis);
    }

    #[test]
    fn test_cursor_at_start_truncates_tail() {
        let text = "abcdefghijklmnopqrst";
        let shaped = shape(text, 0, false, 50);
        assert!(!shaped.leading_ellipsis);
        assert!(shaped.trailing_ellipsis);
        // 46 px budget minus 15 px of ellipsis leaves room for 6 glyphs
        assert_eq!(shaped.text, "|abcde...");
    }

    #[test]
    fn test_slide_is_bounded_by_cursor() {
        // cursor at 2 can only drop two characters from the front
        let text = "abcdefghijklmnopqrst";
        let shaped = shape(text, 2, false, 50);
        assert!(shaped.leading_ellipsis);
        assert!(shaped.trailing_ellipsis);
        assert_eq!(shaped.text, "|cde...");
    }

    #[test]
    fn test_trailing_ellipsis_respects_capacity() {
        let shaped = shape_text(
            &ShapeInput {
                text: "abcdefghij",
                cursor: 0,
                placeholder: true,
                capacity: 5,
                available_width: 40,
            },
            &MEASURE,
        );
        // four glyphs plus the ellipsis would not fit a 5 byte buffer
        assert!(!shaped.trailing_ellipsis);
        assert_eq!(shaped.text, "abcdefg");
    }

    #[test]
    fn test_shaping_fits_available_width() {
        let text = "the quick brown fox jumps over the lazy dog";
        for cursor in 0..=text.len() {
            let shaped = shape(text, cursor, false, 120);
            let mut budget = 120;
            if shaped.leading_ellipsis {
                budget -= 8;
            }
            assert!(MEASURE.string_width(&shaped.text) <= budget, "cursor {cursor}: {shaped:?}");
            if !shaped.trailing_ellipsis {
                assert!(shaped.text.contains(CURSOR_GLYPH), "cursor {cursor}: {shaped:?}");
            }
        }
    }

    #[test]
    fn test_non_ascii_input_cuts_on_char_boundaries() {
        let text = "h\u{e9}llo w\u{f6}rld \u{fc}n\u{ef}code";
        for cursor in 0..=text.len() + 1 {
            let shaped = shape(text, cursor, false, 40);
            assert!(MEASURE.string_width(&shaped.text) <= 40, "cursor {cursor}: {shaped:?}");
        }
    }
}
