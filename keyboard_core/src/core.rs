//! KeyboardCore state machine
//!
//! Routes d-pad events to the navigator and text editor, runs the validator on
//! ENTER and owns the validation overlay. The core never calls back into the
//! host: every entry point returns a [`CoreOutcome`] and the host decides what
//! to do with it.

use alloc::boxed::Box;
use alloc::string::{String, ToString};

use input_types::{Direction, InputEvent, InputKey, PressKind};

use crate::{
    buffer::TextBuffer,
    editor::{case_fold, TextEditor},
    layout::{KeyKind, LayoutId, ENTER_POSITION},
    navigator::Selection,
    overlay::{ValidationOverlay, VALIDATION_MESSAGE_TTL},
    snapshot::KeyboardSnapshot,
    time::{Duration, Instant},
};

/// Default minimum number of characters required to submit
pub const DEFAULT_MINIMUM_LENGTH: usize = 1;

/// Checks the text before it is submitted
///
/// A rejection carries the message shown in the validation overlay.
pub trait TextValidator {
    fn validate(&mut self, text: &str) -> Result<(), String>;
}

impl<F> TextValidator for F
where
    F: FnMut(&str) -> Result<(), String>,
{
    fn validate(&mut self, text: &str) -> Result<(), String> {
        self(text)
    }
}

/// Outcome from applying an event to the keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreOutcome {
    /// Event not consumed; the host may act on it
    Ignored,
    /// Event consumed
    Handled,
    /// ENTER accepted the text; the host must deliver the result
    Submit,
    /// The validator rejected the text and the overlay is up
    ValidationFailed(String),
    /// The event only dismissed the validation overlay
    OverlayDismissed,
}

impl CoreOutcome {
    /// Whether the event was consumed by the keyboard
    pub fn is_consumed(&self) -> bool {
        !matches!(self, CoreOutcome::Ignored)
    }
}

/// Keyboard core state machine
pub struct KeyboardCore {
    selection: Selection,
    editor: TextEditor,
    minimum_length: usize,
    header: String,
    validator: Option<Box<dyn TextValidator + Send>>,
    overlay: ValidationOverlay,
    overlay_ttl: Duration,
    now: Instant,
}

impl KeyboardCore {
    pub fn new() -> Self {
        Self {
            selection: Selection::new(),
            editor: TextEditor::new(),
            minimum_length: DEFAULT_MINIMUM_LENGTH,
            header: String::new(),
            validator: None,
            overlay: ValidationOverlay::new(),
            overlay_ttl: VALIDATION_MESSAGE_TTL,
            now: Instant::ZERO,
        }
    }

    /// Binds a buffer for editing and returns the previously bound one
    ///
    /// The cursor goes to the end of the text. A non-empty buffer puts the
    /// highlight on ENTER so the text can be accepted straight away.
    pub fn bind(&mut self, buffer: TextBuffer, clear_default_text: bool) -> Option<TextBuffer> {
        let has_text = !buffer.is_empty();
        self.selection.cursor_select = false;
        if has_text {
            let (row, column) = ENTER_POSITION;
            self.selection = Selection::at(LayoutId::Alphanumeric, row, column);
        }
        self.editor.bind(buffer, clear_default_text)
    }

    /// Releases the bound buffer, keeping every other setting
    pub fn unbind(&mut self) -> Option<TextBuffer> {
        self.editor.unbind()
    }

    /// Restores defaults and returns the bound buffer
    ///
    /// The overlay timeout returns to [`VALIDATION_MESSAGE_TTL`]; the logical
    /// clock keeps its value.
    pub fn reset(&mut self) -> Option<TextBuffer> {
        let buffer = self.editor.unbind();
        self.selection = Selection::new();
        self.minimum_length = DEFAULT_MINIMUM_LENGTH;
        self.header.clear();
        self.validator = None;
        self.overlay.reset();
        self.overlay_ttl = VALIDATION_MESSAGE_TTL;
        buffer
    }

    pub fn set_header(&mut self, header: impl Into<String>) {
        self.header = header.into();
    }

    pub fn set_minimum_length(&mut self, minimum_length: usize) {
        self.minimum_length = minimum_length;
    }

    pub fn set_validator<V>(&mut self, validator: V)
    where
        V: TextValidator + Send + 'static,
    {
        self.validator = Some(Box::new(validator));
    }

    pub fn clear_validator(&mut self) {
        self.validator = None;
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// How long the validation overlay stays up; zero means until next input
    pub fn set_overlay_timeout(&mut self, ttl: Duration) {
        self.overlay_ttl = ttl;
    }

    pub fn overlay_timeout(&self) -> Duration {
        self.overlay_ttl
    }

    /// Moves the logical clock to `now`
    ///
    /// Returns true if the validation overlay expired.
    pub fn set_time(&mut self, now: Instant) -> bool {
        if now > self.now {
            self.now = now;
        }
        self.overlay.expire(self.now)
    }

    /// Advances the logical clock by `delta`
    pub fn advance_time(&mut self, delta: Duration) -> bool {
        self.set_time(self.now + delta)
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Classifies a raw event and dispatches it
    ///
    /// Press and release edges are never consumed.
    pub fn process_input(&mut self, event: &InputEvent) -> CoreOutcome {
        let Some(kind) = event.kind.press_kind() else {
            return CoreOutcome::Ignored;
        };

        if let Some(direction) = event.key.direction() {
            return self.handle_directional(direction, kind);
        }

        match event.key {
            InputKey::Ok => self.handle_confirm(kind),
            InputKey::Back => self.handle_cancel(kind),
            _ => CoreOutcome::Ignored,
        }
    }

    /// Moves the highlight, or the text cursor in cursor-edit mode
    pub fn handle_directional(&mut self, direction: Direction, _kind: PressKind) -> CoreOutcome {
        if self.overlay.dismiss() {
            return CoreOutcome::OverlayDismissed;
        }
        self.selection.navigate(direction, &mut self.editor);
        CoreOutcome::Handled
    }

    /// Activates the highlighted key
    pub fn handle_confirm(&mut self, kind: PressKind) -> CoreOutcome {
        if self.overlay.dismiss() {
            return CoreOutcome::OverlayDismissed;
        }
        if self.selection.cursor_select {
            return CoreOutcome::Handled;
        }

        match self.selection.key().kind {
            KeyKind::Enter => self.submit(),
            KeyKind::SwitchLayout => {
                self.selection.switch_layout();
                CoreOutcome::Handled
            }
            KeyKind::Backspace => {
                self.editor.backspace();
                self.editor.set_clear_default_text(false);
                CoreOutcome::Handled
            }
            KeyKind::Char(ch) => {
                if !kind.is_repeat() {
                    let text_length = if self.editor.clear_default_text() {
                        0
                    } else {
                        self.editor.len()
                    };
                    self.editor
                        .insert(case_fold(ch, kind.is_long(), text_length == 0));
                }
                self.editor.set_clear_default_text(false);
                CoreOutcome::Handled
            }
        }
    }

    /// Back key: a short press is left to the host, long or repeat deletes
    pub fn handle_cancel(&mut self, kind: PressKind) -> CoreOutcome {
        if self.overlay.dismiss() {
            return CoreOutcome::OverlayDismissed;
        }
        match kind {
            PressKind::Short => CoreOutcome::Ignored,
            PressKind::Long | PressKind::Repeat => {
                self.editor.backspace();
                CoreOutcome::Handled
            }
        }
    }

    fn submit(&mut self) -> CoreOutcome {
        if !self.editor.is_bound() {
            return CoreOutcome::Handled;
        }

        if let Some(validator) = self.validator.as_mut() {
            if let Err(message) = validator.validate(self.editor.text()) {
                self.overlay.show(message.clone(), self.now, self.overlay_ttl);
                return CoreOutcome::ValidationFailed(message);
            }
        }

        if self.editor.len() >= self.minimum_length {
            CoreOutcome::Submit
        } else {
            CoreOutcome::Handled
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn layout(&self) -> LayoutId {
        self.selection.layout
    }

    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    pub fn text(&self) -> &str {
        self.editor.text()
    }

    pub fn cursor(&self) -> usize {
        self.editor.cursor()
    }

    pub fn clear_default_text(&self) -> bool {
        self.editor.clear_default_text()
    }

    pub fn overlay(&self) -> &ValidationOverlay {
        &self.overlay
    }

    pub fn minimum_length(&self) -> usize {
        self.minimum_length
    }

    pub fn is_bound(&self) -> bool {
        self.editor.is_bound()
    }

    pub fn capacity(&self) -> usize {
        self.editor.capacity()
    }

    /// Deterministic view of the state
    pub fn snapshot(&self) -> KeyboardSnapshot {
        KeyboardSnapshot {
            selection: self.selection,
            cursor: self.editor.cursor(),
            text: self.editor.text().to_string(),
            clear_default_text: self.editor.clear_default_text(),
            overlay_visible: self.overlay.is_visible(),
            overlay_message: self.overlay.message().to_string(),
            minimum_length: self.minimum_length,
        }
    }
}

impl Default for KeyboardCore {
    fn default() -> Self {
        Self::new()
    }
}
