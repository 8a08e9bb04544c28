//! Interactive keyboard session
//!
//! Translates terminal characters into d-pad events for a keyboard widget.

use input_types::{InputEvent, InputKey};
use services_keyboard::{Clock, KeyboardWidget};
use tracing::debug;

/// What a typed character asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    /// Feed an event to the widget
    Input(InputEvent),
    /// Leave the session
    Quit,
}

/// Maps a terminal character to an action
///
/// `w a s d` steer, `e` confirms, `E` long-confirms (shift), `r` repeats the
/// confirm, `b` is a short Back and `B` a long Back (delete).
pub fn map_char(ch: char) -> Option<ConsoleAction> {
    let event = match ch {
        'w' => InputEvent::short(InputKey::Up),
        's' => InputEvent::short(InputKey::Down),
        'a' => InputEvent::short(InputKey::Left),
        'd' => InputEvent::short(InputKey::Right),
        'W' => InputEvent::long(InputKey::Up),
        'S' => InputEvent::long(InputKey::Down),
        'A' => InputEvent::long(InputKey::Left),
        'D' => InputEvent::long(InputKey::Right),
        'e' => InputEvent::short(InputKey::Ok),
        'E' => InputEvent::long(InputKey::Ok),
        'r' => InputEvent::repeat(InputKey::Ok),
        'b' => InputEvent::short(InputKey::Back),
        'B' => InputEvent::long(InputKey::Back),
        'q' | 'Q' => return Some(ConsoleAction::Quit),
        _ => return None,
    };
    Some(ConsoleAction::Input(event))
}

/// Interactive console
pub struct InteractiveConsole<C: Clock> {
    widget: KeyboardWidget<C>,
    /// Events fed so far, for replay
    event_log: Vec<InputEvent>,
}

/// Result of feeding a line of input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineOutcome {
    pub consumed: usize,
    pub ignored: usize,
    pub quit: bool,
}

impl<C: Clock> InteractiveConsole<C> {
    pub fn new(widget: KeyboardWidget<C>) -> Self {
        Self {
            widget,
            event_log: Vec::new(),
        }
    }

    pub fn widget(&self) -> &KeyboardWidget<C> {
        &self.widget
    }

    pub fn event_log(&self) -> &[InputEvent] {
        &self.event_log
    }

    /// Feeds every mapped character of `line`; stops at a quit request
    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        let mut outcome = LineOutcome::default();
        for ch in line.chars() {
            match map_char(ch) {
                Some(ConsoleAction::Quit) => {
                    outcome.quit = true;
                    break;
                }
                Some(ConsoleAction::Input(event)) => {
                    debug!(%event, "console input");
                    self.event_log.push(event);
                    if self.widget.handle_input(&event) {
                        outcome.consumed += 1;
                    } else {
                        outcome.ignored += 1;
                    }
                }
                None => {}
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyboard_core::TextBuffer;
    use services_keyboard::ManualClock;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_char_mapping() {
        assert_eq!(map_char('w'), Some(ConsoleAction::Input(InputEvent::short(InputKey::Up))));
        assert_eq!(map_char('E'), Some(ConsoleAction::Input(InputEvent::long(InputKey::Ok))));
        assert_eq!(map_char('q'), Some(ConsoleAction::Quit));
        assert_eq!(map_char('x'), None);
    }

    #[test]
    fn test_line_types_text() {
        let submitted = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&submitted);
        let widget = KeyboardWidget::with_clock(ManualClock::new());
        widget.bind(
            TextBuffer::with_capacity(16).unwrap(),
            move |text: &str| *sink.lock().unwrap() = Some(text.to_string()),
            false,
        );
        let mut console = InteractiveConsole::new(widget);

        // 'a', then 's', then over to ENTER on the bottom row
        let outcome = console.process_line("sedesdddddddde");
        assert_eq!(outcome.ignored, 0);
        assert!(!outcome.quit);
        assert_eq!(console.widget().text(), "As");
        assert_eq!(submitted.lock().unwrap().as_deref(), Some("As"));
    }

    #[test]
    fn test_short_back_is_not_consumed_and_quit_stops() {
        let widget = KeyboardWidget::with_clock(ManualClock::new());
        let mut console = InteractiveConsole::new(widget);
        let outcome = console.process_line("bqe");
        assert_eq!(outcome.ignored, 1);
        assert_eq!(outcome.consumed, 0);
        assert!(outcome.quit);
        assert_eq!(console.event_log().len(), 1);
    }
}
