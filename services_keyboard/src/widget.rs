//! Keyboard widget
//!
//! Wraps a [`KeyboardCore`] session behind a lock so input, timer and render
//! callers can share it. Every handler holds the lock for the duration of the
//! state change only; the result callback runs after the lock is released and
//! may call back into the widget.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use input_types::{Direction, InputEvent, PressKind};
use keyboard_core::{
    CoreOutcome, KeyboardCore, KeyboardSnapshot, Selection, TextBuffer, TextValidator,
};
use tracing::{debug, info, warn};

use crate::clock::{Clock, MonotonicClock};
use crate::render::{self, Canvas, KeyboardView};
use crate::settings::KeyboardSettings;

/// Receives the accepted text
pub type ResultCallback = Box<dyn FnMut(&str) + Send>;

struct Session {
    core: KeyboardCore,
    on_result: Option<ResultCallback>,
    /// Bumped whenever the binding changes
    generation: u64,
}

impl Session {
    fn new() -> Self {
        Self {
            core: KeyboardCore::new(),
            on_result: None,
            generation: 0,
        }
    }
}

/// Result delivery prepared under the lock
struct Delivery {
    callback: ResultCallback,
    text: String,
    generation: u64,
}

/// On-screen keyboard widget
pub struct KeyboardWidget<C: Clock = MonotonicClock> {
    session: Arc<Mutex<Session>>,
    clock: C,
}

impl KeyboardWidget<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for KeyboardWidget<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Clone> Clone for KeyboardWidget<C> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            clock: self.clock.clone(),
        }
    }
}

impl<C: Clock> KeyboardWidget<C> {
    pub fn with_clock(clock: C) -> Self {
        let widget = Self {
            session: Arc::new(Mutex::new(Session::new())),
            clock,
        };
        {
            let mut session = widget.lock();
            session.core.set_time(widget.clock.now());
        }
        widget
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Binds a buffer and the callback that receives the accepted text
    ///
    /// Returns the previously bound buffer.
    pub fn bind<F>(
        &self,
        buffer: TextBuffer,
        on_result: F,
        clear_default_text: bool,
    ) -> Option<TextBuffer>
    where
        F: FnMut(&str) + Send + 'static,
    {
        let mut session = self.lock();
        session.generation += 1;
        session.on_result = Some(Box::new(on_result));
        info!(
            capacity = buffer.capacity(),
            len = buffer.len(),
            clear_default_text,
            "keyboard bound"
        );
        session.core.bind(buffer, clear_default_text)
    }

    /// Releases the buffer and drops the result callback
    pub fn unbind(&self) -> Option<TextBuffer> {
        let mut session = self.lock();
        session.generation += 1;
        session.on_result = None;
        debug!("keyboard unbound");
        session.core.unbind()
    }

    /// Restores defaults and returns the bound buffer
    pub fn reset(&self) -> Option<TextBuffer> {
        let mut session = self.lock();
        session.generation += 1;
        session.on_result = None;
        info!("keyboard reset");
        session.core.reset()
    }

    pub fn set_header(&self, header: impl Into<String>) {
        self.lock().core.set_header(header);
    }

    pub fn set_minimum_length(&self, minimum_length: usize) {
        self.lock().core.set_minimum_length(minimum_length);
    }

    pub fn set_validator<V>(&self, validator: V)
    where
        V: TextValidator + Send + 'static,
    {
        self.lock().core.set_validator(validator);
    }

    pub fn clear_validator(&self) {
        self.lock().core.clear_validator();
    }

    pub fn has_validator(&self) -> bool {
        self.lock().core.has_validator()
    }

    pub fn apply_settings(&self, settings: &KeyboardSettings) {
        let mut session = self.lock();
        session.core.set_header(settings.header.clone());
        session.core.set_minimum_length(settings.minimum_length);
        session.core.set_overlay_timeout(settings.overlay_timeout());
        debug!(
            minimum_length = settings.minimum_length,
            overlay_timeout_ms = settings.overlay_timeout_ms,
            "settings applied"
        );
    }

    /// Advances the session clock; returns true if the overlay timed out
    pub fn tick(&self) -> bool {
        let now = self.clock.now();
        let expired = self.lock().core.set_time(now);
        if expired {
            debug!("validation message timed out");
        }
        expired
    }

    /// Handles a raw input event; returns whether it was consumed
    pub fn handle_input(&self, event: &InputEvent) -> bool {
        self.dispatch(|core| core.process_input(event)).is_consumed()
    }

    pub fn handle_directional(&self, direction: Direction, kind: PressKind) -> CoreOutcome {
        self.dispatch(|core| core.handle_directional(direction, kind))
    }

    pub fn handle_confirm(&self, kind: PressKind) -> CoreOutcome {
        self.dispatch(|core| core.handle_confirm(kind))
    }

    pub fn handle_cancel(&self, kind: PressKind) -> CoreOutcome {
        self.dispatch(|core| core.handle_cancel(kind))
    }

    fn dispatch<F>(&self, apply: F) -> CoreOutcome
    where
        F: FnOnce(&mut KeyboardCore) -> CoreOutcome,
    {
        let now = self.clock.now();
        let (outcome, delivery) = {
            let mut session = self.lock();
            session.core.set_time(now);
            let outcome = apply(&mut session.core);
            let delivery = match &outcome {
                CoreOutcome::Submit => {
                    let text = session.core.text().to_string();
                    let generation = session.generation;
                    session.on_result.take().map(|callback| Delivery {
                        callback,
                        text,
                        generation,
                    })
                }
                CoreOutcome::ValidationFailed(message) => {
                    warn!(%message, "validation failed");
                    None
                }
                CoreOutcome::OverlayDismissed => {
                    debug!("validation message dismissed");
                    None
                }
                _ => None,
            };
            (outcome, delivery)
        };

        if let Some(mut delivery) = delivery {
            info!(len = delivery.text.len(), "text submitted");
            (delivery.callback)(&delivery.text);

            let mut session = self.lock();
            if session.generation == delivery.generation && session.on_result.is_none() {
                session.on_result = Some(delivery.callback);
            }
        }

        outcome
    }

    /// Copy of the state for rendering
    pub fn view(&self) -> KeyboardView {
        KeyboardView::from_core(&self.lock().core)
    }

    /// Draws the current frame
    pub fn render<K: Canvas + ?Sized>(&self, canvas: &mut K) {
        self.tick();
        let view = self.view();
        render::render(&view, canvas);
    }

    pub fn snapshot(&self) -> KeyboardSnapshot {
        self.lock().core.snapshot()
    }

    pub fn text(&self) -> String {
        self.lock().core.text().to_string()
    }

    pub fn cursor(&self) -> usize {
        self.lock().core.cursor()
    }

    pub fn selection(&self) -> Selection {
        self.lock().core.selection()
    }

    pub fn header(&self) -> String {
        self.lock().core.header().to_string()
    }

    pub fn minimum_length(&self) -> usize {
        self.lock().core.minimum_length()
    }

    pub fn is_bound(&self) -> bool {
        self.lock().core.is_bound()
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.lock().core.overlay().is_visible()
    }

    pub fn overlay_message(&self) -> String {
        self.lock().core.overlay().message().to_string()
    }
}
