//! Validation error overlay
//!
//! A single dismissible message box with a one-shot expiry deadline. Showing a
//! new message replaces the pending deadline, so at most one dismissal is ever
//! outstanding.

use crate::time::{Duration, Instant};
use alloc::string::String;

/// How long a validation message stays up without input
pub const VALIDATION_MESSAGE_TTL: Duration = Duration::from_secs(4);

/// Transient validation message state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationOverlay {
    message: String,
    visible: bool,
    deadline: Option<Instant>,
}

impl ValidationOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `message` and arms the dismissal timer
    ///
    /// A zero `ttl` keeps the overlay up until the next input.
    pub fn show(&mut self, message: String, now: Instant, ttl: Duration) {
        self.message = message;
        self.visible = true;
        self.deadline = if ttl == Duration::ZERO {
            None
        } else {
            Some(now + ttl)
        };
    }

    /// Hides the overlay and disarms the timer
    ///
    /// Returns true if it was visible. The message is kept for inspection.
    pub fn dismiss(&mut self) -> bool {
        let was_visible = self.visible;
        self.visible = false;
        self.deadline = None;
        was_visible
    }

    /// Hides the overlay if its deadline has passed
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if self.visible && now >= deadline => self.dismiss(),
            _ => false,
        }
    }

    /// Forgets the message as well
    pub fn reset(&mut self) {
        self.dismiss();
        self.message.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Pending dismissal time, if armed
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
