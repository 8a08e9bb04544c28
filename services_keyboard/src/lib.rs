//! # Keyboard Service
//!
//! On-screen keyboard widget for a d-pad driven 128 px monochrome display.
//!
//! ## Philosophy
//!
//! - **Capability-based**: Drawing, time and HID output arrive as traits, never globals
//! - **Caller-owned text**: The buffer is bound in and handed back on reset
//! - **Re-entrant delivery**: Result callbacks run outside the session lock
//! - **Testable**: Manual clock and recording canvases drive every path in tests
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A Unicode text input method
//! - A layout editor
//! - A store for entered text
//!
//! ## Design
//!
//! - KeyboardWidget: Locked session around keyboard_core::KeyboardCore
//! - Clock: Monotonic and manual time sources for the overlay timeout
//! - render: Frame drawing against a Canvas
//! - KeyboardSettings: Versioned JSON configuration
//! - hid: Typing accepted text through a HID keyboard

pub mod clock;
pub mod hid;
pub mod render;
pub mod settings;
pub mod widget;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use hid::{ascii_to_hid_key, send_key, send_string, HidError, HidKeyboard};
pub use render::{Canvas, Color, Font, KeyboardView};
pub use settings::{KeyboardSettings, SettingsError, SettingsResult};
pub use widget::{KeyboardWidget, ResultCallback};
