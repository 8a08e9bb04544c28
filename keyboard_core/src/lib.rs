//! # Keyboard Core
//!
//! State machine for a d-pad driven on-screen keyboard on a 128 px
//! monochrome display.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same input trace => same keyboard state
//! - **Mechanism over policy**: Core returns outcomes, hosts deliver results and draw
//! - **Logical time**: The overlay deadline is driven by host-supplied instants
//! - **Caller-owned text**: The buffer is bound in and handed back on reset
//!
//! ## Design
//!
//! The core provides:
//! - KeyboardCore: Event dispatcher and entry point
//! - Layout tables and the grid navigator
//! - TextEditor: Bounded single-byte text with placeholder semantics
//! - shape_text: Display projection of the buffer into the text field
//! - KeyboardSnapshot: Deterministic state for replay testing
//!
//! ## Non-Goals
//!
//! - Multi-byte text
//! - Runtime-defined layouts
//! - Drawing (see services_keyboard)

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod buffer;
pub mod core;
pub mod editor;
pub mod layout;
pub mod navigator;
pub mod overlay;
pub mod shaper;
pub mod snapshot;
pub mod time;

pub use buffer::{BufferError, TextBuffer};
pub use self::core::{CoreOutcome, KeyboardCore, TextValidator, DEFAULT_MINIMUM_LENGTH};
pub use editor::{case_fold, to_upper, TextEditor};
pub use layout::{Key, KeyKind, Layout, LayoutId};
pub use navigator::Selection;
pub use overlay::{ValidationOverlay, VALIDATION_MESSAGE_TTL};
pub use shaper::{shape_text, MonospaceMeasure, ShapeInput, ShapedText, TextMeasure};
pub use snapshot::KeyboardSnapshot;
pub use time::{Duration, Instant};
