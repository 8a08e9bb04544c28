//! # CLI Console (Demo)
//!
//! Terminal host for the on-screen keyboard: reads d-pad keystrokes from
//! stdin, feeds them to a keyboard widget and prints the screen as text.
//! It is NOT a terminal UI toolkit.

pub mod interactive;
pub mod screen;

pub use interactive::{map_char, ConsoleAction, InteractiveConsole, LineOutcome};
pub use screen::TextCanvas;
