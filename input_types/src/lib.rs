#![no_std]

//! # Input Types
//!
//! Input event vocabulary for a five-button directional pad.
//!
//! ## Philosophy
//!
//! - **Events, not scan codes**: The host classifies raw button edges into
//!   short, long and repeat events before the keyboard sees them
//! - **Explicit, not ambient**: Widgets receive events as values, never poll hardware
//! - **Testable**: Events are serializable and can be recorded and replayed
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A button debouncer or long-press timer (the host owns that)
//! - A full keyboard key map

extern crate alloc;

use core::fmt;
use serde::{Deserialize, Serialize};

/// Physical button on the directional pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKey {
    Up,
    Down,
    Left,
    Right,
    /// Center confirm button
    Ok,
    /// Back / cancel button
    Back,
}

impl InputKey {
    /// Returns the direction for the four arrow buttons
    pub fn direction(&self) -> Option<Direction> {
        match self {
            InputKey::Up => Some(Direction::Up),
            InputKey::Down => Some(Direction::Down),
            InputKey::Left => Some(Direction::Left),
            InputKey::Right => Some(Direction::Right),
            InputKey::Ok | InputKey::Back => None,
        }
    }
}

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Ok => write!(f, "ok"),
            Self::Back => write!(f, "back"),
        }
    }
}

/// Kind of input event
///
/// `Press` and `Release` are raw edges. `Short`, `Long` and `Repeat` are
/// classified events produced by the host after a press completes or is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    /// Button went down
    Press,
    /// Button went up
    Release,
    /// Press and release within the long-press threshold
    Short,
    /// Button held past the long-press threshold
    Long,
    /// Button still held after a long press (auto-repeat)
    Repeat,
}

impl InputType {
    /// Classification relevant to the keyboard, `None` for raw edges
    pub fn press_kind(&self) -> Option<PressKind> {
        match self {
            InputType::Short => Some(PressKind::Short),
            InputType::Long => Some(PressKind::Long),
            InputType::Repeat => Some(PressKind::Repeat),
            InputType::Press | InputType::Release => None,
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Press => write!(f, "press"),
            Self::Release => write!(f, "release"),
            Self::Short => write!(f, "short"),
            Self::Long => write!(f, "long"),
            Self::Repeat => write!(f, "repeat"),
        }
    }
}

/// Classified press, as consumed by widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressKind {
    /// Plain tap
    Short,
    /// Held tap, used as "shift" on confirm
    Long,
    /// Auto-repeat while held
    Repeat,
}

impl PressKind {
    pub fn is_long(&self) -> bool {
        *self == PressKind::Long
    }

    pub fn is_repeat(&self) -> bool {
        *self == PressKind::Repeat
    }
}

/// One of the four directional moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl From<Direction> for InputKey {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => InputKey::Up,
            Direction::Down => InputKey::Down,
            Direction::Left => InputKey::Left,
            Direction::Right => InputKey::Right,
        }
    }
}

/// Input event
///
/// A single event from the directional pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputEvent {
    /// Which button
    pub key: InputKey,
    /// What happened to it
    pub kind: InputType,
}

impl InputEvent {
    /// Creates a new input event
    pub fn new(key: InputKey, kind: InputType) -> Self {
        Self { key, kind }
    }

    /// Creates a short press event
    pub fn short(key: InputKey) -> Self {
        Self::new(key, InputType::Short)
    }

    /// Creates a long press event
    pub fn long(key: InputKey) -> Self {
        Self::new(key, InputType::Long)
    }

    /// Creates a repeat event
    pub fn repeat(key: InputKey) -> Self {
        Self::new(key, InputType::Repeat)
    }

    /// Creates a raw press edge
    pub fn press(key: InputKey) -> Self {
        Self::new(key, InputType::Press)
    }

    /// Creates a raw release edge
    pub fn release(key: InputKey) -> Self {
        Self::new(key, InputType::Release)
    }

    /// Returns true for the four arrow buttons
    pub fn is_directional(&self) -> bool {
        self.key.direction().is_some()
    }

    /// Returns true for raw press/release edges
    pub fn is_edge(&self) -> bool {
        matches!(self.kind, InputType::Press | InputType::Release)
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.kind)
    }
}
