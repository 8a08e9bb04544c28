//! USB HID keystroke emulation
//!
//! Types accepted text on a host machine through a [`HidKeyboard`]
//! capability. Key codes are HID usage ids with modifier bits in the high
//! byte.

use thiserror::Error;
use tracing::{debug, warn};

/// Left shift modifier bit
pub const KEY_MOD_LEFT_SHIFT: u16 = 0x0200;

/// Delay between press and release, and between keystrokes
pub const KEYSTROKE_DELAY_MS: u32 = 10;

pub const HID_KEY_ENTER: u16 = 0x28;
pub const HID_KEY_BACKSPACE: u16 = 0x2A;
pub const HID_KEY_TAB: u16 = 0x2B;
pub const HID_KEY_SPACE: u16 = 0x2C;

/// HID error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HidError {
    #[error("HID keyboard is not connected")]
    NotConnected,
}

/// Physical keyboard emulation capability
pub trait HidKeyboard {
    fn is_connected(&self) -> bool;
    fn press(&mut self, key: u16);
    fn release(&mut self, key: u16);
    fn delay_ms(&mut self, ms: u32);
}

/// Maps an ASCII byte to a US-layout key code
pub fn ascii_to_hid_key(ch: u8) -> Option<u16> {
    let shifted = |code: u16| Some(KEY_MOD_LEFT_SHIFT | code);
    match ch {
        b'a'..=b'z' => Some(0x04 + u16::from(ch - b'a')),
        b'A'..=b'Z' => shifted(0x04 + u16::from(ch - b'A')),
        b'1'..=b'9' => Some(0x1E + u16::from(ch - b'1')),
        b'0' => Some(0x27),
        b'\n' | b'\r' => Some(HID_KEY_ENTER),
        0x08 => Some(HID_KEY_BACKSPACE),
        b'\t' => Some(HID_KEY_TAB),
        b' ' => Some(HID_KEY_SPACE),
        b'-' => Some(0x2D),
        b'=' => Some(0x2E),
        b'[' => Some(0x2F),
        b']' => Some(0x30),
        b'\\' => Some(0x31),
        b';' => Some(0x33),
        b'\'' => Some(0x34),
        b'`' => Some(0x35),
        b',' => Some(0x36),
        b'.' => Some(0x37),
        b'/' => Some(0x38),
        b'!' => shifted(0x1E),
        b'@' => shifted(0x1F),
        b'#' => shifted(0x20),
        b'$' => shifted(0x21),
        b'%' => shifted(0x22),
        b'^' => shifted(0x23),
        b'&' => shifted(0x24),
        b'*' => shifted(0x25),
        b'(' => shifted(0x26),
        b')' => shifted(0x27),
        b'_' => shifted(0x2D),
        b'+' => shifted(0x2E),
        b'{' => shifted(0x2F),
        b'}' => shifted(0x30),
        b'|' => shifted(0x31),
        b':' => shifted(0x33),
        b'"' => shifted(0x34),
        b'~' => shifted(0x35),
        b'<' => shifted(0x36),
        b'>' => shifted(0x37),
        b'?' => shifted(0x38),
        _ => None,
    }
}

/// Presses and releases a single key
pub fn send_key<H: HidKeyboard + ?Sized>(hid: &mut H, key: u16) -> Result<(), HidError> {
    if !hid.is_connected() {
        warn!(key, "HID keyboard detached");
        return Err(HidError::NotConnected);
    }
    hid.press(key);
    hid.delay_ms(KEYSTROKE_DELAY_MS);
    hid.release(key);
    Ok(())
}

/// Types `text`, skipping bytes with no key mapping
///
/// Returns the number of keystrokes sent.
pub fn send_string<H: HidKeyboard + ?Sized>(hid: &mut H, text: &str) -> Result<usize, HidError> {
    if !hid.is_connected() {
        warn!("HID keyboard detached");
        return Err(HidError::NotConnected);
    }

    let mut sent = 0;
    for ch in text.bytes() {
        let Some(key) = ascii_to_hid_key(ch) else {
            debug!(byte = ch, "no key mapping, skipped");
            continue;
        };
        hid.press(key);
        hid.delay_ms(KEYSTROKE_DELAY_MS);
        hid.release(key);
        hid.delay_ms(KEYSTROKE_DELAY_MS);
        sent += 1;
    }
    debug!(sent, "string typed");
    Ok(sent)
}
