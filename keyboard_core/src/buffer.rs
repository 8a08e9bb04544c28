//! Fixed-capacity text buffer
//!
//! Mirrors a C-style character array: `capacity` bytes of storage, a logical
//! length of at most `capacity - 1`, and a NUL byte at `len`. Only ASCII is
//! stored, so every prefix is valid UTF-8.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Errors from constructing a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Capacity must leave room for the terminator
    ZeroCapacity,
    /// Only single-byte text is supported
    NonAscii { position: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::ZeroCapacity => write!(f, "Buffer capacity must be at least 1"),
            BufferError::NonAscii { position } => {
                write!(f, "Non-ASCII byte at position {}", position)
            }
        }
    }
}

/// Text buffer with a fixed byte capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    bytes: Vec<u8>,
    len: usize,
}

impl TextBuffer {
    /// Creates an empty buffer holding at most `capacity - 1` characters
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        Ok(Self {
            bytes: vec![0; capacity],
            len: 0,
        })
    }

    /// Creates a buffer pre-filled with `text`, truncated to fit
    pub fn with_text(text: &str, capacity: usize) -> Result<Self, BufferError> {
        if let Some(position) = text.bytes().position(|b| !b.is_ascii()) {
            return Err(BufferError::NonAscii { position });
        }
        let mut buffer = Self::with_capacity(capacity)?;
        let len = text.len().min(buffer.max_len());
        buffer.bytes[..len].copy_from_slice(&text.as_bytes()[..len]);
        buffer.len = len;
        Ok(buffer)
    }

    /// Total storage including the terminator
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Longest text the buffer can hold
    pub fn max_len(&self) -> usize {
        self.capacity() - 1
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.max_len()
    }

    /// Text bytes, without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Text bytes including the NUL terminator
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes[..=self.len]
    }

    pub fn as_str(&self) -> &str {
        // Insertions only accept ASCII, so this never fails.
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// Inserts `ch` at `index`, shifting the tail right
    ///
    /// Returns false when the buffer is full, `index` is past the end, or
    /// `ch` is not ASCII.
    pub fn insert_at(&mut self, index: usize, ch: u8) -> bool {
        if self.is_full() || index > self.len || !ch.is_ascii() {
            return false;
        }
        self.bytes.copy_within(index..self.len, index + 1);
        self.bytes[index] = ch;
        self.len += 1;
        self.bytes[self.len] = 0;
        true
    }

    /// Removes the byte before `index`, shifting the tail left
    pub fn remove_before(&mut self, index: usize) -> bool {
        if index == 0 || index > self.len {
            return false;
        }
        self.bytes.copy_within(index..self.len, index - 1);
        self.len -= 1;
        self.bytes[self.len] = 0;
        true
    }

    /// Replaces the whole content with a single byte
    pub fn replace_with_byte(&mut self, ch: u8) -> bool {
        if self.max_len() == 0 || !ch.is_ascii() {
            return false;
        }
        self.bytes[0] = ch;
        self.bytes[1] = 0;
        self.len = 1;
        true
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.bytes[0] = 0;
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(TextBuffer::with_capacity(0), Err(BufferError::ZeroCapacity));
    }

    #[test]
    fn test_with_text_truncates() {
        let buffer = TextBuffer::with_text("hello world", 6).unwrap();
        assert_eq!(buffer.as_str(), "hello");
        assert_eq!(buffer.len(), 5);
        assert!(buffer.is_full());
        assert_eq!(buffer.as_bytes_with_nul(), b"hello\0");
    }

    #[test]
    fn test_with_text_rejects_non_ascii() {
        assert_eq!(
            TextBuffer::with_text("caf\u{e9}", 10),
            Err(BufferError::NonAscii { position: 3 })
        );
    }

    #[test]
    fn test_insert_in_middle() {
        let mut buffer = TextBuffer::with_text("hllo", 10).unwrap();
        assert!(buffer.insert_at(1, b'e'));
        assert_eq!(buffer.as_str(), "hello");
        assert_eq!(buffer.as_bytes_with_nul().last(), Some(&0));
    }

    #[test]
    fn test_insert_rejected_when_full() {
        let mut buffer = TextBuffer::with_text("abc", 4).unwrap();
        assert!(!buffer.insert_at(3, b'd'));
        assert_eq!(buffer.as_str(), "abc");
    }

    #[test]
    fn test_insert_rejects_bad_index_and_bytes() {
        let mut buffer = TextBuffer::with_text("ab", 8).unwrap();
        assert!(!buffer.insert_at(3, b'c'));
        assert!(!buffer.insert_at(0, 0xC3));
        assert_eq!(buffer.as_str(), "ab");
    }

    #[test]
    fn test_remove_before() {
        let mut buffer = TextBuffer::with_text("hi", 8).unwrap();
        assert!(buffer.remove_before(1));
        assert_eq!(buffer.as_str(), "i");
        assert!(!buffer.remove_before(0));
        assert!(!buffer.remove_before(5));
        assert_eq!(buffer.as_bytes_with_nul(), b"i\0");
    }

    #[test]
    fn test_replace_and_clear() {
        let mut buffer = TextBuffer::with_text("default", 10).unwrap();
        assert!(buffer.replace_with_byte(b'A'));
        assert_eq!(buffer.as_str(), "A");
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn test_single_byte_capacity_holds_nothing() {
        let mut buffer = TextBuffer::with_capacity(1).unwrap();
        assert!(buffer.is_full());
        assert!(!buffer.insert_at(0, b'a'));
        assert!(!buffer.replace_with_byte(b'a'));
    }
}
