//! Key definitions and key event structures for terminal input.
//!
//! This module defines the set of keys the editor reacts to, along with the
//! KeyEvent struct that carries a decoded key together with the raw bytes
//! that produced it and the printable character, if any.

/// Key represents the key inputs the editor distinguishes.
///
/// Printable input is reported as `NotDefined` with the decoded character
/// attached to the event; the editor treats every key without an explicit
/// mapping as a plain character insertion when a character is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key
    Escape,

    // Navigation keys (arrow keys)
    Up,
    Down,
    Right,
    Left,

    // Navigation and editing keys
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    Backspace,

    // Keys with a dedicated editor action
    Tab,
    Enter,

    /// Key is not defined or an unknown sequence
    NotDefined,
}

/// KeyEvent represents a decoded key input event with associated metadata.
/// This struct contains the decoded key, the raw bytes that produced it,
/// and the printable character when the input was ordinary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The decoded key type
    pub key: Key,
    /// The raw bytes that were read to produce this key event
    pub raw_bytes: Vec<u8>,
    /// The printable character for plain text input, `None` for
    /// control and navigation keys
    pub ch: Option<char>,
}

impl KeyEvent {
    /// Create a new KeyEvent with the specified key, raw bytes, and optional character
    pub fn new(key: Key, raw_bytes: Vec<u8>, ch: Option<char>) -> Self {
        Self { key, raw_bytes, ch }
    }

    /// Create a KeyEvent for a key without character content
    pub fn simple(key: Key, raw_bytes: Vec<u8>) -> Self {
        Self::new(key, raw_bytes, None)
    }

    /// Create a KeyEvent carrying a printable character
    pub fn with_char(key: Key, raw_bytes: Vec<u8>, ch: char) -> Self {
        Self::new(key, raw_bytes, Some(ch))
    }

    /// Check if this key event carries a printable character
    pub fn has_char(&self) -> bool {
        self.ch.is_some()
    }
}

impl Default for KeyEvent {
    fn default() -> Self {
        Self {
            key: Key::NotDefined,
            raw_bytes: Vec::new(),
            ch: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_creation() {
        let event = KeyEvent::new(Key::Enter, vec![0x0D], None);
        assert_eq!(event.key, Key::Enter);
        assert_eq!(event.raw_bytes, vec![0x0D]);
        assert_eq!(event.ch, None);
    }

    #[test]
    fn test_key_event_simple() {
        let event = KeyEvent::simple(Key::Backspace, vec![0x7F]);
        assert_eq!(event.key, Key::Backspace);
        assert_eq!(event.raw_bytes, vec![0x7F]);
        assert!(!event.has_char());
    }

    #[test]
    fn test_key_event_with_char() {
        let event = KeyEvent::with_char(Key::NotDefined, vec![0x61], 'a');
        assert_eq!(event.key, Key::NotDefined);
        assert_eq!(event.raw_bytes, vec![0x61]);
        assert!(event.has_char());
        assert_eq!(event.ch, Some('a'));
    }

    #[test]
    fn test_key_event_default() {
        let event = KeyEvent::default();
        assert_eq!(event.key, Key::NotDefined);
        assert!(event.raw_bytes.is_empty());
        assert!(!event.has_char());
    }

    #[test]
    fn test_key_equality() {
        assert_eq!(Key::Tab, Key::Tab);
        assert_ne!(Key::Tab, Key::Enter);
    }
}
