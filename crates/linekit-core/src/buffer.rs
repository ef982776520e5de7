//! Character buffer for the line under edit.
//!
//! LineBuffer stores the characters of the current input line, exclusive of
//! the prompt. All mutation is bounds checked: an insertion or removal at an
//! out-of-range index reports failure instead of panicking, because cursor
//! derived indices are validated at the edit site rather than trusted.

/// A mutable, bounds-checked buffer of single characters.
///
/// The buffer is indexed by character position, not byte position; every
/// stored character occupies one display cell on screen.
///
/// # Examples
///
/// ```
/// use linekit_core::buffer::LineBuffer;
///
/// let mut line = LineBuffer::new();
/// assert!(line.insert(0, 'h'));
/// assert!(line.insert(1, 'i'));
/// assert_eq!(line.text(), "hi");
/// assert_eq!(line.remove(0), Some('h'));
/// assert_eq!(line.text(), "i");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
}

impl LineBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        LineBuffer { chars: Vec::new() }
    }

    /// Number of characters currently in the buffer.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Check whether the buffer holds no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Insert `ch` at character position `index`.
    ///
    /// Valid positions are `0..=len()` (inserting at `len()` appends).
    /// Returns `true` when the character was inserted, `false` when the
    /// index was out of range and the buffer was left unchanged.
    pub fn insert(&mut self, index: usize, ch: char) -> bool {
        if index > self.chars.len() {
            return false;
        }
        self.chars.insert(index, ch);
        true
    }

    /// Remove and return the character at position `index`.
    ///
    /// Returns `None` when the index is out of range; the buffer is left
    /// unchanged in that case.
    pub fn remove(&mut self, index: usize) -> Option<char> {
        if index >= self.chars.len() {
            return None;
        }
        Some(self.chars.remove(index))
    }

    /// Remove all characters.
    pub fn clear(&mut self) {
        self.chars.clear();
    }

    /// Get the character at position `index`, if any.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Get the characters as a slice, in line order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Collect the buffer contents into a `String`.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Replace the entire contents with the characters of `text`.
    pub fn set_text(&mut self, text: &str) {
        self.chars = text.chars().collect();
    }
}

impl From<&str> for LineBuffer {
    fn from(text: &str) -> Self {
        LineBuffer {
            chars: text.chars().collect(),
        }
    }
}
