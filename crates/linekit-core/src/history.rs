//! Submitted-line history with a sentinel slot and a recall pointer.
//!
//! Position 0 is a reserved sentinel (the empty string) standing for "not
//! recalling"; recalled entries live behind it, newest first. Recall moves a
//! pointer over the sequence: older saturates at the oldest entry, newer is
//! a checked accessor that refuses to move past the sentinel.

/// Recorded input lines plus the recall pointer over them.
///
/// # Examples
///
/// ```
/// use linekit_core::history::History;
///
/// let mut history = History::new();
/// history.record("first");
/// history.record("second");
///
/// assert_eq!(history.recall_older(), "second");
/// assert_eq!(history.recall_older(), "first");
/// assert_eq!(history.recall_older(), "first"); // saturates at the oldest
/// assert_eq!(history.recall_newer(), Some("second"));
/// ```
#[derive(Debug, Clone)]
pub struct History {
    /// `entries[0]` is the sentinel; submitted lines are inserted at index 1
    entries: Vec<String>,
    /// Recall pointer; 0 means not recalling
    position: usize,
}

impl History {
    /// Create a history holding only the sentinel entry.
    pub fn new() -> Self {
        History {
            entries: vec![String::new()],
            position: 0,
        }
    }

    /// Total number of entries, sentinel included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no lines have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    /// Current recall pointer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check whether the pointer sits on a recalled entry.
    pub fn is_recalling(&self) -> bool {
        self.position > 0
    }

    /// Get the entry at `index`, if any. Index 0 is the sentinel.
    pub fn entry(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|s| s.as_str())
    }

    /// Record a submitted line.
    ///
    /// The line is inserted directly behind the sentinel unless it equals
    /// the line already stored there: submitting the same line twice in a
    /// row keeps a single copy, while older duplicates are kept.
    pub fn record(&mut self, line: &str) {
        if self.entries.len() == 1 || self.entries[1] != line {
            self.entries.insert(1, line.to_string());
        }
    }

    /// Move the pointer one entry toward the oldest and return the entry.
    ///
    /// Saturates: once the pointer sits on the oldest entry, further calls
    /// return that entry without moving.
    pub fn recall_older(&mut self) -> &str {
        if self.position < self.entries.len() - 1 {
            self.position += 1;
        }
        &self.entries[self.position]
    }

    /// Move the pointer one entry toward the newest and return the entry.
    ///
    /// Returns `None` when the pointer already sits on the sentinel; the
    /// pointer never moves below 0. Reaching the sentinel yields the empty
    /// string, which restores the blank line.
    pub fn recall_newer(&mut self) -> Option<&str> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        Some(&self.entries[self.position])
    }

    /// Reset the pointer to the sentinel without touching the entries.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
