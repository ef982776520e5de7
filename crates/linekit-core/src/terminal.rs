//! Terminal capability abstraction and terminal state management.
//!
//! The editor never touches the terminal directly. All reads and writes go
//! through the [`Terminal`] trait so that real sessions run on a platform
//! backend while tests substitute an in-memory fake and assert the exact
//! byte sequences and cursor positions the editor produced.

use unicode_width::UnicodeWidthChar;

use crate::KeyEvent;

/// Terminal operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalError {
    /// Platform-specific I/O error
    Io(String),
    /// The stream the backend needs is not attached to a terminal
    NotATty(String),
    /// Feature not supported on this platform
    Unsupported { feature: String, platform: String },
    /// The input source has no further key events to deliver
    InputExhausted,
}

impl std::fmt::Display for TerminalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalError::Io(msg) => write!(f, "I/O error: {msg}"),
            TerminalError::NotATty(msg) => write!(f, "not a terminal: {msg}"),
            TerminalError::Unsupported { feature, platform } => {
                write!(f, "feature '{feature}' not supported on platform '{platform}'")
            }
            TerminalError::InputExhausted => write!(f, "no more input events"),
        }
    }
}

impl std::error::Error for TerminalError {}

impl From<std::io::Error> for TerminalError {
    fn from(err: std::io::Error) -> Self {
        TerminalError::Io(err.to_string())
    }
}

/// Result type for terminal operations
pub type TerminalResult<T> = Result<T, TerminalError>;

/// A character terminal the editor can read keys from and write text to.
///
/// The trait models the single device an editing session owns: one key
/// source and one output line, with a tracked cursor column. Implementations
/// must keep the reported column in lockstep with what they write:
///
/// - `\b` moves the column one cell left, stopping at column 0
/// - `\r` returns the column to 0
/// - `\n` leaves the column unchanged (line feeds are always written as
///   part of `"\r\n"`)
/// - any other character advances the column by its display width
///
/// The session model is strictly single threaded, so no `Send` or `Sync`
/// bounds are required of implementations.
pub trait Terminal {
    /// Switch the device into raw mode for the duration of the returned
    /// guard.
    ///
    /// Raw mode disables echo and line buffering so keys arrive one event
    /// at a time. Dropping the guard restores the saved state.
    fn enable_raw_mode(&self) -> TerminalResult<RawModeGuard>;

    /// Read the next key event, blocking until one is available.
    ///
    /// The key is never echoed; rendering every accepted character is the
    /// editor's responsibility.
    fn read_key(&mut self) -> TerminalResult<KeyEvent>;

    /// Current cursor column, 0-based.
    fn cursor_column(&self) -> usize;

    /// Move the cursor to an absolute column on the current line, 0-based.
    fn set_cursor_column(&mut self, column: usize) -> TerminalResult<()>;

    /// Terminal width in columns.
    fn width(&self) -> usize;

    /// Write text at the current cursor position, advancing the column.
    fn write_text(&mut self, text: &str) -> TerminalResult<()>;
}

impl<T: Terminal + ?Sized> Terminal for Box<T> {
    fn enable_raw_mode(&self) -> TerminalResult<RawModeGuard> {
        (**self).enable_raw_mode()
    }

    fn read_key(&mut self) -> TerminalResult<KeyEvent> {
        (**self).read_key()
    }

    fn cursor_column(&self) -> usize {
        (**self).cursor_column()
    }

    fn set_cursor_column(&mut self, column: usize) -> TerminalResult<()> {
        (**self).set_cursor_column(column)
    }

    fn width(&self) -> usize {
        (**self).width()
    }

    fn write_text(&mut self, text: &str) -> TerminalResult<()> {
        (**self).write_text(text)
    }
}

/// Advance a tracked cursor column over written text.
///
/// Applies the column rules the [`Terminal`] contract requires, one
/// character at a time. Backends share this so their reported column stays
/// in lockstep with what they wrote.
pub fn advance_column(mut column: usize, text: &str) -> usize {
    for ch in text.chars() {
        match ch {
            '\x08' => column = column.saturating_sub(1),
            '\r' => column = 0,
            '\n' => {}
            _ => column += ch.width().unwrap_or(0),
        }
    }
    column
}

/// RAII guard for terminal raw mode.
///
/// Backends that reconfigure the terminal return one of these; the saved
/// state is restored when the guard is dropped or when [`restore`] is
/// called explicitly.
///
/// [`restore`]: RawModeGuard::restore
pub struct RawModeGuard {
    restore_fn: Option<Box<dyn FnOnce()>>,
    platform_info: String,
}

impl RawModeGuard {
    pub fn new<F>(restore_fn: F, platform_info: String) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            restore_fn: Some(Box::new(restore_fn)),
            platform_info,
        }
    }

    /// Human-readable description of the backend that produced this guard.
    pub fn platform_info(&self) -> &str {
        &self.platform_info
    }

    /// Check whether the saved terminal state has not been restored yet.
    pub fn is_active(&self) -> bool {
        self.restore_fn.is_some()
    }

    /// Restore the terminal state now instead of on drop.
    pub fn restore(mut self) {
        if let Some(restore_fn) = self.restore_fn.take() {
            restore_fn();
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Some(restore_fn) = self.restore_fn.take() {
            restore_fn();
        }
    }
}

impl std::fmt::Debug for RawModeGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawModeGuard")
            .field("platform_info", &self.platform_info)
            .field("active", &self.is_active())
            .finish()
    }
}
