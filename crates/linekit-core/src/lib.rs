//! Linekit Core Library
//!
//! This crate provides the engine of an interactive single-line terminal
//! editor: a bounds-checked line buffer, submitted-line history with recall,
//! key event definitions, a terminal capability abstraction, and the editing
//! session that ties them together. It is platform free; terminal backends
//! live in `linekit-io`.

pub mod key;

// Line state
pub mod buffer;
pub mod history;

// Terminal abstraction
pub mod terminal;

// Editing session
pub mod editor;

// Re-export commonly used types for convenience
pub use key::{Key, KeyEvent};

// Re-export line state types
pub use buffer::LineBuffer;
pub use history::History;

// Re-export terminal types
pub use terminal::{advance_column, RawModeGuard, Terminal, TerminalError, TerminalResult};

// Re-export session types
pub use editor::{EditAction, Editor, AUTOCOMPLETE_SENTINEL};
