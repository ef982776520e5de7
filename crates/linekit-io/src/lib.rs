//! Terminal backends for linekit.
//!
//! Provides the platform implementations behind [`Terminal`]:
//! - `UnixVtTerminal` (POSIX/VT)
//! - `MockTerminal` (scripted input and captured output for tests)

// Re-export core types and traits
pub use linekit_core::{
    advance_column, EditAction, Editor, History, Key, KeyEvent, LineBuffer, RawModeGuard,
    Terminal, TerminalError, TerminalResult, AUTOCOMPLETE_SENTINEL,
};

/// Create the interactive terminal for the current platform.
///
/// The terminal comes back boxed so callers never name the platform type;
/// hand it to [`Editor::new`] to start a session.
pub fn create_terminal() -> TerminalResult<Box<dyn Terminal>> {
    #[cfg(unix)]
    {
        let terminal = unix::UnixVtTerminal::new()?;
        Ok(Box::new(terminal))
    }

    #[cfg(not(unix))]
    {
        Err(TerminalError::Unsupported {
            feature: "interactive terminal".to_string(),
            platform: std::env::consts::OS.to_string(),
        })
    }
}

// Platform-specific modules
#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::UnixVtTerminal;

// Mock implementation for testing
pub mod mock;
