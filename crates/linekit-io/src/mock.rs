//! Mock terminal for tests and scripted sessions.
//!
//! Keys are served from a queue and every write is captured twice: as a raw
//! transcript for exact byte assertions, and as a cell grid that applies the
//! backspace/carriage-return rules so tests can check what a user would
//! actually see on screen.

use std::collections::VecDeque;

use linekit_core::{
    advance_column, Key, KeyEvent, RawModeGuard, Terminal, TerminalError, TerminalResult,
};

const DEFAULT_WIDTH: usize = 80;

/// In-memory terminal with scripted input and captured output.
///
/// # Examples
///
/// ```
/// use linekit_io::mock::MockTerminal;
/// use linekit_io::{Editor, Key};
///
/// let mut term = MockTerminal::new();
/// term.queue_text_input("hi");
/// term.queue_key(Key::Enter);
///
/// let mut editor = Editor::new(term, "> ");
/// assert_eq!(editor.read_input().unwrap(), "hi");
/// assert_eq!(editor.terminal().scrolled_lines(), [">hi"]);
/// ```
pub struct MockTerminal {
    input_queue: VecDeque<KeyEvent>,
    output: String,
    cells: Vec<char>,
    scrolled: Vec<String>,
    column: usize,
    width: usize,
}

impl Default for MockTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTerminal {
    pub fn new() -> Self {
        Self::with_width(DEFAULT_WIDTH)
    }

    /// Create a mock reporting the given width.
    pub fn with_width(width: usize) -> Self {
        Self {
            input_queue: VecDeque::new(),
            output: String::new(),
            cells: Vec::new(),
            scrolled: Vec::new(),
            column: 0,
            width,
        }
    }

    /// Queue a key event.
    pub fn queue_key_event(&mut self, event: KeyEvent) {
        self.input_queue.push_back(event);
    }

    /// Queue a named key. The mock has no wire format, so raw bytes stay empty.
    pub fn queue_key(&mut self, key: Key) {
        self.input_queue.push_back(KeyEvent::simple(key, Vec::new()));
    }

    /// Queue text as a sequence of character key events.
    pub fn queue_text_input(&mut self, text: &str) {
        for ch in text.chars() {
            let mut buf = [0u8; 4];
            let raw = ch.encode_utf8(&mut buf).as_bytes().to_vec();
            self.input_queue
                .push_back(KeyEvent::with_char(Key::NotDefined, raw, ch));
        }
    }

    /// Queue multiple key events at once.
    pub fn queue_key_events(&mut self, events: &[KeyEvent]) {
        for event in events {
            self.input_queue.push_back(event.clone());
        }
    }

    /// Number of queued events.
    pub fn queued_event_count(&self) -> usize {
        self.input_queue.len()
    }

    /// Drop all queued events.
    pub fn clear_queue(&mut self) {
        self.input_queue.clear();
    }

    /// Everything written so far, byte for byte.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Clear the captured transcript. Screen cells are left as they are.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// The current screen line as a user would see it, trailing blanks
    /// trimmed.
    pub fn screen_line(&self) -> String {
        let line: String = self.cells.iter().collect();
        line.trim_end().to_string()
    }

    /// Lines committed by a newline, oldest first.
    pub fn scrolled_lines(&self) -> &[String] {
        &self.scrolled
    }

    fn put_char(&mut self, ch: char) {
        match ch {
            '\x08' => self.column = self.column.saturating_sub(1),
            '\r' => self.column = 0,
            '\n' => {
                self.scrolled.push(self.screen_line());
                self.cells.clear();
            }
            _ => {
                let mut buf = [0u8; 4];
                let advanced = advance_column(self.column, ch.encode_utf8(&mut buf));
                if advanced > self.column {
                    if self.cells.len() <= self.column {
                        self.cells.resize(self.column + 1, ' ');
                    }
                    self.cells[self.column] = ch;
                }
                self.column = advanced;
            }
        }
    }
}

impl Terminal for MockTerminal {
    fn enable_raw_mode(&self) -> TerminalResult<RawModeGuard> {
        Ok(RawModeGuard::new(|| {}, "Mock".to_string()))
    }

    fn read_key(&mut self) -> TerminalResult<KeyEvent> {
        self.input_queue
            .pop_front()
            .ok_or(TerminalError::InputExhausted)
    }

    fn cursor_column(&self) -> usize {
        self.column
    }

    fn set_cursor_column(&mut self, column: usize) -> TerminalResult<()> {
        self.column = column;
        Ok(())
    }

    fn width(&self) -> usize {
        self.width
    }

    fn write_text(&mut self, text: &str) -> TerminalResult<()> {
        self.output.push_str(text);
        for ch in text.chars() {
            self.put_char(ch);
        }
        Ok(())
    }
}
