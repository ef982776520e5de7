//! Line editing session: key interpretation, rendering, history recall, and
//! the autocomplete handshake.
//!
//! [`Editor`] owns everything one interactive session needs: the terminal,
//! the prompt, the [`LineBuffer`] being edited, the [`History`] of submitted
//! lines, and the cached cursor column a redraw restores. Each key event is
//! interpreted into an [`EditAction`], and a single dispatch point in
//! [`Editor::process_input`] applies the session consequences.
//!
//! The editor keeps the screen and the buffer in lockstep by rewriting the
//! whole visible line after every mutating key. The buffer's first character
//! renders at the base column `prompt_width - 1`, so the cursor's
//! buffer-relative offset is `column - prompt_width + 1`; every edit
//! validates the offset it derives from the live cursor instead of trusting
//! it.

use log::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::buffer::LineBuffer;
use crate::history::History;
use crate::key::{Key, KeyEvent};
use crate::terminal::{Terminal, TerminalResult};

/// Marker character prepended to the line when Tab requests completion.
///
/// A string returned from an input request that starts with this character
/// is a completion request, not a submitted line; the host resolves it and
/// resumes the session through [`Editor::autocomplete`].
pub const AUTOCOMPLETE_SENTINEL: char = '\t';

/// The edit action a single key event resolves to.
///
/// [`Editor::handle_key`] applies a key's immediate buffer and cursor
/// effects and reports one of these; the session loop owns the follow-up
/// (redraw, history recall, or returning to the caller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// A printable character was inserted at the cursor offset
    AddChar,
    /// Backspace or Delete changed the line
    UpdateLine,
    /// Cursor-only movement, or a key with no mapping
    NoUpdate,
    /// Recall the next older history entry
    HistoryUp,
    /// Recall the next newer history entry
    HistoryDown,
    /// Tab requested completion of the current line
    AutocompleteRequested,
    /// Enter submitted the line
    Submit,
}

/// An interactive single-line editing session over a [`Terminal`].
///
/// # Examples
///
/// Scripted sessions run against any terminal implementation; real hosts
/// use a platform backend and loop on the returned line:
///
/// ```no_run
/// use linekit_core::{Editor, Terminal, TerminalResult, AUTOCOMPLETE_SENTINEL};
///
/// fn run<T: Terminal>(term: T) -> TerminalResult<()> {
///     let mut editor = Editor::new(term, "db> ");
///     let mut line = editor.read_input()?;
///     while line.starts_with(AUTOCOMPLETE_SENTINEL) {
///         let completed = complete(&line[1..]);
///         line = editor.autocomplete(&completed)?;
///     }
///     println!("got: {}", line);
///     Ok(())
/// }
///
/// fn complete(partial: &str) -> String {
///     format!("{}!", partial)
/// }
/// ```
pub struct Editor<T: Terminal> {
    term: T,
    prompt: String,
    prompt_width: usize,
    line: LineBuffer,
    history: History,
    last_cursor_column: usize,
}

impl<T: Terminal> Editor<T> {
    /// Create an editor session over `terminal` with the given prompt.
    pub fn new(terminal: T, prompt: &str) -> Self {
        let prompt_width = prompt.width();
        Editor {
            term: terminal,
            prompt: prompt.to_string(),
            prompt_width,
            line: LineBuffer::new(),
            history: History::new(),
            last_cursor_column: prompt_width.saturating_sub(1),
        }
    }

    /// Current prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Display width of the current prompt in columns.
    pub fn prompt_width(&self) -> usize {
        self.prompt_width
    }

    /// Replace the prompt text.
    ///
    /// Buffer, cursor, and history are untouched; the new prompt becomes
    /// visible on the next input request (or an explicit rewrite by the
    /// caller).
    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
        self.prompt_width = prompt.width();
    }

    /// The line currently under edit.
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    /// Submitted-line history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable access to the history, e.g. to preload entries.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Column the cursor is restored to after a redraw.
    pub fn last_cursor_column(&self) -> usize {
        self.last_cursor_column
    }

    /// Screen column where the buffer's first character renders.
    pub fn base_column(&self) -> usize {
        self.prompt_width.saturating_sub(1)
    }

    /// The terminal this session runs on.
    pub fn terminal(&self) -> &T {
        &self.term
    }

    /// Mutable access to the terminal.
    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.term
    }

    /// Consume the session and return the terminal.
    pub fn into_terminal(self) -> T {
        self.term
    }

    /// Cursor offset into the buffer, derived from the live cursor column.
    /// Negative when the cursor sits left of the base column.
    fn buffer_offset(&self) -> isize {
        self.term.cursor_column() as isize - self.base_column() as isize
    }

    /// Erase every character on the current screen line back to column 0.
    pub fn clear_line(&mut self) -> TerminalResult<()> {
        while self.term.cursor_column() > 0 {
            self.term.write_text("\x08 \x08")?;
        }
        Ok(())
    }

    /// Erase the screen line back to the base column, keeping the prompt.
    ///
    /// Moves the cursor to the rightmost column first so that stale
    /// characters right of the cursor are erased as well.
    pub fn clear_line_of_stream(&mut self) -> TerminalResult<()> {
        let right_edge = self.term.width().saturating_sub(1);
        if self.term.cursor_column() < right_edge {
            self.term.set_cursor_column(right_edge)?;
        }
        let base = self.base_column();
        while self.term.cursor_column() > base {
            self.term.write_text("\x08 \x08")?;
        }
        Ok(())
    }

    /// Rewrite the visible line from the buffer and restore the cursor to
    /// the cached column.
    pub fn redraw(&mut self) -> TerminalResult<()> {
        self.clear_line_of_stream()?;
        let text = self.line.text();
        self.term.write_text(&text)?;
        self.term.set_cursor_column(self.last_cursor_column)?;
        Ok(())
    }

    /// Write characters at the cursor and cache the resulting column.
    ///
    /// The buffer is not touched; this renders text that is not part of the
    /// line under edit, such as the prompt.
    pub fn write_chars(&mut self, text: &str) -> TerminalResult<()> {
        self.term.write_text(text)?;
        self.last_cursor_column = self.term.cursor_column();
        Ok(())
    }

    /// Discard the buffer contents, install `text`, and redraw.
    fn replace_buffer(&mut self, text: &str) -> TerminalResult<()> {
        self.line.set_text(text);
        self.redraw()
    }

    /// Remove the character left of the cursor, if the offset allows it.
    ///
    /// Writes the destructive erase first, then recomputes the offset from
    /// the post-erase cursor; an out-of-range offset leaves the buffer
    /// unmodified.
    fn backspace(&mut self) -> TerminalResult<()> {
        if self.line.is_empty() || self.buffer_offset() <= 0 {
            return Ok(());
        }
        self.term.write_text("\x08 \x08")?;
        let offset = self.buffer_offset();
        if offset >= 0 {
            self.line.remove(offset as usize);
        }
        Ok(())
    }

    /// Remove the character at the cursor by stepping right and
    /// backspacing, reusing its bounds checks.
    fn delete(&mut self) -> TerminalResult<()> {
        let offset = self.buffer_offset();
        if offset >= 0 && (offset as usize) < self.line.len() {
            let col = self.term.cursor_column() + 1;
            self.term.set_cursor_column(col)?;
            self.backspace()?;
        }
        Ok(())
    }

    /// Interpret one key event.
    ///
    /// Applies the key's immediate effects (buffer mutation, cursor moves,
    /// cache updates, history recording, the completion sentinel) and
    /// reports the [`EditAction`] the session loop dispatches on. Callable
    /// with scripted events; no real terminal is required beyond the
    /// [`Terminal`] implementation the session owns.
    pub fn handle_key(&mut self, event: KeyEvent) -> TerminalResult<EditAction> {
        match event.key {
            Key::Tab => {
                self.line.insert(0, AUTOCOMPLETE_SENTINEL);
                Ok(EditAction::AutocompleteRequested)
            }
            Key::Enter => {
                let line = self.line.text();
                self.history.record(&line);
                Ok(EditAction::Submit)
            }
            Key::Backspace => {
                let column = self.term.cursor_column();
                if !self.line.is_empty() && self.buffer_offset() > 0 {
                    self.last_cursor_column = column - 1;
                } else {
                    self.last_cursor_column = column;
                }
                self.backspace()?;
                Ok(EditAction::UpdateLine)
            }
            Key::Delete => {
                self.last_cursor_column = self.term.cursor_column();
                self.delete()?;
                Ok(EditAction::UpdateLine)
            }
            Key::Left => {
                let column = self.term.cursor_column();
                if column > self.base_column() {
                    self.term.set_cursor_column(column - 1)?;
                }
                Ok(EditAction::NoUpdate)
            }
            Key::Right => {
                let column = self.term.cursor_column();
                if column < self.base_column() + self.line.len() {
                    self.term.set_cursor_column(column + 1)?;
                }
                Ok(EditAction::NoUpdate)
            }
            Key::Up => Ok(EditAction::HistoryUp),
            Key::Down => {
                if self.history.is_recalling() {
                    Ok(EditAction::HistoryDown)
                } else {
                    Ok(EditAction::NoUpdate)
                }
            }
            _ => {
                // printable input arrives as NotDefined with the char set
                if let Some(ch) = event.ch {
                    if ch.width() == Some(1) {
                        let offset = self.buffer_offset();
                        if offset >= 0 {
                            self.line.insert(offset as usize, ch);
                        }
                        self.last_cursor_column = self.term.cursor_column() + 1;
                        return Ok(EditAction::AddChar);
                    }
                }
                Ok(EditAction::NoUpdate)
            }
        }
    }

    /// Run one input request against an already rendered prompt.
    ///
    /// Reads key events until the line is submitted or completion is
    /// requested. Returns the submitted line, or the buffer contents
    /// prefixed with [`AUTOCOMPLETE_SENTINEL`] (and without a trailing
    /// newline) when Tab was pressed; in the latter case the buffer keeps
    /// its contents for the handshake.
    pub fn process_input(&mut self) -> TerminalResult<String> {
        self.history.reset();

        loop {
            let event = self.term.read_key()?;
            match self.handle_key(event)? {
                EditAction::AddChar | EditAction::UpdateLine => {
                    self.redraw()?;
                }
                EditAction::NoUpdate => {}
                EditAction::HistoryUp => {
                    let recalled = self.history.recall_older().to_string();
                    self.recall(&recalled)?;
                }
                EditAction::HistoryDown => {
                    if let Some(entry) = self.history.recall_newer() {
                        let recalled = entry.to_string();
                        self.recall(&recalled)?;
                    }
                }
                EditAction::AutocompleteRequested => {
                    let line = self.line.text();
                    debug!("autocomplete requested: {:?}", &line[1..]);
                    return Ok(line);
                }
                EditAction::Submit => {
                    self.term.write_text("\r\n")?;
                    let line = self.line.text();
                    self.line.clear();
                    debug!("line submitted, history has {} entries", self.history.len());
                    return Ok(line);
                }
            }
        }
    }

    /// Render the prompt, then run one input request.
    ///
    /// The cursor and the cached column are normalized to the base column
    /// so the first keystroke edits at offset 0.
    pub fn read_input(&mut self) -> TerminalResult<String> {
        let prompt = self.prompt.clone();
        self.write_chars(&prompt)?;
        let base = self.base_column();
        self.term.set_cursor_column(base)?;
        self.last_cursor_column = base;
        self.process_input()
    }

    /// Install the resolver's replacement text and resume the session.
    ///
    /// Second half of the completion handshake: the buffer becomes
    /// `replacement`, the cursor lands at its end, and the session loop
    /// runs again. Returns like [`Editor::process_input`], so a further Tab
    /// round trip is possible.
    pub fn autocomplete(&mut self, replacement: &str) -> TerminalResult<String> {
        debug!("autocomplete applied: {:?}", replacement);
        self.replace_buffer(replacement)?;
        let end = self.base_column() + self.line.len();
        self.term.set_cursor_column(end)?;
        self.last_cursor_column = end;
        self.process_input()
    }

    /// Replace the buffer with a recalled history entry, cursor at its end.
    fn recall(&mut self, entry: &str) -> TerminalResult<()> {
        self.line.set_text(entry);
        self.last_cursor_column = self.base_column() + self.line.len();
        self.redraw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalError;
    use std::collections::VecDeque;

    /// In-memory terminal scripted with key events; records every write and
    /// models the cursor column the way backends do.
    struct FakeTerminal {
        keys: VecDeque<KeyEvent>,
        output: String,
        column: usize,
        width: usize,
    }

    impl FakeTerminal {
        fn new() -> Self {
            FakeTerminal {
                keys: VecDeque::new(),
                output: String::new(),
                column: 0,
                width: 80,
            }
        }

        fn queue_char(&mut self, ch: char) {
            let mut buf = [0u8; 4];
            let raw = ch.encode_utf8(&mut buf).as_bytes().to_vec();
            self.keys.push_back(KeyEvent::with_char(Key::NotDefined, raw, ch));
        }

        fn queue_text(&mut self, text: &str) {
            for ch in text.chars() {
                self.queue_char(ch);
            }
        }

        fn queue_key(&mut self, key: Key) {
            self.keys.push_back(KeyEvent::simple(key, Vec::new()));
        }
    }

    impl Terminal for FakeTerminal {
        fn enable_raw_mode(&self) -> TerminalResult<crate::terminal::RawModeGuard> {
            Ok(crate::terminal::RawModeGuard::new(|| {}, "Fake".to_string()))
        }

        fn read_key(&mut self) -> TerminalResult<KeyEvent> {
            self.keys.pop_front().ok_or(TerminalError::InputExhausted)
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
            self.column = crate::terminal::advance_column(self.column, text);
            Ok(())
        }
    }

    fn editor_with(prompt: &str) -> Editor<FakeTerminal> {
        Editor::new(FakeTerminal::new(), prompt)
    }

    #[test]
    fn test_typing_builds_line_in_order() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("hello");
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "hello");
        assert!(editor.line().is_empty());
    }

    #[test]
    fn test_submit_writes_crlf_and_clears_buffer() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("ok");
        editor.terminal_mut().queue_key(Key::Enter);

        editor.read_input().unwrap();
        assert!(editor.terminal().output.ends_with("\r\n"));
        assert_eq!(editor.line().len(), 0);
    }

    #[test]
    fn test_backspace_round_trip_empties_buffer() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("abc");
        for _ in 0..3 {
            editor.terminal_mut().queue_key(Key::Backspace);
        }
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "");
    }

    #[test]
    fn test_backspace_on_empty_buffer_is_a_no_op() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_key(Key::Backspace);
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "");
    }

    #[test]
    fn test_backspace_at_line_start_keeps_buffer() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("ab");
        editor.terminal_mut().queue_key(Key::Left);
        editor.terminal_mut().queue_key(Key::Left);
        editor.terminal_mut().queue_key(Key::Backspace);
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "ab");
    }

    #[test]
    fn test_backspace_mid_line_removes_char_left_of_cursor() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("abc");
        editor.terminal_mut().queue_key(Key::Left);
        editor.terminal_mut().queue_key(Key::Backspace);
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "ac");
    }

    #[test]
    fn test_delete_removes_char_at_cursor() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("abc");
        editor.terminal_mut().queue_key(Key::Left);
        editor.terminal_mut().queue_key(Key::Left);
        editor.terminal_mut().queue_key(Key::Delete);
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "ac");
    }

    #[test]
    fn test_delete_at_end_of_line_is_a_no_op() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("abc");
        editor.terminal_mut().queue_key(Key::Delete);
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "abc");
    }

    #[test]
    fn test_insert_mid_line() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("ac");
        editor.terminal_mut().queue_key(Key::Left);
        editor.terminal_mut().queue_char('b');
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "abc");
    }

    #[test]
    fn test_cursor_stays_within_line_bounds() {
        let mut editor = editor_with("db> ");
        let base = editor.base_column();
        editor.terminal_mut().set_cursor_column(base).unwrap();

        editor.terminal_mut().queue_text("ab");
        for _ in 0..10 {
            editor.terminal_mut().queue_key(Key::Left);
        }
        for _ in 0..10 {
            editor.terminal_mut().queue_key(Key::Right);
        }

        // drive the keys one at a time to observe each cursor position
        let mut min_col = usize::MAX;
        let mut max_col = 0;
        while let Some(event) = editor.terminal_mut().keys.pop_front() {
            let action = editor.handle_key(event).unwrap();
            if matches!(action, EditAction::AddChar | EditAction::UpdateLine) {
                editor.redraw().unwrap();
            }
            min_col = min_col.min(editor.terminal().cursor_column());
            max_col = max_col.max(editor.terminal().cursor_column());
        }

        assert_eq!(editor.line().text(), "ab");
        assert_eq!(min_col, base);
        assert_eq!(max_col, base + editor.line().len());
    }

    #[test]
    fn test_right_arrow_stops_at_line_end() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("ab");
        for _ in 0..5 {
            editor.terminal_mut().queue_key(Key::Right);
        }
        editor.terminal_mut().queue_char('c');
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "abc");
        let end = editor.base_column() + 3;
        assert_eq!(editor.last_cursor_column(), end);
    }

    #[test]
    fn test_redraw_restores_cursor_to_cached_column() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("ab");
        editor.terminal_mut().queue_key(Key::Enter);
        editor.read_input().unwrap();

        editor.terminal_mut().set_cursor_column(42).unwrap();
        editor.redraw().unwrap();
        assert_eq!(
            editor.terminal().cursor_column(),
            editor.last_cursor_column()
        );
    }

    #[test]
    fn test_submit_records_history_with_duplicate_suppression() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("foo");
        editor.terminal_mut().queue_key(Key::Enter);
        editor.read_input().unwrap();

        assert_eq!(editor.history().len(), 2);
        assert_eq!(editor.history().entry(1), Some("foo"));

        editor.terminal_mut().queue_text("foo");
        editor.terminal_mut().queue_key(Key::Enter);
        editor.read_input().unwrap();
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_history_up_recalls_previous_line() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("first");
        editor.terminal_mut().queue_key(Key::Enter);
        editor.read_input().unwrap();

        editor.terminal_mut().queue_key(Key::Up);
        editor.terminal_mut().queue_key(Key::Enter);
        let line = editor.read_input().unwrap();
        assert_eq!(line, "first");
    }

    #[test]
    fn test_history_up_saturates_at_oldest() {
        let mut editor = editor_with("> ");
        for text in ["one", "two"] {
            editor.terminal_mut().queue_text(text);
            editor.terminal_mut().queue_key(Key::Enter);
            editor.read_input().unwrap();
        }

        for _ in 0..6 {
            editor.terminal_mut().queue_key(Key::Up);
        }
        editor.terminal_mut().queue_key(Key::Enter);
        let line = editor.read_input().unwrap();
        assert_eq!(line, "one");
    }

    #[test]
    fn test_history_down_returns_to_blank_line() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("cmd");
        editor.terminal_mut().queue_key(Key::Enter);
        editor.read_input().unwrap();

        editor.terminal_mut().queue_key(Key::Up);
        editor.terminal_mut().queue_key(Key::Down);
        editor.terminal_mut().queue_key(Key::Enter);
        let line = editor.read_input().unwrap();
        assert_eq!(line, "");
    }

    #[test]
    fn test_history_down_without_recall_is_a_no_op() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("kept");
        editor.terminal_mut().queue_key(Key::Down);
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "kept");
    }

    #[test]
    fn test_history_recall_places_cursor_at_line_end() {
        let mut editor = editor_with("db> ");
        editor.terminal_mut().queue_text("select");
        editor.terminal_mut().queue_key(Key::Enter);
        editor.read_input().unwrap();

        editor.terminal_mut().queue_key(Key::Up);
        editor.terminal_mut().queue_key(Key::Enter);
        editor.read_input().unwrap();
        assert_eq!(editor.last_cursor_column(), editor.base_column() + 6);
    }

    #[test]
    fn test_tab_returns_sentinel_prefixed_line_without_newline() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("he");
        editor.terminal_mut().queue_key(Key::Tab);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "\the");
        assert!(!editor.terminal().output.contains('\n'));
        // the buffer keeps its contents for the handshake
        assert_eq!(editor.line().text(), "\the");
    }

    #[test]
    fn test_autocomplete_installs_replacement_and_resumes() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("he");
        editor.terminal_mut().queue_key(Key::Tab);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "\the");

        editor.terminal_mut().queue_text("!");
        editor.terminal_mut().queue_key(Key::Enter);
        let line = editor.autocomplete("help").unwrap();
        assert_eq!(line, "help!");
    }

    #[test]
    fn test_autocomplete_cursor_lands_at_replacement_end() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("he");
        editor.terminal_mut().queue_key(Key::Tab);
        editor.read_input().unwrap();

        editor.terminal_mut().queue_key(Key::Enter);
        editor.autocomplete("help").unwrap();
        // the Enter captured "help" untouched, cursor was at its end
        assert_eq!(editor.history().entry(1), Some("help"));
    }

    #[test]
    fn test_autocomplete_handshake_is_reentrant() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_key(Key::Tab);
        let line = editor.read_input().unwrap();
        assert_eq!(line, "\t");

        editor.terminal_mut().queue_key(Key::Tab);
        let line = editor.autocomplete("more").unwrap();
        assert_eq!(line, "\tmore");

        editor.terminal_mut().queue_key(Key::Enter);
        let line = editor.autocomplete("more stuff").unwrap();
        assert_eq!(line, "more stuff");
    }

    #[test]
    fn test_escape_and_unmapped_keys_are_ignored() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_text("ab");
        editor.terminal_mut().queue_key(Key::Escape);
        editor.terminal_mut().queue_key(Key::Home);
        editor.terminal_mut().queue_key(Key::PageDown);
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "ab");
    }

    #[test]
    fn test_wide_characters_are_not_inserted() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().queue_char('界');
        editor.terminal_mut().queue_text("ok");
        editor.terminal_mut().queue_key(Key::Enter);

        let line = editor.read_input().unwrap();
        assert_eq!(line, "ok");
    }

    #[test]
    fn test_prompt_is_rendered_before_reading() {
        let mut editor = editor_with("db> ");
        editor.terminal_mut().queue_key(Key::Enter);
        editor.read_input().unwrap();
        assert!(editor.terminal().output.starts_with("db> "));
    }

    #[test]
    fn test_set_prompt_changes_base_column() {
        let mut editor = editor_with("> ");
        assert_eq!(editor.base_column(), 1);
        editor.set_prompt("sql>> ");
        assert_eq!(editor.prompt(), "sql>> ");
        assert_eq!(editor.base_column(), 5);
    }

    #[test]
    fn test_clear_line_erases_to_column_zero() {
        let mut editor = editor_with("> ");
        editor.write_chars("> abc").unwrap();
        editor.terminal_mut().output.clear();
        editor.clear_line().unwrap();
        assert_eq!(editor.terminal().output, "\x08 \x08".repeat(5));
        assert_eq!(editor.terminal().cursor_column(), 0);
    }

    #[test]
    fn test_clear_line_of_stream_stops_at_base_column() {
        let mut editor = editor_with("> ");
        editor.write_chars("> abc").unwrap();
        editor.clear_line_of_stream().unwrap();
        assert_eq!(editor.terminal().cursor_column(), editor.base_column());
    }

    #[test]
    fn test_write_chars_caches_resulting_column() {
        let mut editor = editor_with("> ");
        editor.write_chars("> ").unwrap();
        assert_eq!(editor.last_cursor_column(), 2);
    }

    #[test]
    fn test_handle_key_reports_actions() {
        let mut editor = editor_with("> ");
        editor.terminal_mut().set_cursor_column(1).unwrap();

        let action = editor
            .handle_key(KeyEvent::with_char(Key::NotDefined, vec![b'x'], 'x'))
            .unwrap();
        assert_eq!(action, EditAction::AddChar);

        let action = editor
            .handle_key(KeyEvent::simple(Key::Backspace, vec![0x7F]))
            .unwrap();
        assert_eq!(action, EditAction::UpdateLine);

        let action = editor.handle_key(KeyEvent::simple(Key::Up, vec![])).unwrap();
        assert_eq!(action, EditAction::HistoryUp);

        let action = editor.handle_key(KeyEvent::simple(Key::Down, vec![])).unwrap();
        assert_eq!(action, EditAction::NoUpdate);

        let action = editor.handle_key(KeyEvent::simple(Key::Tab, vec![0x09])).unwrap();
        assert_eq!(action, EditAction::AutocompleteRequested);

        let action = editor.handle_key(KeyEvent::simple(Key::Enter, vec![0x0D])).unwrap();
        assert_eq!(action, EditAction::Submit);
    }

    #[test]
    fn test_read_key_error_propagates() {
        let mut editor = editor_with("> ");
        // no scripted keys at all
        let err = editor.read_input().unwrap_err();
        assert_eq!(err, TerminalError::InputExhausted);
    }
}
