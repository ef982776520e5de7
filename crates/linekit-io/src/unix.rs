//! Unix VT terminal backend.
//!
//! Reads raw bytes from stdin behind a poll loop and decodes them into
//! [`KeyEvent`]s; writes go straight to stdout with the cursor column
//! tracked in software. The editor repositions the cursor with CHA
//! (`ESC [ n G`), so only column movement on the current line is needed.

use std::io;
use std::os::unix::io::AsRawFd;

use linekit_core::{
    advance_column, Key, KeyEvent, RawModeGuard, Terminal, TerminalError, TerminalResult,
};
use log::trace;

/// Fallback width when the size query fails, e.g. under a pty without
/// TIOCGWINSZ support.
const DEFAULT_WIDTH: usize = 80;

/// How long a lone ESC waits for sequence bytes before it is reported as
/// the Escape key, in milliseconds.
const ESC_FOLLOW_TIMEOUT_MS: i32 = 50;

/// Interactive terminal on Unix file descriptors.
pub struct UnixVtTerminal {
    stdin_fd: i32,
    stdout_fd: i32,
    column: usize,
    fallback_width: usize,
}

impl UnixVtTerminal {
    /// Open the terminal on stdin/stdout.
    ///
    /// Both streams must be attached to a TTY; callers typically enable raw
    /// mode next and keep the returned guard alive for the session.
    pub fn new() -> TerminalResult<Self> {
        let stdin_fd = io::stdin().as_raw_fd();
        if unsafe { libc::isatty(stdin_fd) } == 0 {
            return Err(TerminalError::NotATty("stdin is not a terminal".to_string()));
        }
        if unsafe { libc::isatty(libc::STDOUT_FILENO) } == 0 {
            return Err(TerminalError::NotATty("stdout is not a terminal".to_string()));
        }

        Ok(Self {
            stdin_fd,
            stdout_fd: libc::STDOUT_FILENO,
            column: 0,
            fallback_width: Self::query_width().unwrap_or(DEFAULT_WIDTH),
        })
    }

    fn query_width() -> Option<usize> {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        if unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) } == -1 {
            return None;
        }
        if ws.ws_col == 0 {
            None
        } else {
            Some(ws.ws_col as usize)
        }
    }

    fn write_bytes(&self, bytes: &[u8]) -> TerminalResult<()> {
        let mut written = 0;
        while written < bytes.len() {
            match unsafe {
                libc::write(
                    self.stdout_fd,
                    bytes[written..].as_ptr() as *const libc::c_void,
                    bytes.len() - written,
                )
            } {
                -1 => {
                    let error = io::Error::last_os_error();
                    if error.kind() != io::ErrorKind::Interrupted {
                        return Err(error.into());
                    }
                }
                0 => break,
                n => written += n as usize,
            }
        }
        Ok(())
    }

    /// Wait for stdin to become readable. `timeout_ms < 0` blocks.
    fn poll_readable(&self, timeout_ms: i32) -> TerminalResult<bool> {
        loop {
            let mut poll_fd = libc::pollfd {
                fd: self.stdin_fd,
                events: libc::POLLIN,
                revents: 0,
            };
            let ready = unsafe { libc::poll(&mut poll_fd as *mut libc::pollfd, 1, timeout_ms) };
            if ready == -1 {
                let error = io::Error::last_os_error();
                if error.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(error.into());
            }
            return Ok(ready > 0);
        }
    }

    /// Read one byte; call only after poll reported readiness.
    /// `None` means the stream hit EOF.
    fn read_raw_byte(&self) -> TerminalResult<Option<u8>> {
        let mut byte = 0u8;
        loop {
            let n = unsafe {
                libc::read(self.stdin_fd, &mut byte as *mut u8 as *mut libc::c_void, 1)
            };
            if n == -1 {
                let error = io::Error::last_os_error();
                if error.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(error.into());
            }
            return Ok(if n == 0 { None } else { Some(byte) });
        }
    }

    fn read_byte_blocking(&self) -> TerminalResult<u8> {
        loop {
            if self.poll_readable(100)? {
                return match self.read_raw_byte()? {
                    Some(byte) => Ok(byte),
                    None => Err(TerminalError::InputExhausted),
                };
            }
        }
    }

    fn read_byte_timeout(&self, timeout_ms: i32) -> TerminalResult<Option<u8>> {
        if self.poll_readable(timeout_ms)? {
            self.read_raw_byte()
        } else {
            Ok(None)
        }
    }

    fn read_escape_sequence(&self) -> TerminalResult<KeyEvent> {
        match self.read_byte_timeout(ESC_FOLLOW_TIMEOUT_MS)? {
            Some(b'[') => self.read_csi_sequence(),
            Some(b'O') => self.read_ss3_sequence(),
            // Alt-modified byte; reported as Escape, the byte is dropped
            Some(other) => Ok(KeyEvent::simple(Key::Escape, vec![0x1B, other])),
            None => Ok(KeyEvent::simple(Key::Escape, vec![0x1B])),
        }
    }

    fn read_csi_sequence(&self) -> TerminalResult<KeyEvent> {
        let mut raw = vec![0x1B, b'['];
        // parameter bytes run until a final byte in 0x40..=0x7E
        let final_byte = loop {
            match self.read_byte_timeout(ESC_FOLLOW_TIMEOUT_MS)? {
                Some(byte) => {
                    raw.push(byte);
                    if (0x40..=0x7E).contains(&byte) {
                        break byte;
                    }
                }
                None => return Ok(KeyEvent::simple(Key::NotDefined, raw)),
            }
        };
        let key = csi_key(final_byte, &raw[2..raw.len() - 1]);
        Ok(KeyEvent::simple(key, raw))
    }

    fn read_ss3_sequence(&self) -> TerminalResult<KeyEvent> {
        let mut raw = vec![0x1B, b'O'];
        match self.read_byte_timeout(ESC_FOLLOW_TIMEOUT_MS)? {
            Some(byte) => {
                raw.push(byte);
                let key = ss3_key(byte);
                Ok(KeyEvent::simple(key, raw))
            }
            None => Ok(KeyEvent::simple(Key::NotDefined, raw)),
        }
    }

    fn read_utf8_char(&self, first: u8) -> TerminalResult<KeyEvent> {
        let len = utf8_sequence_len(first);
        let mut raw = vec![first];
        while raw.len() < len {
            match self.read_byte_timeout(ESC_FOLLOW_TIMEOUT_MS)? {
                Some(byte) => raw.push(byte),
                None => break,
            }
        }
        match std::str::from_utf8(&raw) {
            Ok(s) => {
                // len guarantees exactly one scalar value
                let ch = s.chars().next().unwrap_or('\u{FFFD}');
                Ok(KeyEvent::with_char(Key::NotDefined, raw, ch))
            }
            Err(_) => Ok(KeyEvent::simple(Key::NotDefined, raw)),
        }
    }
}

impl Terminal for UnixVtTerminal {
    /// Line buffering, echo, signal generation, and output post-processing
    /// are disabled; the saved termios state is restored when the guard is
    /// dropped.
    fn enable_raw_mode(&self) -> TerminalResult<RawModeGuard> {
        let fd = self.stdin_fd;
        let mut original: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut original) } != 0 {
            return Err(io::Error::last_os_error().into());
        }

        let mut raw = original;
        raw.c_lflag &= !(libc::ICANON
            | libc::ECHO
            | libc::ECHOE
            | libc::ECHOK
            | libc::ECHONL
            | libc::ISIG
            | libc::IEXTEN);
        raw.c_iflag &= !(libc::IXON
            | libc::IXOFF
            | libc::ICRNL
            | libc::INLCR
            | libc::IGNCR
            | libc::BRKINT
            | libc::PARMRK
            | libc::ISTRIP);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag &= !libc::CSIZE;
        raw.c_cflag |= libc::CS8;
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(io::Error::last_os_error().into());
        }

        let restore = move || unsafe {
            let _ = libc::tcsetattr(fd, libc::TCSANOW, &original);
        };
        Ok(RawModeGuard::new(restore, "Unix VT".to_string()))
    }

    fn read_key(&mut self) -> TerminalResult<KeyEvent> {
        let first = self.read_byte_blocking()?;
        let event = match first {
            0x0D | 0x0A => KeyEvent::simple(Key::Enter, vec![first]),
            0x09 => KeyEvent::simple(Key::Tab, vec![first]),
            0x08 | 0x7F => KeyEvent::simple(Key::Backspace, vec![first]),
            0x1B => self.read_escape_sequence()?,
            byte if byte < 0x20 => KeyEvent::simple(Key::NotDefined, vec![byte]),
            byte if byte < 0x80 => KeyEvent::with_char(Key::NotDefined, vec![byte], byte as char),
            byte => self.read_utf8_char(byte)?,
        };
        trace!("decoded {:?} from {:02x?}", event.key, event.raw_bytes);
        Ok(event)
    }

    fn cursor_column(&self) -> usize {
        self.column
    }

    fn set_cursor_column(&mut self, column: usize) -> TerminalResult<()> {
        // CHA, 1-based
        let seq = format!("\x1b[{}G", column + 1);
        self.write_bytes(seq.as_bytes())?;
        self.column = column;
        Ok(())
    }

    fn width(&self) -> usize {
        // re-queried per call so redraws track window resizes
        Self::query_width().unwrap_or(self.fallback_width)
    }

    fn write_text(&mut self, text: &str) -> TerminalResult<()> {
        self.write_bytes(text.as_bytes())?;
        self.column = advance_column(self.column, text);
        Ok(())
    }
}

fn csi_key(final_byte: u8, params: &[u8]) -> Key {
    match final_byte {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        b'~' => match params {
            [b'1'] | [b'7'] => Key::Home,
            [b'2'] => Key::Insert,
            [b'3'] => Key::Delete,
            [b'4'] | [b'8'] => Key::End,
            [b'5'] => Key::PageUp,
            [b'6'] => Key::PageDown,
            _ => Key::NotDefined,
        },
        _ => Key::NotDefined,
    }
}

fn ss3_key(byte: u8) -> Key {
    match byte {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::NotDefined,
    }
}

fn utf8_sequence_len(first: u8) -> usize {
    if first & 0xE0 == 0xC0 {
        2
    } else if first & 0xF0 == 0xE0 {
        3
    } else if first & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}
