//! Key decode debug tool.
//!
//! Usage: cargo run --example debug_keys
//! Press q or Escape to exit.

use std::io::{self, Write};

use linekit_io::{create_terminal, Key, KeyEvent, Terminal};

/// Format raw bytes for display
fn format_bytes(bytes: &[u8]) -> String {
    let hex: String = bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ");

    let ascii: String = bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect();

    format!("[{}] \"{}\"", hex, ascii)
}

fn display_key_event(event: &KeyEvent) {
    // \r\n keeps the output aligned in raw mode
    print!(
        "Key: {:?} | Raw: {} | Char: {:?}\r\n",
        event.key,
        format_bytes(&event.raw_bytes),
        event.ch
    );
    let _ = io::stdout().flush();
}

fn main() -> io::Result<()> {
    println!("Key decode debug tool");
    println!("Press keys to see their events. Press q or Escape to exit.");
    println!();

    let mut terminal =
        create_terminal().map_err(|e| io::Error::other(format!("init error: {}", e)))?;
    let _raw_guard = terminal
        .enable_raw_mode()
        .map_err(|e| io::Error::other(format!("raw mode error: {}", e)))?;

    print!("[width] {} columns\r\n", terminal.width());
    io::stdout().flush()?;

    loop {
        match terminal.read_key() {
            Ok(event) => {
                let done = event.key == Key::Escape || event.ch == Some('q');
                display_key_event(&event);
                if done {
                    break;
                }
            }
            Err(e) => {
                print!("input error: {}\r\n", e);
                let _ = io::stdout().flush();
                break;
            }
        }
    }

    print!("Done.\r\n");
    let _ = io::stdout().flush();
    Ok(())
}
