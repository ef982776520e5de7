//! Interactive single-line editor demo.
//!
//! Usage: cargo run --example simple_editor
//! Tab completes a command name, Up and Down recall earlier lines, and
//! `quit` exits.

use std::io::{self, Write};

use linekit_io::{create_terminal, Editor, Terminal, AUTOCOMPLETE_SENTINEL};

const COMMANDS: &[&str] = &["hello", "help", "history", "quit"];

/// Resolve a partial line to its completed form.
fn complete(partial: &str) -> String {
    COMMANDS
        .iter()
        .find(|command| command.starts_with(partial))
        .map(|command| command.to_string())
        .unwrap_or_else(|| partial.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Single-line editor demo. Commands: {}.", COMMANDS.join(", "));
    println!("Tab completes, Up/Down recall history, `quit` exits.");
    println!();

    let terminal = create_terminal()?;
    let _raw_guard = terminal.enable_raw_mode()?;
    let mut editor = Editor::new(terminal, "> ");

    loop {
        let mut line = editor.read_input()?;
        while let Some(partial) = line.strip_prefix(AUTOCOMPLETE_SENTINEL) {
            let replacement = complete(partial);
            line = editor.autocomplete(&replacement)?;
        }

        match line.as_str() {
            "quit" => break,
            "help" => print!("Commands: {}\r\n", COMMANDS.join(", ")),
            "history" => {
                for index in 1..editor.history().len() {
                    if let Some(entry) = editor.history().entry(index) {
                        print!("{:>3}  {}\r\n", index, entry);
                    }
                }
            }
            "" => {}
            other => print!("You entered: {}\r\n", other),
        }
        io::stdout().flush()?;
    }

    print!("Goodbye!\r\n");
    io::stdout().flush()?;
    Ok(())
}
