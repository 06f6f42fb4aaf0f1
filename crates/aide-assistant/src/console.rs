use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::processor::{Assistant, FAREWELL};

/// Typing this word (any case, nothing else on the line) ends the session.
pub const EXIT_KEYWORD: &str = "exit";

/// Line-based conversation loop. Blocks until the exit keyword or EOF.
pub fn run_console<R: BufRead, W: Write>(
    assistant: &mut Assistant,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(
        output,
        "\nWelcome to {}! Type 'help' to see available commands.\n",
        assistant.name()
    )?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line.context("reading input")?,
            None => {
                debug!("input closed");
                writeln!(output)?;
                break;
            }
        };

        if line.to_lowercase() == EXIT_KEYWORD {
            writeln!(output, "{FAREWELL}")?;
            break;
        }

        let response = assistant.process_input(&line);
        writeln!(output, "{response}")?;
    }

    output.flush()?;
    Ok(())
}
