//! Program Text Loading
//!
//! A Tally program is a single line of text. It comes either from a file
//! named on the command line or from the first line of stdin (leaving the
//! rest of the stream for the `.` instruction to consume). A trailing
//! newline is stripped; for files, everything past the first line is
//! ignored, since a stray newline byte would otherwise execute as a digit
//! literal.

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

/// Load program text from `path`, or from one line of `stdin` when no path
/// is given.
pub fn load_program(path: Option<&Path>, stdin: &mut impl BufRead) -> io::Result<String> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut line = String::new();
            stdin.read_line(&mut line)?;
            line
        }
    };
    Ok(first_line(&text))
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or("").to_string()
}
