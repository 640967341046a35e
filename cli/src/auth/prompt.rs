//! Interactive terminal input.
//!
//! The token creation flow reads a username and password through the
//! [`Prompter`] trait so it can run without a terminal in tests.
//! [`TerminalPrompter`] is the `dialoguer` implementation; it prompts on
//! stderr so stdout only carries command output. When stderr is not a
//! terminal it reads plain lines from stdin instead, so input can be piped.

use std::io::{BufRead, Write};

use console::Term;
use dialoguer::{Input, Password};

use crate::error::{BinstarError, Result};

/// Source of interactive user input.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Prompts with `prompt` and reads one line of visible input.
    fn read_line(&self, prompt: &str) -> Result<String>;

    /// Prompts with `prompt` and reads a password without echoing it.
    fn read_password(&self, prompt: &str) -> Result<String>;
}

/// Prompter backed by the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn is_interactive() -> bool {
        Term::stderr().is_term()
    }

    fn read_piped(prompt: &str) -> Result<String> {
        read_line_from(prompt, &mut std::io::stdin().lock(), &mut std::io::stderr())
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&self, prompt: &str) -> Result<String> {
        if !Self::is_interactive() {
            return Ok(Self::read_piped(prompt)?.trim().to_string());
        }

        let line = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(line.trim().to_string())
    }

    fn read_password(&self, prompt: &str) -> Result<String> {
        if !Self::is_interactive() {
            return Self::read_piped(prompt);
        }

        Ok(Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?)
    }
}

/// Writes `prompt: ` to `writer` and reads one line from `reader`.
///
/// The line terminator is stripped; other whitespace is kept.
fn read_line_from(
    prompt: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<String> {
    write!(writer, "{prompt}: ")?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(BinstarError::Prompt("unexpected end of input".to_string()));
    }

    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn piped_line_is_read_after_prompt() {
        let mut input = Cursor::new("alice\nignored\n");
        let mut prompt = Vec::new();

        let line = read_line_from("Username", &mut input, &mut prompt).unwrap();

        assert_eq!(line, "alice");
        assert_eq!(String::from_utf8(prompt).unwrap(), "Username: ");
    }

    #[test]
    fn piped_line_keeps_inner_whitespace() {
        let mut input = Cursor::new(" pass word \r\n");
        let mut prompt = Vec::new();

        let line = read_line_from("Password", &mut input, &mut prompt).unwrap();
        assert_eq!(line, " pass word ");
    }

    #[test]
    fn empty_piped_line_is_accepted() {
        let mut input = Cursor::new("\n");
        let mut prompt = Vec::new();

        assert_eq!(read_line_from("Username", &mut input, &mut prompt).unwrap(), "");
    }

    #[test]
    fn piped_eof_is_a_prompt_error() {
        let mut input = Cursor::new("");
        let mut prompt = Vec::new();

        let err = read_line_from("Username", &mut input, &mut prompt).unwrap_err();
        assert!(matches!(err, BinstarError::Prompt(_)));
    }
}
