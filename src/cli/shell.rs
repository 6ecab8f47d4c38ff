// Operator interaction
//
// The activation flow talks to the user only through `Shell`, so the
// interactive loop can be driven by a script in tests.

use crossterm::style::Stylize;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

/// Prompt / print capabilities the activation flow needs.
pub trait Shell {
    /// Show `text` and read one line. Blank input yields `default`.
    /// Returns an error when the input source is closed.
    fn prompt(&mut self, text: &str, default: &str) -> io::Result<String>;

    /// Informational message on stdout.
    fn print(&mut self, text: &str);

    /// Error message on stderr.
    fn error(&mut self, text: &str);
}

/// Shell backed by the process's stdin/stdout/stderr.
pub struct TerminalShell {
    is_interactive: bool,
}

impl TerminalShell {
    pub fn new() -> Self {
        Self {
            is_interactive: io::stdin().is_terminal() && io::stdout().is_terminal(),
        }
    }
}

impl Default for TerminalShell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell for TerminalShell {
    fn prompt(&mut self, text: &str, default: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}: ", text)?;
        stdout.flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            if self.is_interactive {
                writeln!(stdout)?;
            }
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a valid email was entered",
            ));
        }

        let input = input.trim_end_matches(['\r', '\n']);
        if input.trim().is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input.to_string())
        }
    }

    fn print(&mut self, text: &str) {
        println!("{}", text);
    }

    fn error(&mut self, text: &str) {
        eprintln!("{}", text.red());
    }
}

/// Shell that replays canned answers and records everything shown.
///
/// Runs out of input with an `UnexpectedEof` error, which ends the
/// activation loop the same way closing stdin does.
#[derive(Debug, Default)]
pub struct ScriptedShell {
    inputs: VecDeque<String>,
    prompts: usize,
    printed: Vec<String>,
    errors: Vec<String>,
}

impl ScriptedShell {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// How many times the user was prompted.
    pub fn prompts(&self) -> usize {
        self.prompts
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Whether any printed message contains `needle`.
    pub fn printed_contains(&self, needle: &str) -> bool {
        self.printed.iter().any(|line| line.contains(needle))
    }
}

impl Shell for ScriptedShell {
    fn prompt(&mut self, _text: &str, default: &str) -> io::Result<String> {
        self.prompts += 1;
        match self.inputs.pop_front() {
            Some(answer) if answer.trim().is_empty() => Ok(default.to_string()),
            Some(answer) => Ok(answer),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted input exhausted",
            )),
        }
    }

    fn print(&mut self, text: &str) {
        self.printed.push(text.to_string());
    }

    fn error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_shell_replays_in_order() {
        let mut shell = ScriptedShell::new(["first", "second"]);
        assert_eq!(shell.prompt("Email", "").unwrap(), "first");
        assert_eq!(shell.prompt("Email", "").unwrap(), "second");
        assert_eq!(shell.prompts(), 2);
        assert_eq!(shell.remaining(), 0);
    }

    #[test]
    fn test_scripted_shell_blank_uses_default() {
        let mut shell = ScriptedShell::new(["  "]);
        assert_eq!(shell.prompt("Email", "fallback").unwrap(), "fallback");
    }

    #[test]
    fn test_scripted_shell_exhausted_is_eof() {
        let mut shell = ScriptedShell::new(Vec::<String>::new());
        let err = shell.prompt("Email", "").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_scripted_shell_records_output() {
        let mut shell = ScriptedShell::default();
        shell.print("hello there");
        shell.error("oops");
        assert!(shell.printed_contains("hello"));
        assert_eq!(shell.errors(), ["oops".to_string()]);
    }
}
