//! Line oriented user I/O.

use dialoguer::{theme::ColorfulTheme, Input, Password};
use std::io::{self, BufRead, Write};

pub trait Console {
    /// Reads one line of input after showing `prompt`. End of input is
    /// reported as `ErrorKind::UnexpectedEof`.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
    /// Like `read_line`, without echoing what is typed where possible.
    fn read_secret(&mut self, prompt: &str) -> io::Result<String>;
    fn print(&mut self, line: &str);
}

fn dialoguer_to_io(err: dialoguer::Error) -> io::Error {
    match err {
        dialoguer::Error::IO(e) => e,
    }
}

/// Interactive terminal console with dialoguer prompts.
pub struct TerminalConsole {
    theme: ColorfulTheme,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(dialoguer_to_io)
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(dialoguer_to_io)
    }

    fn print(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Plain reader/writer console, for piped input and for tests.
pub struct StdioConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdioConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for StdioConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}: ", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.read_line(prompt)
    }

    fn print(&mut self, line: &str) {
        if let Err(e) = writeln!(self.output, "{}", line) {
            log::warn!("Failed to write to console: {}", e);
        }
    }
}
