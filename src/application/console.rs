//! Line-oriented terminal I/O for the session
//!
//! Mirrors the styles of `cli::output` but writes to an arbitrary `Write`
//! and reads answers from an arbitrary `BufRead`.

use std::fmt::Display;
use std::io::{BufRead, Write};

use colored::Colorize;
use tracing::trace;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Read one trimmed line.
    ///
    /// # Errors
    /// [`ApplicationError::InputClosed`] at end of input.
    pub fn read_line(&mut self) -> ApplicationResult<String> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line).with_context("read input")?;
        if n == 0 {
            return Err(ApplicationError::InputClosed);
        }
        trace!(line = line.trim_end(), "read");
        Ok(line.trim().to_string())
    }

    /// Print `prompt` without newline and read the answer.
    pub fn ask(&mut self, prompt: &str) -> ApplicationResult<String> {
        write!(self.output, "{}", prompt).with_context("write prompt")?;
        self.output.flush().with_context("flush output")?;
        self.read_line()
    }

    /// Ask until a non-empty answer is given.
    pub fn ask_required(&mut self, prompt: &str, field: &str) -> ApplicationResult<String> {
        loop {
            let answer = self.ask(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.warning(format!("{} cannot be empty", field))?;
        }
    }

    /// Ask once; an empty answer means "not provided".
    pub fn ask_optional(&mut self, prompt: &str) -> ApplicationResult<Option<String>> {
        let answer = self.ask(prompt)?;
        Ok(Some(answer).filter(|a| !a.is_empty()))
    }

    /// Plain line (no color, for data)
    pub fn info(&mut self, msg: impl Display) -> ApplicationResult<()> {
        writeln!(self.output, "{}", msg).with_context("write output")
    }

    /// Empty line
    pub fn blank(&mut self) -> ApplicationResult<()> {
        writeln!(self.output).with_context("write output")
    }

    /// Green status line
    pub fn success(&mut self, msg: impl Display) -> ApplicationResult<()> {
        writeln!(self.output, "{}", msg.to_string().green()).with_context("write output")
    }

    /// Yellow status line
    pub fn warning(&mut self, msg: impl Display) -> ApplicationResult<()> {
        writeln!(self.output, "{}", msg.to_string().yellow()).with_context("write output")
    }

    /// Cyan bold section header
    pub fn header(&mut self, msg: impl Display) -> ApplicationResult<()> {
        writeln!(self.output, "{}", msg.to_string().cyan().bold()).with_context("write output")
    }
}
