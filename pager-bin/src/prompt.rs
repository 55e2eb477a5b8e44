//! Validated line-based input.
//!
//! Every reader re-prompts until it gets an acceptable value. End of input is
//! reported as [`std::io::ErrorKind::UnexpectedEof`].

use std::io::{self, BufRead, Write};

use pager_core::util::Size;

/// Prompts on `output` and reads answers from `input`, one per line.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Creates a prompt over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the output stream.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consumes the prompt and returns the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }
        Ok(line.trim().to_string())
    }

    /// Reads an integer.
    pub fn read_int(&mut self, prompt: &str) -> io::Result<i64> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Invalid input. Enter an integer.")?,
            }
        }
    }

    /// Reads a strictly positive integer.
    pub fn read_positive(&mut self, prompt: &str) -> io::Result<u64> {
        loop {
            let value = self.read_int(prompt)?;
            if value > 0 {
                return Ok(value as u64);
            }
            writeln!(self.output, "The value must be positive.")?;
        }
    }

    /// Reads a non-zero [`Size`] such as `64` or `4KB`.
    pub fn read_size(&mut self, prompt: &str) -> io::Result<Size> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<Size>() {
                Ok(size) if size.bytes() > 0 => return Ok(size),
                Ok(_) => writeln!(self.output, "The value must be positive.")?,
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }
}
