/// Interactive confirmations and password entry
use crate::error::{Result, WipeError};
use std::io::{BufRead, Write};

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }

    /// Ask for explicit confirmation; only a typed "yes" proceeds.
    pub fn confirm(&mut self, message: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        self.say(&format!("\n⚠️  {}\nType 'yes' to confirm: ", message))?;
        Ok(self.read_line()?.eq_ignore_ascii_case("yes"))
    }

    /// Read a secret. Input is not masked.
    pub fn password(&mut self, message: &str) -> Result<String> {
        self.say(&format!("{}: ", message))?;
        self.read_line()
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
            .map_err(|e| WipeError::Aborted(format!("failed to write prompt: {}", e)))
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| WipeError::Aborted(format!("failed to read input: {}", e)))?;
        if read == 0 {
            return Err(WipeError::Aborted("input closed".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).trim().to_string())
    }
}
