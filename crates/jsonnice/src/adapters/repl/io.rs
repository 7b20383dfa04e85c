use std::io::{BufRead, Write};

use crate::error::AppResult;

pub struct LineIo<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next line without its terminator; `None` at EOF.
    pub fn read_line(&mut self) -> AppResult<Option<String>> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    pub fn prompt(&mut self, prompt: &str) -> AppResult<()> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    pub fn write_line(&mut self, line: &str) -> AppResult<()> {
        self.output.write_all(line.as_bytes())?;
        self.output.write_all(b"\n")?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
