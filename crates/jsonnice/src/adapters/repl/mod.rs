mod command;
mod io;

use std::io::{BufRead, Write};

use crate::error::AppResult;

use command::{Command, HELP};
use io::LineIo;

const PROMPT: &str = "(jsonnice) ";

/// Interactive session over one program.
pub struct ReplDebugger {
    file: String,
    source: String,
    search_paths: Vec<String>,
}

impl ReplDebugger {
    pub fn new(file: String, source: String, search_paths: Vec<String>) -> Self {
        Self {
            file,
            source,
            search_paths,
        }
    }

    /// Blocks on stdin until `quit` or EOF.
    pub fn run(self) -> AppResult<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run_with(stdin.lock(), stdout.lock())?;
        Ok(())
    }

    fn run_with<R: BufRead, W: Write>(self, input: R, output: W) -> AppResult<W> {
        let mut io = LineIo::new(input, output);
        tracing::info!(file = %self.file, lines = self.source.lines().count(), "repl session started");

        loop {
            io.prompt(PROMPT)?;
            let Some(line) = io.read_line()? else { break };
            let cmd = Command::parse(&line);
            tracing::debug!(?cmd, "repl command");
            if !self.handle(cmd, &mut io)? {
                break;
            }
        }

        tracing::info!(file = %self.file, "repl session ended");
        Ok(io.into_output())
    }

    /// Returns `false` when the session should end.
    fn handle<R: BufRead, W: Write>(&self, cmd: Command, io: &mut LineIo<R, W>) -> AppResult<bool> {
        match cmd {
            Command::Empty => {}
            Command::Help => io.write_line(HELP)?,
            Command::Source(range) => {
                let (from, to) = range.unwrap_or((1, usize::MAX));
                for (n, text) in self.source.lines().enumerate().map(|(i, l)| (i + 1, l)) {
                    if n < from {
                        continue;
                    }
                    if n > to {
                        break;
                    }
                    io.write_line(&format!("{n:>4}  {text}"))?;
                }
            }
            Command::SearchPaths => {
                if self.search_paths.is_empty() {
                    io.write_line("(no library search directories)")?;
                }
                for dir in &self.search_paths {
                    io.write_line(dir)?;
                }
            }
            Command::File => io.write_line(&self.file)?,
            Command::Quit => return Ok(false),
            Command::Unknown(what) => {
                io.write_line(&format!("unknown command: {what} (try 'help')"))?;
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &str) -> String {
        let repl = ReplDebugger::new(
            "lib/main.jsonnet".into(),
            "local a = 1;\nlocal b = 2;\na + b\n".into(),
            vec!["vendor".into(), "lib".into()],
        );
        let out = repl.run_with(script.as_bytes(), Vec::new()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_source_with_line_numbers() {
        let out = session("source 2 3\nquit\n");
        assert!(out.contains("   2  local b = 2;\n"));
        assert!(out.contains("   3  a + b\n"));
        assert!(!out.contains("local a = 1;"));
    }

    #[test]
    fn shows_search_paths_and_file() {
        let out = session("jpath\nfile\n");
        assert!(out.contains("vendor\nlib\n"));
        assert!(out.contains("lib/main.jsonnet\n"));
    }

    #[test]
    fn quit_stops_reading() {
        let out = session("quit\nfile\n");
        assert!(!out.contains("lib/main.jsonnet"));
        assert_eq!(out, PROMPT);
    }

    #[test]
    fn unknown_command_hints_at_help() {
        let out = session("eval 1+1\n");
        assert!(out.contains("unknown command: eval (try 'help')"));
    }
}
