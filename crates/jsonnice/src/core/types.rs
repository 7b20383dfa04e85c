use std::{fmt, str::FromStr};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    #[default]
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn as_tracing(&self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = AppError;

    // Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(AppError::InvalidLogLevel(other.to_string())),
        }
    }
}

/// The single positional token, interpreted either as a path or as inline code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(String),
    Code(String),
}

impl Input {
    pub fn token(&self) -> &str {
        match self {
            Input::File(s) | Input::Code(s) => s,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Input::Code(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Dap,
    Repl(Input),
}

/// Fully resolved launch configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub search_paths: Vec<String>,
    pub log_level: LogLevel,
    /// Set by `-l`; otherwise `log_level` is the default and `RUST_LOG` may replace it.
    pub log_level_explicit: bool,
}

impl Config {
    /// The positional token; empty in DAP mode.
    pub fn input_file(&self) -> &str {
        match &self.mode {
            Mode::Repl(input) => input.token(),
            Mode::Dap => "",
        }
    }

    pub fn filename_is_code(&self) -> bool {
        matches!(&self.mode, Mode::Repl(input) if input.is_code())
    }
}
