use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("-J argument was empty string")]
    EmptyJpath,

    #[error("no log level specified")]
    MissingLogLevel,

    #[error("invalid log level {0}. Allowed: debug,info,warn,error")]
    InvalidLogLevel(String),

    #[error("unrecognized argument: {0}")]
    UnrecognizedArgument(String),

    /// No positional token; carries what was expected ("filename" or "code").
    #[error("must give {0}")]
    MissingInput(&'static str),

    #[error("opening input file: {path}: {source}")]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading input file: {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dap server error: {0}")]
    Dap(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::EmptyJpath => "EMPTY_JPATH",
            AppError::MissingLogLevel => "MISSING_LOG_LEVEL",
            AppError::InvalidLogLevel(_) => "INVALID_LOG_LEVEL",
            AppError::UnrecognizedArgument(_) => "UNRECOGNIZED_ARGUMENT",
            AppError::MissingInput(_) => "MISSING_INPUT",
            AppError::InputOpen { .. } => "INPUT_OPEN_FAILED",
            AppError::InputRead { .. } => "INPUT_READ_FAILED",
            AppError::Dap(_) => "DAP_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) => "INTERNAL",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
