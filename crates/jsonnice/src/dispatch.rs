use std::{io::Write, net::SocketAddr};

use crate::{
    adapters::{dap, repl::ReplDebugger},
    cli::{write_usage, Parsed},
    core::{
        input::{containing_dir, read_input},
        types::{Config, LogLevel, Mode},
    },
    error::AppResult,
    logging,
};

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Everything the launcher hands control to once arguments are resolved.
pub trait Backend {
    /// `explicit` is true when the level came from `-l`.
    fn init_logging(&self, level: LogLevel, explicit: bool);

    /// Loads program text; may rewrite `input_file` to its display name.
    fn read_input(&self, filename_is_code: bool, input_file: &mut String) -> AppResult<String>;

    fn serve_dap(&self, addr: SocketAddr) -> AppResult<()>;

    fn run_repl(&self, input_file: String, source: String, search_paths: Vec<String>) -> AppResult<()>;
}

pub struct SystemBackend;

impl Backend for SystemBackend {
    fn init_logging(&self, level: LogLevel, explicit: bool) {
        if !logging::init(level, explicit) {
            tracing::debug!(configured = ?logging::configured_level(), "logging already configured");
        }
    }

    fn read_input(&self, filename_is_code: bool, input_file: &mut String) -> AppResult<String> {
        read_input(filename_is_code, input_file)
    }

    fn serve_dap(&self, addr: SocketAddr) -> AppResult<()> {
        dap::serve(addr)
    }

    fn run_repl(&self, input_file: String, source: String, search_paths: Vec<String>) -> AppResult<()> {
        ReplDebugger::new(input_file, source, search_paths).run()
    }
}

/// Acts on the parse outcome and returns the process exit code.
pub fn dispatch<B, O, E>(parsed: Parsed, backend: &B, out: &mut O, err: &mut E) -> u8
where
    B: Backend,
    O: Write,
    E: Write,
{
    match parsed {
        Parsed::Continue(config) => launch(config, backend, err),
        Parsed::ShowUsage => {
            let _ = write_usage(out);
            EXIT_OK
        }
        Parsed::UsageError(e) => {
            let _ = writeln!(err, "ERROR: {e}");
            let _ = writeln!(err);
            let _ = write_usage(err);
            EXIT_FAILURE
        }
        Parsed::Exit => EXIT_OK,
        Parsed::Failed(e) => {
            let _ = writeln!(err, "ERROR: {e}");
            EXIT_FAILURE
        }
    }
}

fn launch<B: Backend, E: Write>(config: Config, backend: &B, err: &mut E) -> u8 {
    backend.init_logging(config.log_level, config.log_level_explicit);
    tracing::debug!(
        input = config.input_file(),
        is_code = config.filename_is_code(),
        level = %config.log_level,
        "arguments resolved"
    );

    let Config {
        mode, search_paths, ..
    } = config;

    let input = match mode {
        Mode::Dap => {
            let addr = dap::dap_addr();
            tracing::info!(%addr, "starting dap server");
            if let Err(e) = backend.serve_dap(addr) {
                tracing::error!(error = %e, "dap server terminated");
            }
            return EXIT_OK;
        }
        Mode::Repl(input) => input,
    };

    let filename_is_code = input.is_code();
    let mut input_file = input.token().to_string();
    let source = match backend.read_input(filename_is_code, &mut input_file) {
        Ok(s) => s,
        Err(e) => {
            let _ = writeln!(err, "ERROR: {e}");
            return EXIT_FAILURE;
        }
    };

    let mut search_paths = search_paths;
    if !filename_is_code {
        search_paths.push(containing_dir(&input_file));
    }

    tracing::debug!(file = %input_file, jpath = ?search_paths, "starting repl debugger");
    match backend.run_repl(input_file, source, search_paths) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            let _ = writeln!(err, "ERROR: {e}");
            EXIT_FAILURE
        }
    }
}
