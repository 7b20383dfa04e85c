mod adapters;
mod cli;
mod core;
mod dispatch;
mod error;
mod logging;

use std::process::ExitCode;

use crate::dispatch::SystemBackend;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let parsed = cli::parse(&args, &mut stdout);
    ExitCode::from(dispatch::dispatch(parsed, &SystemBackend, &mut stdout, &mut stderr))
}
