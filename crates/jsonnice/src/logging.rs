use std::sync::OnceLock;

use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::core::types::LogLevel;

static CONFIGURED: OnceLock<LogLevel> = OnceLock::new();

/// Where the active filter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterSource {
    Flag,
    Env,
    Default,
}

/// An explicit `-l` always wins; `RUST_LOG` only replaces the default level.
fn filter_source(explicit: bool, rust_log: Option<&str>) -> FilterSource {
    if explicit {
        return FilterSource::Flag;
    }
    match rust_log {
        Some(v) if !v.trim().is_empty() && EnvFilter::try_new(v).is_ok() => FilterSource::Env,
        _ => FilterSource::Default,
    }
}

fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::default().add_directive(LevelFilter::from(level.as_tracing()).into())
}

/// Installs the stderr sink at `level`. Only the first call has an effect;
/// returns whether this call configured the sink.
pub fn init(level: LogLevel, explicit: bool) -> bool {
    let mut installed = false;
    CONFIGURED.get_or_init(|| {
        installed = true;
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let source = filter_source(explicit, rust_log.as_deref());
        let filter = match (source, rust_log.as_deref()) {
            (FilterSource::Env, Some(v)) => EnvFilter::try_new(v).unwrap_or_else(|_| level_filter(level)),
            _ => level_filter(level),
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        tracing::debug!(?source, %level, rust_log = rust_log.as_deref().unwrap_or(""), "logging configured");
        level
    });
    installed
}

/// Level the sink was configured with, if it has been.
pub fn configured_level() -> Option<LogLevel> {
    CONFIGURED.get().copied()
}
