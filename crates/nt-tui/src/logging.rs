//! File logging
//!
//! The terminal belongs to the game, so logs only ever go to a file.

use std::path::{Path, PathBuf};

use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::TuiError;

pub const LOG_FILE: &str = "neon.log";

/// `<cache dir>/neon-twilight`, or `./logs` without one.
pub fn default_log_dir() -> PathBuf {
    match dirs::cache_dir() {
        Some(mut path) => {
            path.push("neon-twilight");
            path
        }
        None => PathBuf::from("logs"),
    }
}

/// An explicit filter wins over `RUST_LOG`; with neither, `info`.
pub fn build_filter(filter: Option<&str>) -> Result<EnvFilter, ParseError> {
    match filter {
        Some(directives) => EnvFilter::try_new(directives),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

/// Install the global subscriber writing to `<dir>/neon.log`.
pub fn init(dir: &Path, filter: Option<&str>) -> Result<PathBuf, TuiError> {
    std::fs::create_dir_all(dir)?;
    let env_filter = build_filter(filter)?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // the writer thread has to outlive main
    std::mem::forget(guard);
    Ok(dir.join(LOG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filter() {
        assert!(build_filter(Some("nt_client=debug,warn")).is_ok());
        assert!(build_filter(Some("nt_client=loud")).is_err());
    }

    #[test]
    fn test_default_filter() {
        assert!(build_filter(None).is_ok());
    }

    #[test]
    fn test_default_log_dir() {
        assert!(default_log_dir().ends_with("neon-twilight") || default_log_dir() == PathBuf::from("logs"));
    }
}
