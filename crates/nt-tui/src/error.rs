//! Error types for the terminal frontend

use nt_client::error::ConfigError;
use nt_client::{ClientError, ViewportError};
use nt_sandbox::MapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Could not build the town: {0}")]
    Map(#[from] MapError),

    #[error(transparent)]
    Viewport(#[from] ViewportError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
