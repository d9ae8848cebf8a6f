//! Error types for the client controller
//!
//! Lookup misses (unknown cell codes, unknown glyph codes, out-of-range
//! cells) are not errors: they are recovered where they happen. What is left
//! here is what a caller has to act on.

use thiserror::Error;

/// The simulation broke the wire contract. Fatal for the frame driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("entity buffer length {len} is not a multiple of 3")]
    EntityBufferLength { len: usize },

    #[error("map buffer has {len} cells, expected {width}x{height}")]
    MapBufferLength { len: usize, width: u32, height: u32 },
}

/// Persistent storage failures. Always recoverable.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No saved game under key '{0}'")]
    NotFound(String),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Simulation rejected save data: {0}")]
    Rejected(String),
}

/// Terminal or drawing surface failure.
#[derive(Debug, Error)]
pub enum ViewportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Viewport too small: {width}x{height}")]
    TooSmall { width: u16, height: u16 },
}

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level controller error.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Viewport(#[from] ViewportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_message() {
        let err = ProtocolError::EntityBufferLength { len: 7 };
        assert_eq!(err.to_string(), "entity buffer length 7 is not a multiple of 3");
    }

    #[test]
    fn test_client_error_wraps_protocol() {
        let err: ClientError = ProtocolError::MapBufferLength {
            len: 3,
            width: 2,
            height: 2,
        }
        .into();
        assert!(matches!(err, ClientError::Protocol(_)));
        assert_eq!(err.to_string(), "map buffer has 3 cells, expected 2x2");
    }
}
