//! Error types for mcp23x17.
//!
//! Uses `thiserror` for ergonomic error definitions. Each layer has its own
//! enum; the CLI folds them into [`CliError`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the hex/binary register codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("hex value '{0}' does not fit in 8 bits")]
    OutOfRange(String),

    #[error("invalid hex value: '{0}'")]
    InvalidHex(String),

    #[error("invalid 8-bit binary string: '{0}'")]
    InvalidBinary(String),
}

/// Errors from splitting a binary string into pin fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortStateError {
    #[error("port state must be {expected} characters, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Errors surfaced by a bus transport.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Exited {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },

    #[error("unparsable output from {program}: '{output}'")]
    Unparsable { program: String, output: String },

    #[error("no device answered at {0}")]
    DeviceNotFound(String),
}

/// Errors from chip-level operations.
#[derive(Error, Debug)]
pub enum ExpanderError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    PortState(#[from] PortStateError),

    #[error("pin {0} is out of range (0-7)")]
    InvalidPin(u8),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors reported by CLI command handlers.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Expander(#[from] ExpanderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    PortState(#[from] PortStateError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Result type alias for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type alias for chip operations.
pub type ExpanderResult<T> = Result<T, ExpanderError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI handlers.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = PortStateError::LengthMismatch {
            expected: 8,
            actual: 7,
        };
        assert_eq!(err.to_string(), "port state must be 8 characters, got 7");
    }

    #[test]
    fn test_expander_error_is_transparent() {
        let err: ExpanderError = CodecError::OutOfRange("1ff".to_string()).into();
        assert_eq!(err.to_string(), "hex value '1ff' does not fit in 8 bits");
    }
}
