//! Command error types

use thiserror::Error;

use super::duration::DurationError;

/// Errors raised while turning a text command into dispatch parameters
#[derive(Debug, Error)]
pub enum CommandError {
    /// Line matches neither `notify --url ...` nor `notify --help`
    #[error("invalid input")]
    InvalidInput,

    /// Neither `-m` nor `-f` was given
    #[error("no message content has been provided")]
    NoContent,

    /// `-i` value is not a valid duration
    #[error("invalid interval '{value}': {source}")]
    InvalidInterval {
        value: String,
        #[source]
        source: DurationError,
    },

    /// `-f` file could not be read
    #[error("file {path} could not be read: {source}")]
    FileUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
