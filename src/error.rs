//! Error types for the smb admin library.
//!
//! Distinguishes local validation failures (never sent to the cluster) from
//! decode, transport, and remote rejection failures.

use thiserror::Error;

use crate::result::ResultGroup;

/// Error type for smb admin operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A resource description is malformed or incomplete. Raised before any
    /// command is sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON data carried a resource type name unknown to this library.
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A password filter could not be applied to the payload.
    #[error("password filter error: {0}")]
    PasswordFilter(String),

    /// Error propagated from the command transport.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote service rejected the command with a status message.
    #[error("command rejected: {0}")]
    Rejected(String),

    /// Apply reported per-resource failures. Produced only by the
    /// convenience remove helpers; `Admin::apply` itself returns the
    /// unsuccessful `ResultGroup` without converting it to an error.
    #[error("{0}")]
    ResourceFailures(ResultGroup),
}

impl Error {
    /// Wrap an arbitrary transport-layer error.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport(Box::new(err))
    }

    /// Check if this error was raised before any command was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::PasswordFilter(_) | Error::UnknownResourceType(_)
        )
    }
}

/// Describes why a single resource failed validation. The message names the
/// first missing or invalid field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        ValidationError {
            message: message.into(),
        }
    }

    /// The validation failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type alias for smb admin operations.
pub type Result<T> = std::result::Result<T, Error>;
