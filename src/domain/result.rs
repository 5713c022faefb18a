//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Precondition and validation failures never reach a network boundary;
/// remote failures are converted to this type at the operation boundary.
/// Nothing here is fatal to the process.
#[derive(Error, Debug)]
pub enum Error {
    /// Login was rejected by the authentication service.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An authenticated operation was attempted with no credential present.
    #[error("not authenticated")]
    Unauthenticated,

    /// An authenticated request returned an authentication-rejection status.
    #[error("session expired or credential no longer valid")]
    AuthExpired,

    /// Client-side input was invalid before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// A transfer was attempted with no source account available.
    #[error("no source account available")]
    NoSourceAccount,

    /// Transport error or server-side rejection; carries the collaborator's
    /// message when one was present.
    #[error("remote error: {0}")]
    Remote(String),

    /// Durable-slot failure.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a remote error
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// User-facing message for this error.
    ///
    /// Rejected credentials and an unreachable service read the same on the
    /// login screen; the enum variant keeps them distinguishable internally.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidCredentials | Error::Remote(_) => {
                "Invalid credentials or service unavailable".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
