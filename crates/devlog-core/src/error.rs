//! Error types for the DevLog client

use std::fmt;
use thiserror::Error;

/// Request failure taxonomy shared by every client operation
#[derive(Error, Debug)]
pub enum Error {
    /// Backend answered outside the 2xx range
    #[error("{status} {status_text}")]
    Http { status: u16, status_text: String },

    /// Lower-level transport failure (DNS, refused connection, CORS, ...)
    #[error("{0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an HTTP status error
    pub fn http(status: u16, status_text: impl Into<String>) -> Self {
        Error::Http {
            status,
            status_text: status_text.into(),
        }
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Error::Network(msg.into())
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Error::InvalidResponse(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// HTTP status code, if the failure came from the backend
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// User-facing actions whose failures end up in the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    Load,
    Create,
    Update,
    Delete,
}

impl Action {
    /// Human-readable status for a failed attempt, e.g. `Create failed: 500 Internal Server Error`
    pub fn failed(self, err: &Error) -> String {
        format!("{} failed: {}", self, err)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Login => write!(f, "Login"),
            Action::Load => write!(f, "Load"),
            Action::Create => write!(f, "Create"),
            Action::Update => write!(f, "Update"),
            Action::Delete => write!(f, "Delete"),
        }
    }
}
