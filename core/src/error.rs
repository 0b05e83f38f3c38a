//! Error types for the poll API client.
//!
//! # Design
//! Every failure an operation can produce is an `ApiError`, and its `Display`
//! output is the human-readable message shown to callers. `ErrorKind` groups
//! the variants into the three ways a call can fail: a local precondition,
//! a non-2xx status, or no usable response at all.

use thiserror::Error;

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Detected locally, before any request was sent.
    Precondition,
    /// A response arrived with a non-2xx status.
    Http,
    /// No usable response was obtained.
    Request,
}

/// Errors returned by client operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The operation needs a bearer token and the session has none.
    #[error("Authentication required. Please log in first.")]
    AuthenticationRequired,

    /// The server answered with a non-2xx status. `message` comes from the
    /// operation's status table, or the generic HTTP error text.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (DNS, refused, reset, ...).
    #[error("Request error occurred: {0}")]
    Transport(String),

    /// A 2xx response body was not the JSON the operation expects.
    #[error("Request error occurred: invalid response body: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::AuthenticationRequired | ApiError::Serialization(_) => ErrorKind::Precondition,
            ApiError::Status { .. } => ErrorKind::Http,
            ApiError::Transport(_) | ApiError::Deserialization(_) => ErrorKind::Request,
        }
    }

    /// The human-readable message for this failure.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The HTTP status, for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure raised by a `Transport` when no response could be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err.0)
    }
}

/// Failure of a poll listing. Carries the clamped page window that was
/// requested so callers can retry or render it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct PollsError {
    #[source]
    pub error: ApiError,
    pub skip: u32,
    pub limit: u32,
    /// Always 0: a failed listing reports no items.
    pub total: u64,
}

impl PollsError {
    pub fn new(error: ApiError, skip: u32, limit: u32) -> Self {
        Self {
            error,
            skip,
            limit,
            total: 0,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn message(&self) -> String {
        self.error.message()
    }
}
