//! Common error types used across the workspace.
//!
//! Every fallible client operation returns [`ApiError`]. Each source of
//! failure has its own typed error and converts into [`ApiError`] via
//! `#[from]`.

/// Top-level error returned by the API client and surfaced by controllers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No session token is stored and the endpoint requires one.
    ///
    /// Callers react by routing the user to the login view.
    #[error("access token not found, please sign in")]
    MissingToken,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered with a non-success status.
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("network error: {0}")]
    Transport(#[from] TransportError),

    /// The response body was not the JSON shape we expected.
    #[error("invalid response from server: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Whether this error means the user has to sign in again.
    #[must_use]
    pub fn is_missing_token(&self) -> bool {
        matches!(self, Self::MissingToken)
    }
}

/// Input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// A non-2xx HTTP response.
///
/// `message` is the server-provided `detail` when present, a generic
/// fallback otherwise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HttpError {
    pub status: u16,
    pub message: String,
}

/// Failure to reach the server or read its response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure of the session token storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The storage backend cannot be reached (e.g. `localStorage` disabled).
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to access token file: {0}")]
    Io(#[from] std::io::Error),
}
