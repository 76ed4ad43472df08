//! Transport-specific error type wrapping reqwest errors.

use metricboard_domain::error::TransportError;

/// Errors originating from the reqwest transport.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    /// The client could not be built (e.g. TLS backend failed to initialise).
    #[error("failed to build http client")]
    Build(#[source] reqwest::Error),

    /// Connecting, sending or reading the body failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl From<HttpClientError> for TransportError {
    fn from(err: HttpClientError) -> Self {
        match err {
            HttpClientError::Build(source) | HttpClientError::Request(source) => {
                let message = if source.is_timeout() {
                    "request timed out".to_string()
                } else if source.is_connect() {
                    "could not connect to server".to_string()
                } else {
                    source.to_string()
                };
                Self::new(message)
            }
        }
    }
}
