//! Error types for photosearch.
//!
//! Two error types live here. [`PhotoSearchError`] is the crate-level error for
//! setup concerns (configuration, logging, HTTP client construction, session
//! lifecycle). [`FetchError`] is the taxonomy of a single feed lookup; it never
//! escapes the fetch boundary and is folded into a
//! [`FetchResult::Failure`](crate::domain::FetchResult::Failure) there.

use crate::domain::result::{MSG_GENERIC, MSG_NO_CONNECTION};
use thiserror::Error;

/// The main error type for photosearch setup and session operations.
///
/// # Examples
///
/// ```
/// use photosearch::PhotoSearchError;
///
/// fn validate_endpoint(endpoint: &str) -> Result<(), PhotoSearchError> {
///     if endpoint.is_empty() {
///         return Err(PhotoSearchError::Config("endpoint must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_endpoint("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum PhotoSearchError {
    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed as TOML.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The search session has been disposed and no longer accepts input.
    #[error("Session error: {0}")]
    Session(String),
}

/// A specialized `Result` type for photosearch operations.
pub type Result<T> = std::result::Result<T, PhotoSearchError>;

/// Failure of a single feed lookup.
///
/// Each variant belongs to one of the user-facing categories: connectivity,
/// or the generic "try again later" bucket. An empty result set is not an error
/// and is classified by the fetcher itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Host unreachable: DNS resolution or TCP connect failed.
    #[error("unable to reach feed host: {0}")]
    Connectivity(String),

    /// The server answered with a non-success status code.
    #[error("feed returned HTTP {0}")]
    Status(u16),

    /// The server answered successfully but sent no body.
    #[error("feed returned an empty body")]
    EmptyBody,

    /// The body was not a valid feed document.
    #[error("feed body could not be decoded: {0}")]
    Decode(String),

    /// The request did not complete within the configured timeout.
    #[error("feed request timed out")]
    Timeout,

    /// Anything else on the fetch path, including a panicked fetch task.
    #[error("unexpected fetch failure: {0}")]
    Unexpected(String),
}

impl FetchError {
    /// Returns the user-facing message for this failure.
    ///
    /// ```
    /// use photosearch::FetchError;
    ///
    /// assert_eq!(
    ///     FetchError::Status(500).user_message(),
    ///     "An error occurred. Please try again later."
    /// );
    /// ```
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Connectivity(_) => MSG_NO_CONNECTION,
            Self::Status(_)
            | Self::EmptyBody
            | Self::Decode(_)
            | Self::Timeout
            | Self::Unexpected(_) => MSG_GENERIC,
        }
    }

    /// Whether this failure means the host could not be reached at all.
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() && !is_tls_failure(&err) {
            Self::Connectivity(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

/// Whether a connect error was raised by the TLS handshake rather than by
/// DNS or TCP.
///
/// The rustls stream reports handshake and certificate failures as
/// `io::ErrorKind::InvalidData` somewhere in the source chain.
fn is_tls_failure(err: &(dyn std::error::Error + 'static)) -> bool {
    std::iter::successors(Some(err), |e| e.source())
        .filter_map(|e| e.downcast_ref::<std::io::Error>())
        .any(|io| io.kind() == std::io::ErrorKind::InvalidData)
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_has_dedicated_message() {
        let err = FetchError::Connectivity("dns error".to_string());
        assert!(err.is_connectivity());
        assert_eq!(
            err.user_message(),
            "Unable to connect. Please check your internet connection and try again."
        );
    }

    #[test]
    fn everything_else_is_generic() {
        let generic = [
            FetchError::Status(500),
            FetchError::Status(404),
            FetchError::EmptyBody,
            FetchError::Decode("eof".to_string()),
            FetchError::Timeout,
            FetchError::Unexpected("boom".to_string()),
        ];
        for err in generic {
            assert!(!err.is_connectivity());
            assert_eq!(err.user_message(), "An error occurred. Please try again later.");
        }
    }

    #[derive(Debug, Error)]
    #[error("connect failed")]
    struct Wrapped(#[source] std::io::Error);

    #[test]
    fn tls_failures_are_told_apart_from_unreachable_hosts() {
        let tls = Wrapped(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "invalid peer certificate",
        ));
        assert!(is_tls_failure(&tls));

        let refused = Wrapped(std::io::Error::from(std::io::ErrorKind::ConnectionRefused));
        assert!(!is_tls_failure(&refused));

        let dns = std::io::Error::other("failed to lookup address information");
        assert!(!is_tls_failure(&dns));
    }

    #[test]
    fn json_errors_become_decode() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::Decode(_)));
    }
}
