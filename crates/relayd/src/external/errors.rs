//! Failures reported by external collaborators.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by identity, document, and queue collaborators.
#[derive(Debug, Error)]
pub enum ExternalError {
    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Target URL, without credentials.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The remote side answered with a non-success status.
    #[error("{url} answered with status {status}")]
    Status {
        /// Target URL, without credentials.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The response body could not be read or decoded.
    #[error("unreadable response from {url}: {source}")]
    Body {
        /// Target URL, without credentials.
        url: String,
        /// Read or decode failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The requested key does not exist.
    #[error("no entry for key '{key}'")]
    NotFound {
        /// Missing key.
        key: String,
    },
    /// Local filesystem access failed.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// A key escaped the store root or was otherwise unusable.
    #[error("invalid store key '{key}'")]
    InvalidKey {
        /// Offending key.
        key: String,
    },
    /// A queue or endpoint address was not a valid URL.
    #[error("invalid address '{address}': {source}")]
    InvalidAddress {
        /// Offending address.
        address: String,
        /// URL parse failure.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ExternalError {
    pub(crate) fn transport(url: &url::Url, source: reqwest::Error) -> Self {
        Self::Transport {
            url: redacted(url),
            source,
        }
    }

    pub(crate) fn status(url: &url::Url, status: reqwest::StatusCode) -> Self {
        Self::Status {
            url: redacted(url),
            status: status.as_u16(),
        }
    }

    pub(crate) fn body(
        url: &url::Url,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Body {
            url: redacted(url),
            source: source.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Returns true when the collaborator reported a missing entry.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Renders a URL without its query string, which may carry an access token.
fn redacted(url: &url::Url) -> String {
    let mut clean = url.clone();
    clean.set_query(None);
    clean.to_string()
}
