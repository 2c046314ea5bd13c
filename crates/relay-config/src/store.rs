//! Location of the per-user discovery documents.

use std::fmt;
use std::str::FromStr;

use camino::Utf8PathBuf;
use thiserror::Error;
use url::Url;

/// Where discovery documents are read from.
///
/// Values starting with `http://` or `https://` select a remote store; keys
/// such as `discovery/<user id>.json` are joined onto the base URL. Anything
/// else names a local directory under which the same keys resolve as paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Local directory store.
    Directory {
        /// Root directory of the store.
        root: Utf8PathBuf,
    },
    /// Remote store addressed by base URL.
    Http {
        /// Base URL that keys are appended to.
        base: Url,
    },
}

impl DocumentSource {
    /// Builds a directory store.
    #[must_use]
    pub fn directory(root: impl Into<Utf8PathBuf>) -> Self {
        Self::Directory { root: root.into() }
    }

    /// Builds a remote store.
    #[must_use]
    pub const fn http(base: Url) -> Self {
        Self::Http { base }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory { root } => write!(f, "{root}"),
            Self::Http { base } => write!(f, "{base}"),
        }
    }
}

/// Errors raised when parsing a document store location.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentSourceParseError {
    /// The value was empty.
    #[error("document store location must not be empty")]
    Empty,
    /// An http(s) URL failed to parse.
    #[error("invalid document store URL '{input}': {source}")]
    InvalidUrl {
        /// Offending input.
        input: String,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },
    /// The URL cannot carry path segments, for example `https:foo`.
    #[error("document store URL '{0}' cannot be used as a base")]
    NotABase(String),
}

impl FromStr for DocumentSource {
    type Err = DocumentSourceParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DocumentSourceParseError::Empty);
        }

        let lowered = trimmed.to_ascii_lowercase();
        if !(lowered.starts_with("http://") || lowered.starts_with("https://")) {
            return Ok(Self::directory(trimmed));
        }

        let base = Url::parse(trimmed).map_err(|source| DocumentSourceParseError::InvalidUrl {
            input: trimmed.to_owned(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(DocumentSourceParseError::NotABase(trimmed.to_owned()));
        }
        Ok(Self::http(base))
    }
}
