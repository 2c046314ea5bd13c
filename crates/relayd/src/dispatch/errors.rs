//! Error types for directive dispatch failures.
//!
//! Every variant is terminal for the invocation: nothing is retried, and
//! validation failures are raised before any collaborator is called or any
//! command is encoded. Callers on the platform side only ever see the
//! rendered message.

use thiserror::Error;

use crate::external::ExternalError;

/// Errors surfaced while classifying and handling a directive.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The directive carried no usable bearer token.
    #[error("invalid token: {message}")]
    InvalidToken { message: String },

    /// A control directive did not name its endpoint.
    #[error("missing endpoint: {message}")]
    MissingEndpoint { message: String },

    /// No handler exists for the (namespace, name) pair.
    #[error("unsupported directive: namespace '{namespace}', name '{name}'")]
    UnsupportedDirective { namespace: String, name: String },

    /// The bearer token could not be resolved to a user.
    #[error("identity resolution failed: {source}")]
    IdentityResolution {
        #[source]
        source: ExternalError,
    },

    /// The user's discovery document was missing or unreadable.
    #[error("discovery document for user '{user_id}' unavailable: {source}")]
    Document {
        user_id: String,
        #[source]
        source: DocumentFault,
    },

    /// The directive payload or a stored device failed validation.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// A routing table lacked an entry for a known enumeration value.
    #[error("unreachable code: {message}")]
    Unreachable { message: String },

    /// The inbound message was not valid JSON or had an unknown shape.
    #[error("malformed message: {message}")]
    MalformedMessage {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

/// Why a discovery document could not be used.
#[derive(Debug, Error)]
pub enum DocumentFault {
    /// The store could not supply the document.
    #[error(transparent)]
    Fetch(#[from] ExternalError),
    /// The stored bytes were not a valid discovery document.
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DispatchError {
    /// Returns a stable, snake-case label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidToken { .. } => "invalid_token",
            Self::MissingEndpoint { .. } => "missing_endpoint",
            Self::UnsupportedDirective { .. } => "unsupported_directive",
            Self::IdentityResolution { .. } => "identity_resolution",
            Self::Document { .. } => "document",
            Self::Validation { .. } => "validation",
            Self::Unreachable { .. } => "unreachable",
            Self::MalformedMessage { .. } => "malformed_message",
        }
    }

    /// Creates an invalid token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Creates a missing endpoint error.
    pub fn missing_endpoint(message: impl Into<String>) -> Self {
        Self::MissingEndpoint {
            message: message.into(),
        }
    }

    /// Creates an unsupported directive error naming both halves of the key.
    pub fn unsupported_directive(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnsupportedDirective {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Wraps an identity resolver failure.
    pub fn identity_resolution(source: ExternalError) -> Self {
        Self::IdentityResolution { source }
    }

    /// Wraps a document fetch or parse failure.
    pub fn document(user_id: impl Into<String>, source: impl Into<DocumentFault>) -> Self {
        Self::Document {
            user_id: user_id.into(),
            source: source.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an unreachable-code error.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Creates a malformed message error from a serde error.
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedMessage {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed message error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedMessage {
            message: message.into(),
            source: None,
        }
    }
}
