//! External collaborators consumed by the dispatcher and invocation boundary.
//!
//! Each collaborator is a narrow synchronous trait so that tests can swap in
//! `mockall` doubles. The production implementations are thin wrappers over a
//! blocking `reqwest` client or the local filesystem and make exactly one
//! attempt per call.

mod errors;
mod identity;
mod queue;
mod store;

use std::sync::Arc;

use relay_config::Config;
use serde::Deserialize;

pub use self::errors::ExternalError;
pub use self::identity::HttpIdentityResolver;
pub use self::queue::HttpCommandQueue;
pub use self::store::{DirectoryDocumentStore, HttpDocumentStore, document_store_for};

/// Tracing target for collaborator calls.
pub(crate) const EXTERNAL_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::external");

/// Identity attached to a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    /// Stable account identifier; keys the discovery document.
    pub user_id: String,
    /// Display name, when shared.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address, when shared.
    #[serde(default)]
    pub email: Option<String>,
}

/// Resolves a bearer token to the account that owns it.
pub trait IdentityResolver: Send + Sync {
    /// Looks up the profile for `token`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExternalError`] when the lookup fails or the token is
    /// rejected.
    fn resolve(&self, token: &str) -> Result<UserProfile, ExternalError>;
}

/// Keyed read-only blob store holding discovery documents.
pub trait DocumentStore: Send + Sync {
    /// Reads the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalError::NotFound`] for a missing key and other
    /// variants for access failures.
    fn fetch(&self, key: &str) -> Result<Vec<u8>, ExternalError>;
}

/// Outbound queue feeding the device-control agent.
pub trait CommandQueue: Send + Sync {
    /// Places `body` on `queue`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExternalError`] when the message was not accepted.
    fn send(&self, queue: &str, body: &str) -> Result<(), ExternalError>;
}

/// Collaborators injected into the dispatcher and invocation boundary.
#[derive(Clone)]
pub struct ExternalSystems {
    /// Bearer-token resolver.
    pub identity: Arc<dyn IdentityResolver>,
    /// Discovery document store.
    pub documents: Arc<dyn DocumentStore>,
    /// Outbound command queue.
    pub queue: Arc<dyn CommandQueue>,
}

impl ExternalSystems {
    /// Groups explicit collaborator implementations.
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        documents: Arc<dyn DocumentStore>,
        queue: Arc<dyn CommandQueue>,
    ) -> Self {
        Self {
            identity,
            documents,
            queue,
        }
    }

    /// Builds the production collaborators described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalError::Client`] when the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, ExternalError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(ExternalError::Client)?;
        Ok(Self::new(
            Arc::new(HttpIdentityResolver::new(
                client.clone(),
                config.profile_url().clone(),
            )),
            document_store_for(config.document_store(), client.clone()),
            Arc::new(HttpCommandQueue::new(client)),
        ))
    }
}

impl std::fmt::Debug for ExternalSystems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalSystems").finish_non_exhaustive()
    }
}
