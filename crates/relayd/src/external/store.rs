//! Discovery document stores.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use relay_config::DocumentSource;
use tracing::debug;
use url::Url;

use super::{DocumentStore, EXTERNAL_TARGET, ExternalError};

/// Builds the store selected by configuration.
pub fn document_store_for(source: &DocumentSource, client: Client) -> Arc<dyn DocumentStore> {
    match source {
        DocumentSource::Directory { root } => {
            Arc::new(DirectoryDocumentStore::new(root.as_std_path()))
        }
        DocumentSource::Http { base } => Arc::new(HttpDocumentStore::new(client, base.clone())),
    }
}

/// Reads documents from `{root}/{key}`.
#[derive(Debug, Clone)]
pub struct DirectoryDocumentStore {
    root: PathBuf,
}

impl DirectoryDocumentStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, ExternalError> {
        let relative = Path::new(key);
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if key.is_empty() || !contained {
            return Err(ExternalError::InvalidKey {
                key: key.to_owned(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl DocumentStore for DirectoryDocumentStore {
    fn fetch(&self, key: &str) -> Result<Vec<u8>, ExternalError> {
        let path = self.resolve(key)?;
        debug!(target: EXTERNAL_TARGET, path = %path.display(), "reading document");
        std::fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ExternalError::not_found(key),
            _ => ExternalError::Io { path, source },
        })
    }
}

/// Reads documents with `GET {base}/{key}`.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: Client,
    base: Url,
}

impl HttpDocumentStore {
    /// Creates a store below `base`. A trailing slash is implied.
    #[must_use]
    pub fn new(client: Client, mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { client, base }
    }

    fn resolve(&self, key: &str) -> Result<Url, ExternalError> {
        if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
            return Err(ExternalError::InvalidKey {
                key: key.to_owned(),
            });
        }
        self.base
            .join(key)
            .map_err(|_| ExternalError::InvalidKey {
                key: key.to_owned(),
            })
    }
}

impl DocumentStore for HttpDocumentStore {
    fn fetch(&self, key: &str) -> Result<Vec<u8>, ExternalError> {
        let url = self.resolve(key)?;
        debug!(target: EXTERNAL_TARGET, url = %url, "fetching document");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| ExternalError::transport(&url, source))?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(ExternalError::not_found(key)),
            status if !status.is_success() => Err(ExternalError::status(&url, status)),
            _ => response
                .bytes()
                .map(|bytes| bytes.to_vec())
                .map_err(|source| ExternalError::body(&url, source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn reads_documents_below_root() {
        let dir = TempDir::new().expect("create store dir");
        std::fs::create_dir_all(dir.path().join("discovery")).expect("create key dir");
        std::fs::write(dir.path().join("discovery/u1.json"), b"{}").expect("write document");

        let store = DirectoryDocumentStore::new(dir.path());
        assert_eq!(store.fetch("discovery/u1.json").expect("fetch"), b"{}".to_vec());
    }

    #[test]
    fn missing_documents_are_not_found() {
        let dir = TempDir::new().expect("create store dir");
        let store = DirectoryDocumentStore::new(dir.path());
        let error = store.fetch("discovery/nobody.json").expect_err("fetch must fail");
        assert!(error.is_not_found(), "unexpected error: {error}");
    }

    #[rstest]
    #[case("../secrets.json")]
    #[case("/etc/passwd")]
    #[case("discovery/../../x.json")]
    #[case("")]
    fn directory_store_rejects_escaping_keys(#[case] key: &str) {
        let store = DirectoryDocumentStore::new("/srv/relay");
        assert!(matches!(
            store.fetch(key),
            Err(ExternalError::InvalidKey { .. })
        ));
    }

    #[rstest]
    #[case("https://store.example/docs", "https://store.example/docs/discovery/u1.json")]
    #[case("https://store.example/docs/", "https://store.example/docs/discovery/u1.json")]
    #[case("https://store.example", "https://store.example/discovery/u1.json")]
    fn http_store_joins_keys_below_base(#[case] base: &str, #[case] expected: &str) {
        let store = HttpDocumentStore::new(Client::new(), Url::parse(base).expect("parse base"));
        let url = store.resolve("discovery/u1.json").expect("resolve key");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn http_store_rejects_parent_segments() {
        let store = HttpDocumentStore::new(
            Client::new(),
            Url::parse("https://store.example/docs/").expect("parse base"),
        );
        assert!(store.resolve("../admin").is_err());
    }
}
