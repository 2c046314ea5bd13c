//! HTTP command queue.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use super::{CommandQueue, EXTERNAL_TARGET, ExternalError};

/// Posts command bodies as `text/plain` to the queue URL.
#[derive(Debug, Clone)]
pub struct HttpCommandQueue {
    client: Client,
}

impl HttpCommandQueue {
    /// Creates a queue client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

impl CommandQueue for HttpCommandQueue {
    fn send(&self, queue: &str, body: &str) -> Result<(), ExternalError> {
        let url = Url::parse(queue).map_err(|source| ExternalError::InvalidAddress {
            address: queue.to_owned(),
            source,
        })?;
        debug!(target: EXTERNAL_TARGET, queue = %url, bytes = body.len(), "posting command");

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "text/plain")
            .body(body.to_owned())
            .send()
            .map_err(|source| ExternalError::transport(&url, source))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ExternalError::status(&url, status))
        }
    }
}
