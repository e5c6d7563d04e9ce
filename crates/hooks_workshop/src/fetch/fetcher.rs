//! Remote lookups by name.

use super::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Looks up a record by name.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the record for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the lookup fails for any reason.
    async fn fetch(&self, name: &str) -> Result<Value, FetchError>;
}

/// Fetcher issuing `GET {base_url}/{name}` and parsing the JSON body.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    /// Creates a fetcher rooted at `base_url`.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    /// URL requested for `name`.
    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name.trim().to_lowercase())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, name: &str) -> Result<Value, FetchError> {
        let url = self.url_for(name);
        debug!(url = %url, "Sending request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            FetchError::Request(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Unsuccessful response");
            return Err(FetchError::Status {
                status: status.as_u16(),
                name: name.to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
