//! Directory API client.
//!
//! The remote listing service is the source of truth for server data.
//! The engine talks to it through the `LobbyApi` trait so tests can
//! substitute a scripted implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::lobby::{ListResponse, ServerInfo};
use crate::query::ListQuery;
use crate::{Error, Result};

/// The three operations the engine consumes.
#[async_trait]
pub trait LobbyApi: Send + Sync {
    /// Post a query specification, returning one page of results.
    async fn list(&self, query: &ListQuery) -> Result<ListResponse>;

    /// Fetch the enriched record for one row id.
    async fn details(&self, row_id: &str) -> Result<ServerInfo>;

    /// Current game version. Best-effort: failures are suppressed and
    /// reported as `None`.
    async fn version(&self) -> Option<i64>;
}

/// `reqwest`-backed directory client.
#[derive(Debug, Clone)]
pub struct LobbyClient {
    http: reqwest::Client,
    base_url: String,
}

/// Envelope around the details endpoint response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetailsEnvelope {
    #[serde(default)]
    code: i64,
    server: Option<ServerInfo>,
}

impl LobbyClient {
    /// Client against the given API base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn details_url(&self, row_id: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::Api(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| Error::Api("base URL cannot carry path segments".to_string()))?
            .push("details")
            .push(row_id);
        Ok(url)
    }
}

#[async_trait]
impl LobbyApi for LobbyClient {
    async fn list(&self, query: &ListQuery) -> Result<ListResponse> {
        let url = format!("{}/list", self.base_url);
        tracing::info!(%url, "requesting server list");
        let response = self.http.post(&url).json(query).send().await?;
        if !response.status().is_success() {
            return Err(Error::Api(format!("list returned {}", response.status())));
        }
        Ok(response.json::<ListResponse>().await?)
    }

    async fn details(&self, row_id: &str) -> Result<ServerInfo> {
        let url = self.details_url(row_id)?;
        tracing::info!(row_id, %url, "requesting server details");
        let response = self.http.post(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Api(format!("details returned {}", response.status())));
        }
        let envelope = response.json::<DetailsEnvelope>().await?;
        if envelope.code != 200 {
            return Err(Error::Api(format!("details returned code {}", envelope.code)));
        }
        envelope
            .server
            .ok_or_else(|| Error::Api("details response had no server body".to_string()))
    }

    async fn version(&self) -> Option<i64> {
        let url = format!("{}/version", self.base_url);
        let text = match self.http.get(&url).send().await {
            Ok(response) => response.text().await.ok()?,
            Err(e) => {
                tracing::debug!("version lookup failed: {e}");
                return None;
            }
        };
        text.trim().parse::<i64>().ok()
    }
}
