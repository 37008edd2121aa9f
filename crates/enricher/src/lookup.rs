//! The external title-search-and-detail seam.
//!
//! `TitleLookup` is the black-box surface of the metadata collaborator:
//! search by title, then fetch details for one match id. The production
//! implementation speaks HTTP/JSON; tests substitute a scripted lookup.

use crate::error::LookupError;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// One search hit from the external service, best matches first.
#[derive(Debug, Clone, Deserialize)]
pub struct TitleMatch {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
}

/// Detail payload for a matched title.
///
/// Every field is optional; the service routinely returns partial records
/// and the enricher decides what to fall back to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleDetails {
    #[serde(default)]
    pub plot_outline: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Black-box lookup surface of the external metadata service.
#[async_trait]
pub trait TitleLookup: Send + Sync {
    /// Search candidate matches for a query, best first.
    async fn search(&self, query: &str) -> Result<Vec<TitleMatch>, LookupError>;

    /// Fetch the detail record for one match id.
    async fn details(&self, id: &str) -> Result<TitleDetails, LookupError>;
}

/// HTTP implementation of the lookup seam.
///
/// Endpoints: `GET {base}/search?q=<query>` returning `{"results": [...]}`
/// and `GET {base}/title/<id>` returning one detail record. An API key, if
/// configured, rides along as the `apiKey` query parameter.
pub struct HttpTitleLookup {
    client: HttpClient,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpTitleLookup {
    /// The client-level timeout is a transport backstop; the per-title
    /// budget is enforced by the enricher on top of it.
    pub fn new(base_url: impl AsRef<str>, api_key: Option<String>) -> Result<Self, LookupError> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| LookupError::Malformed(format!("invalid lookup base URL: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("apiKey", key.as_str())]);
        }
        request
    }

    fn join(&self, path: &str) -> Result<Url, LookupError> {
        self.base_url
            .join(path)
            .map_err(|e| LookupError::Malformed(format!("bad lookup URL {path:?}: {e}")))
    }
}

#[async_trait]
impl TitleLookup for HttpTitleLookup {
    async fn search(&self, query: &str) -> Result<Vec<TitleMatch>, LookupError> {
        let url = self.join("search")?;
        let response = self.get(url).query(&[("q", query)]).send().await?;

        if !response.status().is_success() {
            return Err(LookupError::Status {
                status: response.status().as_u16(),
            });
        }

        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| LookupError::Malformed(format!("search response: {e}")))?;
        let results = body
            .get("results")
            .and_then(|v| v.as_array())
            .ok_or_else(|| LookupError::Malformed("search response missing results".to_string()))?;

        // Tolerant parse: skip individually malformed hits rather than
        // failing the whole search.
        let matches: Vec<TitleMatch> = results
            .iter()
            .filter_map(|hit| serde_json::from_value(hit.clone()).ok())
            .collect();

        debug!(query = %query, results = matches.len(), "title search completed");
        Ok(matches)
    }

    async fn details(&self, id: &str) -> Result<TitleDetails, LookupError> {
        let url = self.join(&format!("title/{id}"))?;
        let response = self.get(url).send().await?;

        if !response.status().is_success() {
            return Err(LookupError::Status {
                status: response.status().as_u16(),
            });
        }

        let text = response.text().await?;
        let details: TitleDetails = serde_json::from_str(&text)
            .map_err(|e| LookupError::Malformed(format!("detail response: {e}")))?;

        debug!(id = %id, has_rating = details.rating.is_some(), "title details fetched");
        Ok(details)
    }
}
