// =============================================================================
// NewsAPI Client — business headline search
// =============================================================================
//
// Consumes the newsapi.org /v2/everything endpoint. The raw article structs
// mirror the provider's JSON; classification and deduplication happen in the
// news handler.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

/// An article as returned by the provider, before classification.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub source: Option<RawSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSource {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

/// NewsAPI REST client.
#[derive(Clone)]
pub struct NewsClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl NewsClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        Self {
            api_key: api_key.into(),
            base_url: "https://newsapi.org".to_string(),
            client,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// GET /v2/everything — English articles matching `query`, newest first.
    #[instrument(skip(self), name = "news::get_everything")]
    pub async fn get_everything(&self, query: &str, page_size: u32) -> Result<Vec<RawArticle>> {
        let url = format!(
            "{}/v2/everything?q={}&language=en&sortBy=publishedAt&pageSize={}&apiKey={}",
            self.base_url, query, page_size, self.api_key
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /v2/everything request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("NewsAPI GET /v2/everything returned {}: {}", status, body);
        }

        let body: EverythingResponse = resp
            .json()
            .await
            .context("failed to parse news response")?;

        debug!(query, count = body.articles.len(), "articles fetched");
        Ok(body.articles)
    }
}

impl std::fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
