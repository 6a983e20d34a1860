//! Encyclopedic summary lookup via the Wikipedia REST API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::EncyclopediaConfig;
use crate::error::{ConfigError, LookupError};
use crate::types::FactSource;

/// Relevance assigned to every encyclopedic summary.
pub const ENCYCLOPEDIA_RELEVANCE: f64 = 0.9;

const SOURCE_NAME: &str = "Wikipedia";

/// A service that returns one summary record for a topic name.
#[async_trait]
pub trait EncyclopediaLookup: Send + Sync {
    async fn summary(&self, topic: &str) -> Result<FactSource, LookupError>;
}

#[derive(Debug, Deserialize)]
struct SummaryReply {
    title: Option<String>,
    extract: Option<String>,
    content_urls: Option<ContentUrls>,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<PageUrl>,
}

#[derive(Debug, Deserialize)]
struct PageUrl {
    page: Option<String>,
}

/// Client for `{base_url}/page/summary/{topic}`.
pub struct WikipediaClient {
    client: Client,
    base_url: String,
    page_base_url: String,
    timeout_secs: u64,
}

impl WikipediaClient {
    pub fn new(config: &EncyclopediaConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::HttpClient {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_base_url: config.page_base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn summary_url(&self, topic: &str) -> String {
        format!(
            "{}/page/summary/{}",
            self.base_url,
            urlencoding::encode(topic)
        )
    }

    fn fallback_page_url(&self, topic: &str) -> String {
        format!("{}/{}", self.page_base_url, urlencoding::encode(topic))
    }

    fn map_send_error(&self, err: reqwest::Error) -> LookupError {
        if err.is_timeout() {
            LookupError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            LookupError::Connection {
                message: err.to_string(),
            }
        }
    }

    /// Turn a summary body into a fact source. A missing or blank extract
    /// counts as no result.
    fn parse_summary(&self, topic: &str, body: &str) -> Result<FactSource, LookupError> {
        let reply: SummaryReply =
            serde_json::from_str(body).map_err(|e| LookupError::ResponseParse {
                message: format!("Invalid JSON: {}", e),
            })?;

        let summary = match reply.extract {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                return Err(LookupError::NoResult {
                    topic: topic.to_string(),
                });
            }
        };

        let url = reply
            .content_urls
            .and_then(|c| c.desktop)
            .and_then(|d| d.page)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| self.fallback_page_url(topic));

        let published_at = reply
            .timestamp
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(FactSource {
            source: SOURCE_NAME.to_string(),
            url,
            relevance: ENCYCLOPEDIA_RELEVANCE,
            summary,
            title: reply.title.unwrap_or_else(|| topic.to_string()),
            published_at,
        })
    }
}

#[async_trait]
impl EncyclopediaLookup for WikipediaClient {
    async fn summary(&self, topic: &str) -> Result<FactSource, LookupError> {
        let url = self.summary_url(topic);
        debug!(url = %url, "Fetching encyclopedic summary");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        self.parse_summary(topic, &body)
    }
}
