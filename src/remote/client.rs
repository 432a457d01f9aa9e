//! HTTP client for the Google Webfonts Developer API.
//!
//! A single unauthenticated-or-API-key GET returns the full catalog; there is
//! no pagination. The per-request timeout is set on the underlying client at
//! construction time.

use super::models::WebfontList;
use super::{FetchError, RemoteCatalog};
use crate::catalog::Font;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/webfonts/v1/webfonts";

pub struct WebfontsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WebfontsClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RemoteCatalog for WebfontsClient {
    async fn fetch(&self) -> Result<Vec<Font>, FetchError> {
        let mut request = self
            .client
            .get(&self.base_url)
            .query(&[("sort", "popularity")]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        debug!(endpoint = %self.base_url, "Fetching font catalog");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body: WebfontList = response.json().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Malformed(e.to_string())
            }
        })?;

        let total = body.items.len();
        let fonts: Vec<Font> = body
            .items
            .into_iter()
            .filter_map(|item| item.into_font())
            .collect();

        if fonts.len() < total {
            debug!(
                skipped = total - fonts.len(),
                "Skipped catalog entries with unusable metadata"
            );
        }
        if fonts.is_empty() {
            return Err(FetchError::EmptyCatalog);
        }

        debug!(fonts = fonts.len(), "Fetched font catalog");
        Ok(fonts)
    }
}
