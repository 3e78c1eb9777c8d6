use crate::config::Settings;
use crate::domain::nav::{NavRecord, RawNavRecord};
use crate::feed::error::FetchError;
use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_FEED_URL: &str = "https://www.amfiindia.com/spages/NAVAll.txt";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Seam between the HTTP layer and the upstream feed, so handlers can be
/// exercised against a stub.
#[async_trait::async_trait]
pub trait NavFeedSource: Send + Sync {
    /// Fetch the feed fresh and return every line that validates, in upstream
    /// order. No caching across calls.
    async fn fetch_nav_data(&self) -> Result<Vec<NavRecord>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct AmfiFeedClient {
    http: reqwest::Client,
    feed_url: String,
}

impl AmfiFeedClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let feed_url = settings
            .nav_feed_url
            .clone()
            .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

        let timeout_secs = settings
            .nav_feed_timeout_secs
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build NAV feed http client")?;

        Ok(Self { http, feed_url })
    }

    async fn fetch_text(&self) -> Result<String> {
        let res = self
            .http
            .get(&self.feed_url)
            .send()
            .await
            .context("NAV feed request failed")?;

        let status = res.status();
        let text = res.text().await.context("failed to read NAV feed body")?;
        if !status.is_success() {
            anyhow::bail!("NAV feed HTTP {status}");
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl NavFeedSource for AmfiFeedClient {
    async fn fetch_nav_data(&self) -> Result<Vec<NavRecord>, FetchError> {
        let text = match self.fetch_text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = %err, url = %self.feed_url, "NAV feed fetch failed");
                return Err(FetchError);
            }
        };
        Ok(parse_nav_text(&text))
    }
}

/// Parse the raw feed body. The format intermixes data rows with section
/// headers ("Open Ended Schemes(...)"), sub-headers and blank separators;
/// anything without a `;` or without all six fields is not a data row.
pub fn parse_nav_text(text: &str) -> Vec<NavRecord> {
    let mut records = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || !line.contains(';') {
            continue;
        }

        // First six fields positionally; anything after the sixth is ignored.
        let mut parts = line.split(';');
        let raw = RawNavRecord {
            scheme_code: parts.next().map(str::to_string),
            isin_div_payout_or_growth: parts.next().map(str::to_string),
            isin_div_reinvestment: parts.next().map(str::to_string),
            scheme_name: parts.next().map(str::to_string),
            net_asset_value: parts.next().map(str::to_string),
            date: parts.next().map(str::to_string),
        };

        if let Some(record) = raw.validate() {
            records.push(record);
        }
    }
    records
}
