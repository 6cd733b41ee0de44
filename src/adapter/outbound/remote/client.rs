//! HTTP client for the document store.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::{LedgerEntry, Trade, TradeId, TradePatch, TradeRecord};
use crate::error::{ConfigError, Result, StoreError};
use crate::infrastructure::config::store::StoreConfig;
use crate::port::TradeStore;

/// Body returned by a POST to the collection.
#[derive(Debug, Deserialize)]
struct CreatedResponse {
    #[serde(default)]
    name: Option<String>,
}

/// [`TradeStore`] backed by the remote document store.
pub struct RemoteTradeStore {
    http: HttpClient,
    base_url: Url,
    collection: String,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl RemoteTradeStore {
    /// Client with default timeouts and a single attempt per request.
    #[must_use]
    pub fn new(base_url: Url, collection: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url,
            collection: collection.into(),
            retry_max_attempts: 1,
            retry_backoff_ms: 0,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            base_url,
            collection: config.collection.clone(),
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        })
    }

    /// `{base}/{collection}.json`
    pub fn collection_url(&self) -> Result<Url> {
        let file = format!("{}.json", self.collection);
        self.url_for(&[file.as_str()])
    }

    /// `{base}/{collection}/{id}.json`
    pub fn record_url(&self, id: &TradeId) -> Result<Url> {
        let file = format!("{id}.json");
        self.url_for(&[self.collection.as_str(), file.as_str()])
    }

    fn url_for(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ConfigError::InvalidValue {
                field: "store.url",
                reason: "cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_with_retry(&self, url: &Url) -> Result<String> {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = match self.http.get(url.clone()).send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let response = Self::check_status("GET", url, response)?;
            match response.text().await {
                Ok(body) => return Ok(body),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "Store request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }

    fn check_status(method: &'static str, url: &Url, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(StoreError::Status {
                method,
                url: url.to_string(),
                status,
            }
            .into())
        }
    }

    /// Send a write. Writes are never retried.
    async fn write(
        &self,
        method: &'static str,
        url: &Url,
        request: RequestBuilder,
    ) -> Result<Response> {
        let response = request.send().await?;
        Self::check_status(method, url, response)
    }

    fn decode_collection(body: &str) -> Result<Vec<LedgerEntry>> {
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Option<BTreeMap<String, Value>> = serde_json::from_str(body)?;
        let entries = records
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(id, value)| Self::decode_entry(id, value))
            .collect();
        Ok(entries)
    }

    fn decode_entry(id: String, value: Value) -> Option<LedgerEntry> {
        let decoded = serde_json::from_value::<TradeRecord>(value)
            .map_err(|e| e.to_string())
            .and_then(|record| record.into_trade().map_err(|e| e.to_string()));
        match decoded {
            Ok(trade) => Some(LedgerEntry::new(TradeId::new(id), trade)),
            Err(error) => {
                warn!(id = %id, error = %error, "Skipping undecodable trade record");
                None
            }
        }
    }
}

impl TradeStore for RemoteTradeStore {
    async fn list(&self) -> Result<Vec<LedgerEntry>> {
        let url = self.collection_url()?;
        debug!(url = %url, "Fetching trades");

        let body = self.get_with_retry(&url).await?;
        let entries = Self::decode_collection(&body)?;
        debug!(count = entries.len(), "Fetched trades");
        Ok(entries)
    }

    async fn create(&self, trade: &Trade) -> Result<TradeId> {
        let url = self.collection_url()?;
        let body = serde_json::to_value(TradeRecord::from_trade(trade))?;

        let request = self.http.post(url.clone()).json(&body);
        let response = self.write("POST", &url, request).await?;
        let created: CreatedResponse = response.json().await?;
        let id = created
            .name
            .filter(|name| !name.is_empty())
            .map(TradeId::new)
            .ok_or(StoreError::MissingId)?;

        info!(id = %id, stock = %trade.name(), "Created trade");
        Ok(id)
    }

    async fn update(&self, id: &TradeId, patch: &TradePatch) -> Result<()> {
        if patch.is_empty() {
            debug!(id = %id, "Nothing changed, skipping update");
            return Ok(());
        }
        let url = self.record_url(id)?;
        let body = serde_json::to_value(patch)?;

        let request = self.http.patch(url.clone()).json(&body);
        self.write("PATCH", &url, request).await?;
        let fields: Vec<&str> = patch.keys().collect();
        info!(id = %id, fields = ?fields, "Updated trade");
        Ok(())
    }

    async fn delete(&self, id: &TradeId) -> Result<()> {
        let url = self.record_url(id)?;
        let request = self.http.delete(url.clone());
        self.write("DELETE", &url, request).await?;
        info!(id = %id, "Deleted trade");
        Ok(())
    }
}
