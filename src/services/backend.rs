//! HTTP client for the signal backend

use crate::config::Config;
use crate::error::SourceError;
use crate::services::decode::{decode_batch, DecodedBatch};
use crate::services::signal_source::SignalSource;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::NaiveDate;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const SIGNALS_PATH: &str = "api/signals";
const UNIVERSES_PATH: &str = "api/universe";

pub struct HttpSignalSource {
    base_url: Url,
    client: reqwest::Client,
    max_retries: usize,
}

impl HttpSignalSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, SourceError> {
        // A trailing slash keeps any path prefix when joining endpoints
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            base_url: Url::parse(&base)?,
            client,
            max_retries: 3,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(&config.backend_url, client)?.with_max_retries(config.fetch_retries))
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json_once(&self, url: Url, date: Option<NaiveDate>) -> Result<Value, SourceError> {
        let mut request = self.client.get(url);
        if let Some(date) = date {
            request = request.query(&[("date", date.format("%Y-%m-%d").to_string())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get_json(&self, path: &str, date: Option<NaiveDate>) -> Result<Value, SourceError> {
        let url = self.base_url.join(path)?;
        debug!(url = %url, date = ?date, "Fetching from signal backend");

        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_secs(2))
            .with_max_times(self.max_retries);

        (|| self.get_json_once(url.clone(), date))
            .retry(backoff)
            .sleep(tokio::time::sleep)
            .when(SourceError::is_transient)
            .notify(|err: &SourceError, delay: Duration| {
                warn!(error = %err, delay_ms = delay.as_millis() as u64, "Retrying signal backend request");
            })
            .await
    }
}

#[async_trait]
impl SignalSource for HttpSignalSource {
    async fn fetch_signals(&self, date: Option<NaiveDate>) -> Result<DecodedBatch, SourceError> {
        let payload = self.get_json(SIGNALS_PATH, date).await?;
        Ok(decode_batch(payload)?)
    }

    async fn fetch_universes(&self) -> Result<Vec<String>, SourceError> {
        let payload = self.get_json(UNIVERSES_PATH, None).await?;
        Ok(serde_json::from_value(payload)?)
    }
}
