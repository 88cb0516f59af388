//! Signal source interface for the backend that computes signals.

use crate::error::SourceError;
use crate::services::decode::{decode_batch, DecodedBatch};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Fetch the batch for `date`, or the latest available one when `None`.
    async fn fetch_signals(&self, date: Option<NaiveDate>) -> Result<DecodedBatch, SourceError>;

    /// Universe names, in backend order.
    async fn fetch_universes(&self) -> Result<Vec<String>, SourceError>;
}

/// In-memory source serving a fixed payload.
///
/// The payload is decoded on every call so each fetch yields a fresh,
/// independent snapshot.
pub struct StaticSignalSource {
    payload: Value,
    universes: Vec<String>,
}

impl StaticSignalSource {
    pub fn new(payload: Value, universes: Vec<String>) -> Self {
        Self { payload, universes }
    }
}

#[async_trait]
impl SignalSource for StaticSignalSource {
    async fn fetch_signals(&self, date: Option<NaiveDate>) -> Result<DecodedBatch, SourceError> {
        let mut decoded = decode_batch(self.payload.clone())?;
        if let Some(date) = date {
            decoded.batch.as_of = date.format("%Y-%m-%d").to_string();
        }
        Ok(decoded)
    }

    async fn fetch_universes(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.universes.clone())
    }
}
