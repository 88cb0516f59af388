//! Fail-soft decoding of backend signal payloads.
//!
//! A malformed record is set aside and reported instead of failing the
//! whole batch.

use crate::models::signal::{RawSignal, SignalBatch};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A record that could not be turned into a [`RawSignal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    /// Position in the backend's `signals` array.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub reason: String,
}

/// A batch plus whatever records had to be dropped from it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedBatch {
    pub batch: SignalBatch,
    pub rejected: Vec<RejectedRecord>,
}

impl DecodedBatch {
    pub fn signals(&self) -> &[RawSignal] {
        &self.batch.signals
    }
}

impl From<SignalBatch> for DecodedBatch {
    fn from(batch: SignalBatch) -> Self {
        Self {
            batch,
            rejected: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WirePayload {
    #[serde(default)]
    signals: Option<Vec<Value>>,
    #[serde(default)]
    as_of: Option<String>,
    #[serde(default)]
    horizon: Option<String>,
}

/// Decode one element of the `signals` array.
pub fn decode_record(index: usize, value: Value) -> Result<RawSignal, RejectedRecord> {
    let symbol = value
        .get("symbol")
        .and_then(Value::as_str)
        .map(str::to_string);

    let reject = |reason: String| RejectedRecord {
        index,
        symbol: symbol.clone(),
        reason,
    };

    if !value.is_object() {
        return Err(reject("record is not an object".to_string()));
    }

    let record: RawSignal = serde_json::from_value(value).map_err(|e| reject(e.to_string()))?;
    if record.symbol.trim().is_empty() {
        return Err(reject("missing symbol".to_string()));
    }

    Ok(record)
}

/// Decode a full payload. Only a payload whose envelope is unusable is an
/// error; bad records end up in [`DecodedBatch::rejected`].
pub fn decode_batch(payload: Value) -> Result<DecodedBatch, serde_json::Error> {
    let wire: WirePayload = serde_json::from_value(payload)?;

    let mut signals = Vec::new();
    let mut rejected = Vec::new();

    for (index, value) in wire.signals.unwrap_or_default().into_iter().enumerate() {
        match decode_record(index, value) {
            Ok(record) => signals.push(record),
            Err(record) => {
                warn!(
                    index = record.index,
                    symbol = record.symbol.as_deref().unwrap_or("-"),
                    reason = %record.reason,
                    "Skipping malformed signal record"
                );
                rejected.push(record);
            }
        }
    }

    Ok(DecodedBatch {
        batch: SignalBatch::new(
            signals,
            wire.as_of.unwrap_or_default(),
            wire.horizon.unwrap_or_default(),
        ),
        rejected,
    })
}
