//! Dashboard composition: the stats strip plus one card per signal

use crate::services::decode::{DecodedBatch, RejectedRecord};
use crate::signals::aggregation::{Aggregator, UniverseStats};
use crate::signals::classifier::SignalCard;
use crate::signals::companies::CompanyDirectory;
use serde::Serialize;

pub const EMPTY_MESSAGE: &str = "No signals available for this date.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub universe: String,
    pub as_of: String,
    pub horizon: String,
    pub stats: UniverseStats,
    pub cards: Vec<SignalCard>,
    pub rejected: Vec<RejectedRecord>,
    /// Records that are failed computation attempts. They are still counted
    /// in `stats`.
    pub failed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl DashboardView {
    /// Aggregation and card building both read the same immutable snapshot;
    /// neither depends on the other.
    pub fn build(
        decoded: &DecodedBatch,
        companies: &CompanyDirectory,
        universe: impl Into<String>,
    ) -> Self {
        let signals = decoded.signals();
        let stats = Aggregator::aggregate(signals);
        let cards: Vec<SignalCard> = signals
            .iter()
            .map(|signal| SignalCard::build(signal, companies))
            .collect();
        let failed_count = signals.iter().filter(|s| s.error().is_some()).count();
        let empty_message = cards.is_empty().then_some(EMPTY_MESSAGE);

        Self {
            universe: universe.into(),
            as_of: decoded.batch.as_of.clone(),
            horizon: decoded.batch.horizon.clone(),
            stats,
            cards,
            rejected: decoded.rejected.clone(),
            failed_count,
            empty_message,
        }
    }
}
