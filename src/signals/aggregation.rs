//! Universe-level rollup of signal records

use crate::models::signal::RawSignal;
use serde::Serialize;

/// Fixed-point units per whole probability used when averaging.
const PROB_UNITS: u128 = 1_000_000_000;

fn prob_units(probability: f64) -> u128 {
    (probability.clamp(0.0, 1.0) * PROB_UNITS as f64).round() as u128
}

/// Summary statistics for one batch of signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseStats {
    pub total: usize,
    pub bullish_count: usize,
    pub bearish_count: usize,
    pub avg_probability_pct: u32,
}

impl UniverseStats {
    /// Records that are neither bullish nor bearish.
    pub fn neutral_count(&self) -> usize {
        self.total - self.bullish_count - self.bearish_count
    }
}

/// Aggregate signal records into universe statistics
pub struct Aggregator;

impl Aggregator {
    /// Single pass over the records. Errored records are counted like any
    /// other. Probabilities are summed in integer units so the result does
    /// not depend on input order.
    pub fn aggregate(signals: &[RawSignal]) -> UniverseStats {
        let mut stats = UniverseStats::default();
        let mut prob_sum: u128 = 0;

        for signal in signals {
            stats.total += 1;
            if signal.trend.is_bullish() {
                stats.bullish_count += 1;
            } else if signal.trend.is_bearish() {
                stats.bearish_count += 1;
            }
            prob_sum += prob_units(signal.effective_prob_up());
        }

        if stats.total > 0 {
            // mean percentage, rounded half-up once
            let denominator = stats.total as u128 * PROB_UNITS;
            let pct = (prob_sum * 100 + denominator / 2) / denominator;
            stats.avg_probability_pct = pct as u32;
        }

        stats
    }
}

pub fn aggregate(signals: &[RawSignal]) -> UniverseStats {
    Aggregator::aggregate(signals)
}
