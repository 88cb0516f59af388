//! Per-symbol display card built from a raw signal

use crate::models::signal::RawSignal;
use crate::signals::companies::CompanyDirectory;
use crate::signals::taxonomy::{classify, TrendDescriptor};
use crate::signals::volatility::{VolatilityBand, VolatilityBands};
use serde::Serialize;

/// Round to `decimals` places with ties away from zero.
///
/// Ties are judged on the exact binary value, so `1.125` rounds to `1.13`
/// while `150.005` (stored just below the tie) rounds to `150.00`.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let bits = value.abs().to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exponent - 1075)
    };
    if exponent >= 0 {
        return value;
    }

    // |value| * 10^decimals == scaled / 2^shift exactly
    let factor = 10u128.pow(decimals);
    let scaled = u128::from(mantissa) * factor;
    let shift = exponent.unsigned_abs();
    let units = if shift >= 127 {
        0
    } else {
        let whole = scaled >> shift;
        let remainder = scaled - (whole << shift);
        whole + u128::from(remainder >= 1u128 << (shift - 1))
    };

    (units as f64 / factor as f64).copysign(value)
}

/// Convert a probability in [0, 1] into a whole percentage.
///
/// Rounding happens exactly once, on the percentage value.
pub fn probability_pct(probability: f64) -> u32 {
    if probability.is_nan() {
        return 0;
    }
    (probability.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Numeric display values with their per-field defaults applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFields {
    pub probability_pct: u32,
    pub price: f64,
    pub monthly_return: f64,
    pub volatility: f64,
}

pub fn derive_fields(record: &RawSignal) -> DerivedFields {
    DerivedFields {
        probability_pct: probability_pct(record.effective_prob_up()),
        price: record.price().unwrap_or(0.0),
        monthly_return: record.monthly_return_pct(),
        volatility: record.volatility_pct(),
    }
}

pub fn format_price(value: f64) -> String {
    format!("${:.2}", round_half_up(value, 2))
}

/// Signed percentage with two decimals, e.g. `+1.25%` or `-0.50%`.
pub fn format_signed_pct(value: f64) -> String {
    if value >= 0.0 {
        // abs() folds -0.0 into +0.00
        format!("+{:.2}%", round_half_up(value.abs(), 2))
    } else {
        format!("{:.2}%", round_half_up(value, 2))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnDirection {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReturn {
    pub value: f64,
    pub text: String,
    pub direction: ReturnDirection,
}

impl MonthlyReturn {
    pub fn new(value: f64) -> Self {
        let direction = if value >= 0.0 {
            ReturnDirection::Positive
        } else {
            ReturnDirection::Negative
        };
        Self {
            value,
            text: format_signed_pct(value),
            direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Ma5,
    Ma20,
    Volatility,
    DataPoints,
}

impl MetricKind {
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Ma5 => "MA5",
            MetricKind::Ma20 => "MA20",
            MetricKind::Volatility => "Volatility",
            MetricKind::DataPoints => "Data Points",
        }
    }
}

/// One entry of the metrics grid. Entries exist only for available fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricEntry {
    pub kind: MetricKind,
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<VolatilityBand>,
}

impl MetricEntry {
    fn new(kind: MetricKind, value: String) -> Self {
        Self {
            kind,
            label: kind.label(),
            value,
            band: None,
        }
    }
}

fn metric_entries(record: &RawSignal, volatility: f64) -> Vec<MetricEntry> {
    let mut metrics = Vec::with_capacity(4);

    if let Some(ma5) = record.ma5() {
        metrics.push(MetricEntry::new(MetricKind::Ma5, format_price(ma5)));
    }
    if let Some(ma20) = record.ma20() {
        metrics.push(MetricEntry::new(MetricKind::Ma20, format_price(ma20)));
    }
    if let Some(band) = VolatilityBands::classify(volatility) {
        metrics.push(MetricEntry {
            band: Some(band),
            ..MetricEntry::new(
                MetricKind::Volatility,
                format!("{:.1}%", round_half_up(volatility, 1)),
            )
        });
    }
    if let Some(points) = record.data_points() {
        metrics.push(MetricEntry::new(MetricKind::DataPoints, points.to_string()));
    }

    metrics
}

/// Presentation-ready view of a single signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalCard {
    pub symbol: String,
    pub company_name: String,
    pub trend: TrendDescriptor,
    pub probability_pct: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub monthly_return: MonthlyReturn,
    pub metrics: Vec<MetricEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SignalCard {
    pub fn build(record: &RawSignal, companies: &CompanyDirectory) -> Self {
        let derived = derive_fields(record);

        Self {
            symbol: record.symbol.clone(),
            company_name: companies.lookup(&record.symbol).to_string(),
            trend: classify(record),
            probability_pct: derived.probability_pct,
            price: record.price().map(format_price),
            monthly_return: MonthlyReturn::new(derived.monthly_return),
            metrics: metric_entries(record, derived.volatility),
            error: record.error().map(str::to_string),
        }
    }

    pub fn metric(&self, kind: MetricKind) -> Option<&MetricEntry> {
        self.metrics.iter().find(|m| m.kind == kind)
    }

    pub fn volatility_band(&self) -> Option<VolatilityBand> {
        self.metric(MetricKind::Volatility).and_then(|m| m.band)
    }
}
