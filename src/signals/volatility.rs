//! Volatility banding used when displaying annualised volatility

use serde::Serialize;

/// Band thresholds, in annualised percent.
pub struct VolatilityBands;

impl VolatilityBands {
    pub const HIGH_ABOVE: f64 = 40.0;
    pub const MEDIUM_ABOVE: f64 = 25.0;

    /// Band for a volatility reading. Zero or negative readings are not
    /// displayed and therefore not banded.
    pub fn classify(volatility_pct: f64) -> Option<VolatilityBand> {
        if volatility_pct.is_nan() || volatility_pct <= 0.0 {
            return None;
        }
        let band = if volatility_pct > Self::HIGH_ABOVE {
            VolatilityBand::High
        } else if volatility_pct > Self::MEDIUM_ABOVE {
            VolatilityBand::Medium
        } else {
            VolatilityBand::Low
        };
        Some(band)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityBand {
    High,
    Medium,
    Low,
}

impl VolatilityBand {
    pub fn css_class(&self) -> &'static str {
        match self {
            VolatilityBand::High => "high-vol",
            VolatilityBand::Medium => "med-vol",
            VolatilityBand::Low => "low-vol",
        }
    }
}
