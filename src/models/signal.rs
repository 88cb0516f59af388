use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Probability used when a record carries no usable `prob_up`.
pub const DEFAULT_PROB_UP: f64 = 0.5;

/// Trend tag attached to each signal by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Trend {
    StrongUp,
    Up,
    Neutral,
    Down,
    StrongDown,
    #[default]
    Unknown,
    InsufficientData,
    /// Any tag outside the fixed taxonomy, kept verbatim.
    Other(String),
}

impl Trend {
    pub fn as_str(&self) -> &str {
        match self {
            Trend::StrongUp => "strong_up",
            Trend::Up => "up",
            Trend::Neutral => "neutral",
            Trend::Down => "down",
            Trend::StrongDown => "strong_down",
            Trend::Unknown => "unknown",
            Trend::InsufficientData => "insufficient_data",
            Trend::Other(raw) => raw,
        }
    }
}

impl From<&str> for Trend {
    fn from(raw: &str) -> Self {
        match raw {
            "strong_up" => Trend::StrongUp,
            "up" => Trend::Up,
            "neutral" => Trend::Neutral,
            "down" => Trend::Down,
            "strong_down" => Trend::StrongDown,
            "unknown" | "" => Trend::Unknown,
            "insufficient_data" => Trend::InsufficientData,
            other => Trend::Other(other.to_string()),
        }
    }
}

impl From<String> for Trend {
    fn from(raw: String) -> Self {
        Trend::from(raw.as_str())
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Trend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Trend {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `null` is treated the same as a missing tag
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(Trend::from).unwrap_or_default())
    }
}

/// One per-symbol signal record as produced by the backend.
///
/// Numeric fields follow the backend's loose conventions: a missing, zero or
/// `NaN` value means "not available". The accessor methods encode the
/// per-field defaults so callers never read the raw options directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSignal {
    pub symbol: String,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob_up: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma5: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma20: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_return: Option<f64>,
    /// Any JSON number is accepted; only the displayed value is integral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan() && *v != 0.0)
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

impl RawSignal {
    pub fn new(symbol: impl Into<String>, trend: impl Into<Trend>) -> Self {
        Self {
            symbol: symbol.into(),
            trend: trend.into(),
            ..Self::default()
        }
    }

    pub fn with_prob_up(mut self, prob_up: f64) -> Self {
        self.prob_up = Some(prob_up);
        self
    }

    pub fn with_price(mut self, current_price: f64) -> Self {
        self.current_price = Some(current_price);
        self
    }

    pub fn with_moving_averages(mut self, ma5: f64, ma20: f64) -> Self {
        self.ma5 = Some(ma5);
        self.ma20 = Some(ma20);
        self
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    pub fn with_monthly_return(mut self, monthly_return: f64) -> Self {
        self.monthly_return = Some(monthly_return);
        self
    }

    pub fn with_data_points(mut self, data_points: u32) -> Self {
        self.data_points = Some(f64::from(data_points));
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// `prob_up`, or 0.5 when absent, zero or `NaN`.
    pub fn effective_prob_up(&self) -> f64 {
        truthy(self.prob_up).unwrap_or(DEFAULT_PROB_UP)
    }

    /// Last price, only when strictly positive.
    pub fn price(&self) -> Option<f64> {
        positive(self.current_price)
    }

    pub fn ma5(&self) -> Option<f64> {
        positive(self.ma5)
    }

    pub fn ma20(&self) -> Option<f64> {
        positive(self.ma20)
    }

    /// Annualised volatility in percent, 0 when not available.
    pub fn volatility_pct(&self) -> f64 {
        truthy(self.volatility).unwrap_or(0.0)
    }

    /// Horizon return in percent. Unlike the other numeric fields a missing
    /// value defaults to 0 and is still displayed.
    pub fn monthly_return_pct(&self) -> f64 {
        truthy(self.monthly_return).unwrap_or(0.0)
    }

    /// Number of history points, only when positive. Fractional counts are
    /// rounded to the nearest whole point.
    pub fn data_points(&self) -> Option<u64> {
        positive(self.data_points)
            .filter(|n| n.is_finite())
            .map(|n| n.round() as u64)
            .filter(|n| *n > 0)
    }

    /// Failure message of a computation attempt, ignoring empty strings.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// A complete snapshot of signals for one date.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalBatch {
    #[serde(default)]
    pub signals: Vec<RawSignal>,
    #[serde(default)]
    pub as_of: String,
    #[serde(default)]
    pub horizon: String,
}

impl SignalBatch {
    pub fn new(signals: Vec<RawSignal>, as_of: impl Into<String>, horizon: impl Into<String>) -> Self {
        Self {
            signals,
            as_of: as_of.into(),
            horizon: horizon.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn find(&self, symbol: &str) -> Option<&RawSignal> {
        self.signals.iter().find(|s| s.symbol == symbol)
    }
}
