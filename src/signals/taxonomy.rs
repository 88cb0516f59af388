//! Trend taxonomy and the display descriptor derived from it

use crate::models::signal::{RawSignal, Trend};
use serde::Serialize;
use std::borrow::Cow;

/// Display color category of a trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    Bullish,
    Bearish,
    Neutral,
}

impl ColorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorClass::Bullish => "bullish",
            ColorClass::Bearish => "bearish",
            ColorClass::Neutral => "neutral",
        }
    }
}

/// One row of the trend taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub tag: &'static str,
    pub color_class: ColorClass,
    pub label: &'static str,
    pub description: &'static str,
}

/// The fixed trend taxonomy. Tags absent from this table fall back to a
/// neutral descriptor labelled with the raw tag.
pub static TREND_TAXONOMY: [TaxonomyEntry; 7] = [
    TaxonomyEntry {
        tag: "strong_up",
        color_class: ColorClass::Bullish,
        label: "Strong Buy",
        description: "Strong upward momentum. Price is above both MA5 and MA20 with solid gains.",
    },
    TaxonomyEntry {
        tag: "up",
        color_class: ColorClass::Bullish,
        label: "Buy",
        description: "Positive trend. Price is trading above the 20-day moving average.",
    },
    TaxonomyEntry {
        tag: "neutral",
        color_class: ColorClass::Neutral,
        label: "Hold",
        description: "No clear direction. Consider waiting for a clearer signal.",
    },
    TaxonomyEntry {
        tag: "down",
        color_class: ColorClass::Bearish,
        label: "Sell",
        description: "Negative trend. Price is trading below the 20-day moving average.",
    },
    TaxonomyEntry {
        tag: "strong_down",
        color_class: ColorClass::Bearish,
        label: "Strong Sell",
        description: "Strong downward momentum. Price is below both MA5 and MA20 with losses.",
    },
    TaxonomyEntry {
        tag: "unknown",
        color_class: ColorClass::Neutral,
        label: "Unknown",
        description: "Unable to determine trend due to data issues.",
    },
    TaxonomyEntry {
        tag: "insufficient_data",
        color_class: ColorClass::Neutral,
        label: "No Data",
        description: "Not enough historical data to calculate trend.",
    },
];

impl Trend {
    pub fn taxonomy_entry(&self) -> Option<&'static TaxonomyEntry> {
        let tag = self.as_str();
        TREND_TAXONOMY.iter().find(|entry| entry.tag == tag)
    }

    pub fn color_class(&self) -> ColorClass {
        self.taxonomy_entry()
            .map(|entry| entry.color_class)
            .unwrap_or(ColorClass::Neutral)
    }

    pub fn is_bullish(&self) -> bool {
        self.color_class() == ColorClass::Bullish
    }

    pub fn is_bearish(&self) -> bool {
        self.color_class() == ColorClass::Bearish
    }
}

/// Presentation descriptor for a trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDescriptor {
    pub color_class: ColorClass,
    pub label: Cow<'static, str>,
    pub description: &'static str,
}

impl TrendDescriptor {
    pub fn for_trend(trend: &Trend) -> Self {
        match trend.taxonomy_entry() {
            Some(entry) => Self {
                color_class: entry.color_class,
                label: Cow::Borrowed(entry.label),
                description: entry.description,
            },
            None => Self {
                color_class: ColorClass::Neutral,
                label: Cow::Owned(trend.as_str().to_string()),
                description: "",
            },
        }
    }
}

/// Classify a record by its trend tag. No other field is consulted.
pub fn classify(record: &RawSignal) -> TrendDescriptor {
    TrendDescriptor::for_trend(&record.trend)
}
