//! Unit tests for the trend taxonomy

use stockpulse::models::signal::RawSignal;
use stockpulse::signals::taxonomy::{classify, ColorClass, TREND_TAXONOMY};

#[test]
fn test_classify_matches_taxonomy_table() {
    let expected = [
        ("strong_up", ColorClass::Bullish, "Strong Buy"),
        ("up", ColorClass::Bullish, "Buy"),
        ("neutral", ColorClass::Neutral, "Hold"),
        ("down", ColorClass::Bearish, "Sell"),
        ("strong_down", ColorClass::Bearish, "Strong Sell"),
        ("unknown", ColorClass::Neutral, "Unknown"),
        ("insufficient_data", ColorClass::Neutral, "No Data"),
    ];

    for (tag, color, label) in expected {
        let descriptor = classify(&RawSignal::new("X", tag));
        assert_eq!(descriptor.color_class, color, "color for {}", tag);
        assert_eq!(descriptor.label, label, "label for {}", tag);
        assert!(!descriptor.description.is_empty(), "description for {}", tag);
    }
}

#[test]
fn test_unrecognized_trend_falls_back_to_raw_label() {
    let descriptor = classify(&RawSignal::new("X", "foo"));
    assert_eq!(descriptor.color_class, ColorClass::Neutral);
    assert_eq!(descriptor.label, "foo");
    assert_eq!(descriptor.description, "");
}

#[test]
fn test_classify_ignores_non_trend_fields() {
    let bare = RawSignal::new("X", "down");
    let full = RawSignal::new("Y", "down")
        .with_prob_up(0.95)
        .with_price(10.0)
        .with_monthly_return(12.0)
        .with_volatility(60.0)
        .with_error("stale");

    assert_eq!(classify(&bare), classify(&full));
}

#[test]
fn test_taxonomy_tags_are_unique() {
    for (i, entry) in TREND_TAXONOMY.iter().enumerate() {
        assert!(
            TREND_TAXONOMY[i + 1..].iter().all(|other| other.tag != entry.tag),
            "duplicate tag {}",
            entry.tag
        );
    }
}

#[test]
fn test_descriptor_serializes_camel_case() {
    let value = serde_json::to_value(classify(&RawSignal::new("X", "up"))).unwrap();
    assert_eq!(value["colorClass"], "bullish");
    assert_eq!(value["label"], "Buy");
    assert!(value["description"].as_str().unwrap().starts_with("Positive trend"));
}
