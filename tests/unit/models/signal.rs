//! Unit tests for raw signal records

use serde_json::json;
use stockpulse::models::signal::{RawSignal, SignalBatch, Trend, DEFAULT_PROB_UP};

#[test]
fn test_trend_parses_known_tags() {
    assert_eq!(Trend::from("strong_up"), Trend::StrongUp);
    assert_eq!(Trend::from("up"), Trend::Up);
    assert_eq!(Trend::from("neutral"), Trend::Neutral);
    assert_eq!(Trend::from("down"), Trend::Down);
    assert_eq!(Trend::from("strong_down"), Trend::StrongDown);
    assert_eq!(Trend::from("unknown"), Trend::Unknown);
    assert_eq!(Trend::from("insufficient_data"), Trend::InsufficientData);
}

#[test]
fn test_trend_keeps_unrecognized_tag_verbatim() {
    let trend = Trend::from("sideways");
    assert_eq!(trend, Trend::Other("sideways".to_string()));
    assert_eq!(trend.as_str(), "sideways");
}

#[test]
fn test_missing_null_or_empty_trend_is_unknown() {
    let missing: RawSignal = serde_json::from_value(json!({ "symbol": "X" })).unwrap();
    let null: RawSignal = serde_json::from_value(json!({ "symbol": "X", "trend": null })).unwrap();
    let empty: RawSignal = serde_json::from_value(json!({ "symbol": "X", "trend": "" })).unwrap();

    assert_eq!(missing.trend, Trend::Unknown);
    assert_eq!(null.trend, Trend::Unknown);
    assert_eq!(empty.trend, Trend::Unknown);
}

#[test]
fn test_trend_serializes_as_tag() {
    let signal = RawSignal::new("AAPL", "strong_up");
    let value = serde_json::to_value(&signal).unwrap();
    assert_eq!(value["trend"], "strong_up");
    assert!(value.get("prob_up").is_none());
}

#[test]
fn test_prob_up_defaults_when_absent_zero_or_nan() {
    assert_eq!(RawSignal::new("A", "up").effective_prob_up(), DEFAULT_PROB_UP);
    assert_eq!(RawSignal::new("A", "up").with_prob_up(0.0).effective_prob_up(), 0.5);
    assert_eq!(RawSignal::new("A", "up").with_prob_up(f64::NAN).effective_prob_up(), 0.5);
    assert_eq!(RawSignal::new("A", "up").with_prob_up(0.8).effective_prob_up(), 0.8);
}

#[test]
fn test_zero_fields_are_not_available() {
    let signal = RawSignal::new("A", "up")
        .with_price(0.0)
        .with_moving_averages(0.0, 0.0)
        .with_volatility(0.0)
        .with_data_points(0);

    assert_eq!(signal.price(), None);
    assert_eq!(signal.ma5(), None);
    assert_eq!(signal.ma20(), None);
    assert_eq!(signal.volatility_pct(), 0.0);
    assert_eq!(signal.data_points(), None);
}

#[test]
fn test_monthly_return_defaults_to_zero_and_keeps_sign() {
    assert_eq!(RawSignal::new("A", "up").monthly_return_pct(), 0.0);
    assert_eq!(
        RawSignal::new("A", "down").with_monthly_return(-0.5).monthly_return_pct(),
        -0.5
    );
}

#[test]
fn test_empty_error_is_ignored() {
    assert_eq!(RawSignal::new("A", "up").with_error("").error(), None);
    assert_eq!(
        RawSignal::new("A", "unknown").with_error("rate limited").error(),
        Some("rate limited")
    );
}

#[test]
fn test_batch_find_by_symbol() {
    let batch = SignalBatch::new(
        vec![RawSignal::new("AAPL", "up"), RawSignal::new("MSFT", "down")],
        "2024-03-01",
        "30d",
    );
    assert_eq!(batch.find("MSFT").map(|s| &s.trend), Some(&Trend::Down));
    assert!(batch.find("TSLA").is_none());
    assert!(!batch.is_empty());
}
