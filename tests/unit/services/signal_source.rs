//! Unit tests for the in-memory signal source

use chrono::NaiveDate;
use serde_json::json;
use stockpulse::services::signal_source::{SignalSource, StaticSignalSource};

fn source() -> StaticSignalSource {
    StaticSignalSource::new(
        json!({
            "as_of": "2024-03-01",
            "horizon": "30d",
            "signals": [
                { "symbol": "AAPL", "trend": "up", "prob_up": 0.7 },
                { "trend": "down" }
            ]
        }),
        vec!["SP500".to_string(), "NASDAQ100".to_string()],
    )
}

#[test]
fn test_latest_batch() {
    let decoded = tokio_test::block_on(source().fetch_signals(None)).unwrap();
    assert_eq!(decoded.batch.as_of, "2024-03-01");
    assert_eq!(decoded.signals().len(), 1);
    assert_eq!(decoded.rejected.len(), 1);
}

#[test]
fn test_dated_batch_is_an_independent_snapshot() {
    let source = source();
    let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();

    let dated = tokio_test::block_on(source.fetch_signals(Some(date))).unwrap();
    let latest = tokio_test::block_on(source.fetch_signals(None)).unwrap();

    assert_eq!(dated.batch.as_of, "2024-02-15");
    assert_eq!(latest.batch.as_of, "2024-03-01");
}

#[test]
fn test_universes_keep_order() {
    let universes = tokio_test::block_on(source().fetch_universes()).unwrap();
    assert_eq!(universes, vec!["SP500", "NASDAQ100"]);
}
