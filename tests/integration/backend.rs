//! Integration tests for the HTTP signal backend client

use chrono::NaiveDate;
use serde_json::json;
use stockpulse::error::SourceError;
use stockpulse::services::backend::HttpSignalSource;
use stockpulse::services::signal_source::SignalSource;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn payload(as_of: &str) -> serde_json::Value {
    json!({
        "as_of": as_of,
        "horizon": "30d",
        "signals": [
            { "symbol": "AAPL", "trend": "up", "prob_up": 0.62 },
            { "symbol": "MSFT", "trend": "strong_down", "prob_up": 0.18 }
        ]
    })
}

#[tokio::test]
async fn fetches_latest_signals_without_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/signals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload("2024-03-04")))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpSignalSource::new(&server.uri()).unwrap();
    let decoded = source.fetch_signals(None).await.unwrap();

    assert_eq!(decoded.batch.as_of, "2024-03-04");
    assert_eq!(decoded.signals().len(), 2);

    let requests = server.received_requests().await.expect("wiremock requests");
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn passes_requested_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/signals"))
        .and(query_param("date", "2024-02-15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload("2024-02-15")))
        .mount(&server)
        .await;

    let source = HttpSignalSource::new(&server.uri()).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
    let decoded = source.fetch_signals(Some(date)).await.unwrap();

    assert_eq!(decoded.batch.as_of, "2024-02-15");
}

#[tokio::test]
async fn keeps_base_path_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/backend/api/universe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["SP500", "NASDAQ100"])))
        .mount(&server)
        .await;

    let source = HttpSignalSource::new(&format!("{}/backend", server.uri())).unwrap();
    let universes = source.fetch_universes().await.unwrap();

    assert_eq!(universes, vec!["SP500", "NASDAQ100"]);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/signals"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpSignalSource::new(&server.uri()).unwrap().with_max_retries(3);
    let err = source.fetch_signals(None).await.unwrap_err();

    assert!(matches!(err, SourceError::Status(404)));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/universe"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/universe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["WATCHLIST"])))
        .mount(&server)
        .await;

    let source = HttpSignalSource::new(&server.uri()).unwrap().with_max_retries(3);
    let universes = source.fetch_universes().await.unwrap();

    assert_eq!(universes, vec!["WATCHLIST"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn invalid_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/signals"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let source = HttpSignalSource::new(&server.uri()).unwrap();
    let err = source.fetch_signals(None).await.unwrap_err();

    assert!(matches!(err, SourceError::Decode(_)));
}

#[test]
fn rejects_invalid_base_url() {
    assert!(matches!(
        HttpSignalSource::new("not a url"),
        Err(SourceError::Url(_))
    ));
}
