//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::Config;
use crate::core::dashboard::DashboardView;
use crate::error::SourceError;
use crate::metrics::Metrics;
use crate::services::backend::HttpSignalSource;
use crate::services::signal_source::SignalSource;
use crate::signals::classifier::SignalCard;
use crate::signals::companies::CompanyDirectory;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub source: Arc<dyn SignalSource>,
    pub companies: Arc<CompanyDirectory>,
    pub default_universe: String,
}

impl AppState {
    pub fn new(
        metrics: Arc<Metrics>,
        source: Arc<dyn SignalSource>,
        companies: Arc<CompanyDirectory>,
        default_universe: impl Into<String>,
    ) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            source,
            companies,
            default_universe: default_universe.into(),
        }
    }
}

/// Service health as seen by the last backend request.
#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
    pub backend_error: Option<String>,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
            backend_error: None,
        }
    }
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.backend_error.is_none()
    }
}

type ApiError = (StatusCode, Json<Value>);

async fn backend_reachable(state: &AppState) {
    let mut health = state.health.write().await;
    if !health.is_healthy() {
        info!("Signal backend reachable again");
        *health = HealthStatus::default();
    }
}

async fn backend_failure(state: &AppState, err: SourceError) -> ApiError {
    state.metrics.backend_fetch_failures_total.inc();
    error!(error = %err, "Failed to fetch from signal backend");

    // Only outages degrade health; a 4xx or bad payload still means the backend answered
    if err.is_transient() {
        let mut health = state.health.write().await;
        health.status = "degraded".to_string();
        health.backend_error = Some(err.to_string());
    }

    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": format!("Failed to load signals: {}", err) })),
    )
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    let mut body = json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "stockpulse-dashboard"
    });
    if let Some(err) = &health.backend_error {
        body["backend_error"] = json!(err);
    }
    Ok(Json(body))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    date: Option<NaiveDate>,
    universe: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    date: Option<NaiveDate>,
}

/// List the universes offered by the backend
async fn list_universes(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let universes = match state.source.fetch_universes().await {
        Ok(universes) => universes,
        Err(e) => return Err(backend_failure(&state, e).await),
    };
    backend_reachable(&state).await;
    Ok(Json(universes))
}

/// Stats strip and cards for one date
async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, ApiError> {
    let decoded = match state.source.fetch_signals(params.date).await {
        Ok(decoded) => decoded,
        Err(e) => return Err(backend_failure(&state, e).await),
    };
    backend_reachable(&state).await;

    let universe = params
        .universe
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| state.default_universe.clone());
    let view = DashboardView::build(&decoded, &state.companies, universe);

    state
        .metrics
        .signals_classified_total
        .inc_by(view.cards.len() as u64);
    state
        .metrics
        .signal_records_rejected_total
        .inc_by(view.rejected.len() as u64);

    info!(
        as_of = %view.as_of,
        universe = %view.universe,
        total = view.stats.total,
        rejected = view.rejected.len(),
        "Built dashboard"
    );

    Ok(Json(view))
}

/// Card for a single symbol
async fn get_symbol_card(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<DateQuery>,
) -> Result<Json<SignalCard>, ApiError> {
    let decoded = match state.source.fetch_signals(params.date).await {
        Ok(decoded) => decoded,
        Err(e) => return Err(backend_failure(&state, e).await),
    };
    backend_reachable(&state).await;

    let symbol = symbol.to_uppercase();
    match decoded.batch.find(&symbol) {
        Some(signal) => {
            state.metrics.signals_classified_total.inc();
            Ok(Json(SignalCard::build(signal, &state.companies)))
        }
        None => {
            warn!(symbol = %symbol, "No signal for symbol");
            Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("No signal for {}", symbol) })),
            ))
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/universes", get(list_universes))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/dashboard/{symbol}", get(get_symbol_card))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let source = Arc::new(HttpSignalSource::from_config(config)?);
    let companies = Arc::new(config.company_directory()?);

    info!(
        backend = %source.base_url(),
        companies = companies.len(),
        "Signal backend configured"
    );

    let state = AppState::new(metrics, source, companies, config.default_universe.clone());
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
