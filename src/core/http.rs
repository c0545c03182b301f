//! HTTP endpoint server using Axum
//!
//! Presentation only: the endpoints read the recommendation board and mutate
//! the operator's discretionary annotations. Nothing here feeds back into
//! scoring beyond the annotation store.

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{delete, get, put},
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::InstrumentCatalog;
use crate::core::state::{DiscretionaryStore, RecommendationBoard, ScanEntry};
use crate::metrics::Metrics;
use crate::models::{DiscretionaryInput, InstrumentSpec, SymbolId, Timeframe};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub catalog: Arc<InstrumentCatalog>,
    pub board: Arc<RecommendationBoard>,
    pub discretionary: Arc<DiscretionaryStore>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "tactrix-signal-engine"
    })))
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

/// Latest recommendations across the whole board, highest confidence first.
async fn list_recommendations(State(state): State<AppState>) -> Json<Vec<ScanEntry>> {
    Json(state.board.snapshot().await)
}

/// Latest recommendations for one instrument.
async fn symbol_recommendations(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Vec<ScanEntry>>, StatusCode> {
    let symbol = SymbolId::new(symbol);
    state
        .catalog
        .get(&symbol)
        .map_err(|_| StatusCode::NOT_FOUND)?;
    Ok(Json(state.board.for_symbol(&symbol).await))
}

#[derive(Debug, Serialize)]
struct InstrumentResponse {
    symbol: SymbolId,
    #[serde(flatten)]
    spec: InstrumentSpec,
}

async fn list_instruments(State(state): State<AppState>) -> Json<Vec<InstrumentResponse>> {
    let mut instruments: Vec<InstrumentResponse> = state
        .catalog
        .iter()
        .map(|(symbol, spec)| InstrumentResponse {
            symbol: symbol.clone(),
            spec: spec.clone(),
        })
        .collect();
    instruments.sort_by(|a, b| a.symbol.as_str().cmp(b.symbol.as_str()));
    Json(instruments)
}

#[derive(Debug, Serialize)]
struct DiscretionaryResponse {
    symbol: SymbolId,
    timeframe: Timeframe,
    #[serde(flatten)]
    input: DiscretionaryInput,
}

async fn list_discretionary(State(state): State<AppState>) -> Json<Vec<DiscretionaryResponse>> {
    let entries = state
        .discretionary
        .snapshot()
        .await
        .into_iter()
        .map(|(symbol, timeframe, input)| DiscretionaryResponse {
            symbol,
            timeframe,
            input,
        })
        .collect();
    Json(entries)
}

fn parse_pair(
    state: &AppState,
    symbol: String,
    timeframe: String,
) -> Result<(SymbolId, Timeframe), StatusCode> {
    let symbol = SymbolId::new(symbol);
    state
        .catalog
        .get(&symbol)
        .map_err(|_| StatusCode::NOT_FOUND)?;
    let timeframe = Timeframe::from_str(&timeframe).map_err(|_| StatusCode::BAD_REQUEST)?;
    // Only scored timeframes carry annotations; the trend timeframe is never
    // evaluated, so an annotation on it could never take effect.
    if !Timeframe::SCORED.contains(&timeframe) {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok((symbol, timeframe))
}

/// Set the operator annotation for one (instrument, timeframe) pair. Takes
/// effect on the next scan cycle.
async fn put_discretionary(
    State(state): State<AppState>,
    Path((symbol, timeframe)): Path<(String, String)>,
    Json(input): Json<DiscretionaryInput>,
) -> Result<StatusCode, StatusCode> {
    let (symbol, timeframe) = parse_pair(&state, symbol, timeframe)?;
    info!(
        symbol = %symbol,
        timeframe = %timeframe,
        marker = ?input.marker,
        flow = ?input.flow,
        "discretionary input updated"
    );
    state.discretionary.set(symbol, timeframe, input).await;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_discretionary(
    State(state): State<AppState>,
    Path((symbol, timeframe)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    let (symbol, timeframe) = parse_pair(&state, symbol, timeframe)?;
    state.discretionary.clear(&symbol, timeframe).await;
    Ok(StatusCode::NO_CONTENT)
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/recommendations", get(list_recommendations))
        .route("/api/recommendations/{symbol}", get(symbol_recommendations))
        .route("/api/instruments", get(list_instruments))
        .route("/api/discretionary", get(list_discretionary))
        .route(
            "/api/discretionary/{symbol}/{timeframe}",
            put(put_discretionary),
        )
        .route(
            "/api/discretionary/{symbol}/{timeframe}",
            delete(delete_discretionary),
        )
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

pub async fn start_server(
    port: u16,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
