//! Test utilities for API server integration tests

use axum_test::TestServer;
use std::sync::Arc;
use std::time::Instant;
use tactrix::config::InstrumentCatalog;
use tactrix::core::http::{create_router, AppState, HealthStatus};
use tactrix::core::state::{DiscretionaryStore, RecommendationBoard};
use tactrix::metrics::Metrics;
use tokio::sync::RwLock;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub board: Arc<RecommendationBoard>,
    pub discretionary: Arc<DiscretionaryStore>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let board = Arc::new(RecommendationBoard::new());
        let discretionary = Arc::new(DiscretionaryStore::new());
        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            catalog: Arc::new(InstrumentCatalog::default()),
            board: board.clone(),
            discretionary: discretionary.clone(),
        };

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            board,
            discretionary,
        }
    }
}
