use std::sync::atomic::Ordering;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Structured health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub catalog: CatalogInfo,
    pub sse_subscribers: usize,
}

#[derive(Serialize)]
pub struct CatalogInfo {
    pub games: usize,
    pub jackpots: usize,
}

/// Structured health check endpoint. Returns server status, catalog counts,
/// and subscriber info as JSON.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let sse = state.sse_subscriber_count.load(Ordering::Relaxed);

    let (games, jackpots) = {
        let catalog = state.catalog.read().await;
        let stats = catalog.stats();
        (stats.total_games, stats.total_jackpots)
    };

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        catalog: CatalogInfo { games, jackpots },
        sse_subscribers: sse,
    })
}

/// Readiness check — the lobby is not renderable until the producer has
/// seeded or posted at least one game.
pub async fn readiness_check(State(state): State<AppState>) -> &'static str {
    let catalog = state.catalog.read().await;
    if catalog.games().is_empty() {
        return "not ready: catalog is empty";
    }
    "ready"
}
