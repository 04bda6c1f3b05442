pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod health;
pub mod seed;
pub mod sse;
pub mod state;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::services::ServeDir;

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let web_root = config.web_root.clone();
    let state = AppState::new(config);

    // Reads are public; the auth middleware only guards mutating methods.
    let api_routes = Router::new()
        .route("/home", get(api::get_home))
        .route("/categories", get(api::get_categories))
        .route("/games", get(api::get_games).post(api::post_games))
        .route(
            "/games/{game_id}",
            get(api::get_game).delete(api::delete_game),
        )
        .route("/jackpots", get(api::get_jackpots).put(api::put_jackpot))
        .route("/jackpots/stream", get(sse::updates_stream))
        .route("/status", get(api::get_status))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    let app = Router::new()
        .route("/healthz", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api/v1", api_routes)
        .fallback_service(ServeDir::new(&web_root))
        .with_state(state.clone());

    (app, state)
}

/// Middleware wrapper that injects AuthConfig into request extensions for
/// the bearer auth middleware.
async fn bearer_auth_layer(
    axum::extract::State(state): axum::extract::State<AppState>,
    mut request: axum::extract::Request,
    next: middleware::Next,
) -> Result<axum::response::Response, axum::http::StatusCode> {
    request.extensions_mut().insert(state.auth.clone());
    auth::bearer_auth_middleware(request.headers().clone(), request, next).await
}
