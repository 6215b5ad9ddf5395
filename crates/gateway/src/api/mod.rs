pub mod ask;
pub mod auth;
pub mod error;
pub mod matches;

use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::state::AppState;

/// Build the full API router.
///
/// `/health` is public; everything under `/api` sits behind the
/// `PS_API_TOKEN` bearer-token middleware.
pub fn router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/health", get(health));

    let protected = Router::new()
        .route("/api/matches/analyze", post(matches::analyze))
        .route("/api/matches/query", post(matches::query))
        .route("/api/matches/recent", get(matches::recent))
        .route("/api/ask", post(ask::ask))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_api_token,
        ));

    public.merge(protected)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
