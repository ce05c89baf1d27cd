use crate::schemas::{AppState, HealthResponse};
use axum::{extract::State, response::Json};
use tracing::{instrument, warn};

/// Liveness probe. Reports the crate version and whether the database
/// answers a ping; the endpoint itself always returns 200 so that a broken
/// database shows up as `degraded` instead of an opaque error.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service status", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_up = state.db.ping().await.is_ok();
    if !database_up {
        warn!("Health check: database did not answer ping");
    }

    Json(HealthResponse {
        status: if database_up { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_up { "connected" } else { "disconnected" }.to_string(),
    })
}
