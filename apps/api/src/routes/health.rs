use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status and whether the store answers. An unreachable
/// store reports `degraded` with 503; job views still serve CSV data.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status_code, status, store) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok", "ok"),
        Err(e) => {
            tracing::warn!("Health check: store unreachable: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "error")
        }
    };

    (
        status_code,
        Json(json!({
            "status": status,
            "version": env!("CARGO_PKG_VERSION"),
            "service": "lastdance-api",
            "checks": { "store": store }
        })),
    )
}
