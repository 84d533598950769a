use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness check — fixed status payload, no side effects.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "extract-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
