use axum::http::Uri;
use axum::Json;
use serde_json::json;

use crate::app::ApiError;

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn handler_404(uri: Uri) -> ApiError {
    tracing::warn!(path = uri.path(), "route not found");
    ApiError::not_found(format!("no route for {}", uri.path()))
}
