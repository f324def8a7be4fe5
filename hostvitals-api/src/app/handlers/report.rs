//! Report endpoints. A report is always answered with 200; facets that failed
//! carry an `{"error": ...}` marker instead of data.

use axum::extract::{Path, State};
use axum::Json;
use hostvitals_core::Report;
use serde::Serialize;
use tracing::instrument;

use crate::app::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct FacetSummary {
    pub name: String,
    pub timeout_ms: u64,
}

#[instrument(skip_all)]
pub async fn get_report(State(state): State<AppState>) -> Json<Report> {
    Json(state.aggregator.collect(&state.registry).await)
}

#[instrument(skip_all)]
pub async fn get_facet(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Report>, ApiError> {
    let descriptor = state
        .registry
        .get(&name)
        .ok_or_else(|| ApiError::unknown_facet(&name))?;
    Ok(Json(state.aggregator.collect_one(descriptor).await))
}

#[instrument(skip_all)]
pub async fn list_facets(State(state): State<AppState>) -> Json<Vec<FacetSummary>> {
    let facets = state
        .registry
        .all()
        .iter()
        .map(|descriptor| FacetSummary {
            name: descriptor.name().to_string(),
            timeout_ms: state.aggregator.timeout_for(descriptor).as_millis() as u64,
        })
        .collect();
    Json(facets)
}
