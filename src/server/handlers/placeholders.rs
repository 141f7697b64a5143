//! Placeholder get/put handlers.
//!
//! Placeholders cross this API in source space only. A PUT replaces the
//! template's list wholesale (last write wins); an invalid list is rejected
//! with 400 before anything is written, so the persisted state stays
//! intact.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error_tuple;
use crate::placeholder::{validate_records, PlaceholderRecord};

use super::super::state::AppState;

/// Handle GET /api/templates/:id/placeholders.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<String>,
) -> Result<Json<Vec<PlaceholderRecord>>, (StatusCode, String)> {
    let records = state
        .store
        .get_placeholders(&template_id)
        .await
        .map_err(error_tuple)?;
    Ok(Json(records))
}

/// Handle PUT /api/templates/:id/placeholders.
pub async fn put(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<String>,
    Json(records): Json<Vec<PlaceholderRecord>>,
) -> Result<StatusCode, (StatusCode, String)> {
    validate_records(&records).map_err(error_tuple)?;

    state
        .store
        .set_placeholders(&template_id, records)
        .await
        .map_err(error_tuple)?;

    Ok(StatusCode::NO_CONTENT)
}
