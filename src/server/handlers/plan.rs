//! Render-plan handler: field values in, draw commands out.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::error_tuple;
use crate::placeholder::PlaceholderSet;
use crate::plan::{resolve_plan, DrawCommand, FieldValues};

use super::super::state::AppState;

/// Request body for POST /api/templates/:id/plan.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub fields: FieldValues,
}

/// Handle POST /api/templates/:id/plan - resolve draw origins for one
/// certificate's field values against the template's stored placeholders.
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<String>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<Vec<DrawCommand>>, (StatusCode, String)> {
    let records = state
        .store
        .get_placeholders(&template_id)
        .await
        .map_err(error_tuple)?;

    let placeholders = PlaceholderSet::from_records(&records);
    let commands = resolve_plan(&placeholders, &req.fields, state.measure.as_ref());
    Ok(Json(commands))
}
