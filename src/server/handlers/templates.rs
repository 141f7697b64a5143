//! Template registration and lookup handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::error_tuple;
use crate::template::Template;

use super::super::state::AppState;

/// Request body for POST /api/templates.
///
/// Native dimensions come either directly (the uploader already decoded the
/// image) or from `image_url`, which is fetched and decoded server-side.
#[derive(Debug, Deserialize)]
pub struct RegisterTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub native_width: Option<u32>,
    #[serde(default)]
    pub native_height: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Handle POST /api/templates - register a new template.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterTemplate>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut template = match (req.native_width, req.native_height, &req.image_url) {
        (Some(w), Some(h), _) if w > 0 && h > 0 => Template::new(req.name, w, h),
        (_, _, Some(url)) => Template::from_image_url(req.name, url)
            .await
            .map_err(error_tuple)?,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Provide positive native_width/native_height, or an image_url".to_string(),
            ));
        }
    };
    template.description = req.description;

    state
        .store
        .put_template(template.clone())
        .await
        .map_err(error_tuple)?;

    Ok((StatusCode::CREATED, Json(template)))
}

/// Handle GET /api/templates/:id - fetch a template record.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<String>,
) -> Result<Json<Template>, (StatusCode, String)> {
    let template = state
        .store
        .get_template(&template_id)
        .await
        .map_err(error_tuple)?;
    Ok(Json(template))
}
