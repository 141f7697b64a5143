//! HTTP handlers for the server.

pub mod placeholders;
pub mod plan;
pub mod templates;

use axum::http::StatusCode;

use crate::error::SelloError;

/// Map a library error to an HTTP status: validation problems are the
/// client's fault, missing templates are 404, everything else is a server
/// error.
pub(super) fn error_status(e: &SelloError) -> StatusCode {
    match e {
        SelloError::InvalidPlaceholder(_) | SelloError::UnknownFieldKey(_) => {
            StatusCode::BAD_REQUEST
        }
        SelloError::Template(msg) if msg.starts_with("Template not found") => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(super) fn error_tuple(e: SelloError) -> (StatusCode, String) {
    (error_status(&e), e.to_string())
}
