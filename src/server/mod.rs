//! # HTTP Server for Template Placeholder Editing
//!
//! Exposes the persistence gateway and the render-plan resolver over HTTP
//! so the preview/editing UI (and the certificate generator) can talk to
//! one process.
//!
//! ## Usage
//!
//! ```bash
//! sello serve --listen 0.0.0.0:8080 --data-dir ./templates
//! ```

mod handlers;
mod state;

pub use state::ServerConfig;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::error::SelloError;
use state::AppState;

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use sello::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), sello::error::SelloError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     data_dir: None,
///     font_path: None,
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), SelloError> {
    let app_state = Arc::new(AppState::new(config.clone())?);

    let app = Router::new()
        // Template API
        .route("/api/templates", post(handlers::templates::register))
        .route("/api/templates/:id", get(handlers::templates::get))
        // Placeholder API (always source-space records)
        .route(
            "/api/templates/:id/placeholders",
            get(handlers::placeholders::get),
        )
        .route(
            "/api/templates/:id/placeholders",
            put(handlers::placeholders::put),
        )
        // Render plan API
        .route("/api/templates/:id/plan", post(handlers::plan::resolve))
        .with_state(app_state);

    println!("Sello HTTP server starting...");
    println!("Listening on: {}", config.listen_addr);
    match &config.data_dir {
        Some(dir) => println!("Template storage: {}", dir.display()),
        None => println!("Template storage: in-memory (lost on restart)"),
    }
    match &config.font_path {
        Some(path) => println!("Measuring text with: {}", path.display()),
        None => println!("Measuring text with: per-character estimate (no font given)"),
    }
    println!();

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
