//! Server state and configuration.

use std::path::PathBuf;

use crate::error::SelloError;
use crate::measure::{ApproxMeasure, TextMeasure, TtfMeasure};
use crate::store::{JsonFileStore, MemoryStore, TemplateStore};

/// Server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Data directory for template JSON files. `None` = in-memory only.
    pub data_dir: Option<PathBuf>,
    /// TTF font for text measurement. `None` = per-character estimate.
    pub font_path: Option<PathBuf>,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub store: Box<dyn TemplateStore>,
    pub measure: Box<dyn TextMeasure + Send + Sync>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, SelloError> {
        let store: Box<dyn TemplateStore> = match &config.data_dir {
            Some(dir) => Box::new(JsonFileStore::open(dir)?),
            None => Box::new(MemoryStore::new()),
        };
        let measure: Box<dyn TextMeasure + Send + Sync> = match &config.font_path {
            Some(path) => Box::new(TtfMeasure::from_file(path)?),
            None => Box::new(ApproxMeasure),
        };
        Ok(Self {
            config,
            store,
            measure,
        })
    }
}
