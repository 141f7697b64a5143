//! # Template Persistence Gateway
//!
//! Stores and retrieves templates and their placeholder sets. Placeholders
//! cross this boundary in source space only — the gateway never sees
//! display-space coordinates.
//!
//! The protocol is a single request with last-write-wins semantics: there
//! is no retry, no versioning, no optimistic concurrency and no merge. Two
//! operators saving the same template concurrently will clobber each other,
//! and nothing here pretends otherwise.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

use crate::error::SelloError;
use crate::placeholder::PlaceholderRecord;
use crate::template::Template;

/// Async persistence gateway for templates and their placeholder sets.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn put_template(&self, template: Template) -> Result<(), SelloError>;

    async fn get_template(&self, template_id: &str) -> Result<Template, SelloError>;

    async fn get_placeholders(
        &self,
        template_id: &str,
    ) -> Result<Vec<PlaceholderRecord>, SelloError>;

    /// Replace the template's placeholder list wholesale (last write wins).
    async fn set_placeholders(
        &self,
        template_id: &str,
        placeholders: Vec<PlaceholderRecord>,
    ) -> Result<(), SelloError>;
}

/// In-memory store, used by tests and by `serve` when no data dir is given.
#[derive(Default)]
pub struct MemoryStore {
    templates: RwLock<HashMap<String, Template>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn put_template(&self, template: Template) -> Result<(), SelloError> {
        self.templates
            .write()
            .await
            .insert(template.template_id.clone(), template);
        Ok(())
    }

    async fn get_template(&self, template_id: &str) -> Result<Template, SelloError> {
        self.templates
            .read()
            .await
            .get(template_id)
            .cloned()
            .ok_or_else(|| SelloError::Template(format!("Template not found: {template_id}")))
    }

    async fn get_placeholders(
        &self,
        template_id: &str,
    ) -> Result<Vec<PlaceholderRecord>, SelloError> {
        Ok(self.get_template(template_id).await?.placeholders)
    }

    async fn set_placeholders(
        &self,
        template_id: &str,
        placeholders: Vec<PlaceholderRecord>,
    ) -> Result<(), SelloError> {
        let mut templates = self.templates.write().await;
        let template = templates
            .get_mut(template_id)
            .ok_or_else(|| SelloError::Template(format!("Template not found: {template_id}")))?;
        template.placeholders = placeholders;
        Ok(())
    }
}

/// One JSON file per template under a data directory.
///
/// Writes go whole-file; a concurrent writer wins or loses wholesale, which
/// matches the last-write-wins contract of the gateway.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SelloError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, template_id: &str) -> Result<PathBuf, SelloError> {
        // Template ids come from generate_template_id, but stored data is
        // addressed by caller-supplied strings; refuse path traversal.
        if template_id.is_empty()
            || template_id
                .chars()
                .any(|c| !c.is_ascii_alphanumeric() && c != '-' && c != '_')
        {
            return Err(SelloError::Persistence(format!(
                "Invalid template id: {template_id:?}"
            )));
        }
        Ok(self.dir.join(format!("{template_id}.json")))
    }

    fn read(&self, template_id: &str) -> Result<Template, SelloError> {
        let path = self.path_for(template_id)?;
        let data = std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SelloError::Template(format!("Template not found: {template_id}"))
            } else {
                SelloError::Io(e)
            }
        })?;
        serde_json::from_slice(&data)
            .map_err(|e| SelloError::Persistence(format!("Corrupt template {template_id}: {e}")))
    }

    fn write(&self, template: &Template) -> Result<(), SelloError> {
        let path = self.path_for(&template.template_id)?;
        let data = serde_json::to_vec_pretty(template)
            .map_err(|e| SelloError::Persistence(format!("Serialize failed: {e}")))?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

#[async_trait]
impl TemplateStore for JsonFileStore {
    async fn put_template(&self, template: Template) -> Result<(), SelloError> {
        self.write(&template)
    }

    async fn get_template(&self, template_id: &str) -> Result<Template, SelloError> {
        self.read(template_id)
    }

    async fn get_placeholders(
        &self,
        template_id: &str,
    ) -> Result<Vec<PlaceholderRecord>, SelloError> {
        Ok(self.read(template_id)?.placeholders)
    }

    async fn set_placeholders(
        &self,
        template_id: &str,
        placeholders: Vec<PlaceholderRecord>,
    ) -> Result<(), SelloError> {
        let mut template = self.read(template_id)?;
        template.placeholders = placeholders;
        self.write(&template)
    }
}
