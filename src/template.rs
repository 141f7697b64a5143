//! # Template Records
//!
//! A template is the fixed certificate background plus its placeholder set.
//! The native pixel dimensions are decoded once when the image is first
//! registered and are authoritative from then on — they are never
//! re-derived from a preview, which is what keeps every persisted
//! placeholder resolution-independent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SelloError;
use crate::geometry::DisplayContext;
use crate::placeholder::PlaceholderRecord;

/// A registered certificate template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub template_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Authoritative pixel space for all placeholders. Set once at upload.
    pub native_width: u32,
    pub native_height: u32,
    #[serde(default)]
    pub placeholders: Vec<PlaceholderRecord>,
    pub uploaded_at: DateTime<Utc>,
}

impl Template {
    /// Register a template whose native dimensions are already known.
    pub fn new(name: impl Into<String>, native_width: u32, native_height: u32) -> Self {
        Self {
            template_id: generate_template_id(),
            name: name.into(),
            description: String::new(),
            native_width,
            native_height,
            placeholders: Vec::new(),
            uploaded_at: Utc::now(),
        }
    }

    /// Register a template from image bytes, decoding the intrinsic
    /// dimensions. The bytes themselves are not stored — image storage
    /// belongs to the surrounding upload service.
    pub fn from_image_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, SelloError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| SelloError::Image(format!("Failed to decode template image: {e}")))?;
        Ok(Self::new(name, image.width(), image.height()))
    }

    /// Register a template by fetching its image over HTTP (the original
    /// deployment serves template assets from remote storage) and decoding
    /// the dimensions from the response body.
    pub async fn from_image_url(
        name: impl Into<String>,
        url: &str,
    ) -> Result<Self, SelloError> {
        let response = reqwest::get(url)
            .await
            .map_err(|e| SelloError::Template(format!("Failed to fetch {url}: {e}")))?;
        if !response.status().is_success() {
            return Err(SelloError::Template(format!(
                "Failed to fetch {url}: HTTP {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| SelloError::Template(format!("Failed to read {url}: {e}")))?;
        Self::from_image_bytes(name, &bytes)
    }

    /// Build the display context for a preview of this template laid out at
    /// the given on-screen size.
    pub fn display_context(&self, displayed_width: u32, displayed_height: u32) -> DisplayContext {
        DisplayContext::new(
            displayed_width,
            displayed_height,
            self.native_width,
            self.native_height,
        )
    }
}

/// Template ids are UUID-v4-derived, like certificate numbers in the
/// surrounding system.
pub fn generate_template_id() -> String {
    format!("tpl-{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_image_bytes_decodes_dimensions() {
        // Minimal in-memory PNG so the test needs no fixture file
        let mut png = Vec::new();
        let img = image::RgbImage::from_pixel(120, 80, image::Rgb([255, 255, 255]));
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let template = Template::from_image_bytes("diploma", &png).unwrap();
        assert_eq!(template.native_width, 120);
        assert_eq!(template.native_height, 80);
        assert!(template.template_id.starts_with("tpl-"));
        assert!(template.placeholders.is_empty());
    }

    #[test]
    fn test_from_image_bytes_rejects_garbage() {
        let err = Template::from_image_bytes("bad", &[0u8; 32]).unwrap_err();
        assert!(matches!(err, SelloError::Image(_)));
    }

    #[test]
    fn test_display_context_uses_native_dims() {
        let template = Template::new("diploma", 1200, 800);
        let ctx = template.display_context(600, 400);
        assert_eq!(ctx.native_width, 1200);
        assert_eq!(ctx.native_height, 800);
        assert_eq!(ctx.displayed_width, 600);
    }

    #[test]
    fn test_template_ids_unique() {
        assert_ne!(generate_template_id(), generate_template_id());
    }

    #[test]
    fn test_template_json_round_trip() {
        let template = Template::new("diploma", 1200, 800);
        let json = serde_json::to_string(&template).unwrap();
        let back: Template = serde_json::from_str(&json).unwrap();
        assert_eq!(back, template);
    }
}
