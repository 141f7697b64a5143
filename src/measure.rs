//! # Text Measurement
//!
//! The layout resolver needs the rendered extent of each field's text at
//! its placeholder's font size. Measurement is a capability of the
//! rendering side, so it sits behind the [`TextMeasure`] trait:
//!
//! - [`TtfMeasure`] computes real metrics from a TTF loaded at runtime
//!   (advance widths for the width, ascent minus descent for the height).
//! - [`ApproxMeasure`] is a deterministic per-character estimate for when
//!   no font file is available.
//!
//! Extents are in source-space pixels; one point equals one pixel at the
//! template's native resolution, so no scale factor applies here.

use ab_glyph::{Font, FontArc, ScaleFont};
use std::path::Path;

use crate::error::SelloError;
use crate::layout::TextExtent;

/// Measures text extents at a given font size.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: u32) -> TextExtent;
}

/// Real font metrics via ab_glyph.
#[derive(Debug)]
pub struct TtfMeasure {
    font: FontArc,
}

impl TtfMeasure {
    /// Load a TTF/OTF from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SelloError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SelloError> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| SelloError::Font(format!("Failed to parse font: {e}")))?;
        Ok(Self { font })
    }
}

impl TextMeasure for TtfMeasure {
    fn measure(&self, text: &str, font_size: u32) -> TextExtent {
        let scaled = self.font.as_scaled(font_size as f32);

        let mut width = 0.0f32;
        for ch in text.chars() {
            width += scaled.h_advance(self.font.glyph_id(ch));
        }

        let height = scaled.ascent() - scaled.descent();
        TextExtent::new(width.ceil() as i32, height.ceil() as i32)
    }
}

/// Rough estimate when no font is available: average glyph width of 0.6 em,
/// line height of one em. Deterministic, so layouts stay reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMeasure;

impl TextMeasure for ApproxMeasure {
    fn measure(&self, text: &str, font_size: u32) -> TextExtent {
        let chars = text.chars().count() as i32;
        let em = font_size as i32;
        TextExtent::new(chars * em * 6 / 10, em)
    }
}
