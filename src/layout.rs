//! # Alignment-Aware Layout Resolver
//!
//! The deterministic core: given a bounding box, an alignment pair, and the
//! measured extent of a piece of text, compute the origin where the text
//! must be drawn. Pure functions only — identical inputs always produce
//! identical integer output, so rendered certificates are byte-reproducible
//! for identical input data.

use serde::{Deserialize, Serialize};

use crate::geometry::{SourcePoint, SourceRect};
use crate::placeholder::{TextAlign, VerticalAlign};

/// Measured extent of a piece of text at a given font size, in source-space
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextExtent {
    pub width: i32,
    pub height: i32,
}

impl TextExtent {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Resolve the draw origin for text of extent `extent` inside `rect`.
///
/// No clamping is applied when the text is wider or taller than the box:
/// the algebraic result is returned, allowing intentional overflow past the
/// box edges. Callers that must avoid visual overflow do so upstream by
/// reducing the font size, not by distorting the alignment.
pub fn resolve_origin(
    rect: SourceRect,
    text_align: TextAlign,
    vertical_align: VerticalAlign,
    extent: TextExtent,
) -> SourcePoint {
    let x = match text_align {
        TextAlign::Left => rect.x1,
        TextAlign::Center => rect.x1 + (rect.width() - extent.width) / 2,
        TextAlign::Right => rect.x2 - extent.width,
    };
    let y = match vertical_align {
        VerticalAlign::Top => rect.y1,
        VerticalAlign::Center => rect.y1 + (rect.height() - extent.height) / 2,
        VerticalAlign::Bottom => rect.y2 - extent.height,
    };
    SourcePoint::new(x, y)
}
