//! # Coordinate Spaces and the Coordinate Mapper
//!
//! Two pixel spaces exist in the editor:
//!
//! - **Display space**: the on-screen, scaled preview of the template image.
//! - **Source space**: the original, full-resolution template asset. This is
//!   the only space that is ever persisted or handed to a renderer.
//!
//! The two spaces are distinct types on purpose. A [`DisplayRect`] cannot be
//! stored or fed to the render plan without going through
//! [`DisplayContext::to_source_rect`], which makes coordinate-space mixups a
//! compile error instead of a certificate with text in the wrong place.
//!
//! Only source-space types derive `Serialize`/`Deserialize` — display-space
//! values must never reach the persistence gateway.

use serde::{Deserialize, Serialize};

/// A point in display space (preview pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPoint {
    pub x: i32,
    pub y: i32,
}

impl DisplayPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A point in source space (native template pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePoint {
    pub x: i32,
    pub y: i32,
}

impl SourcePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in display space.
///
/// Not guaranteed normalized — a drag can go in any direction. Use
/// [`DisplayRect::normalized`] before treating the corners as min/max.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl DisplayRect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle spanning two corner points, in the order they were given.
    pub fn from_corners(a: DisplayPoint, b: DisplayPoint) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Return the same rectangle with `x1 <= x2` and `y1 <= y2`.
    pub fn normalized(self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    pub fn width(self) -> i32 {
        (self.x2 - self.x1).abs()
    }

    pub fn height(self) -> i32 {
        (self.y2 - self.y1).abs()
    }
}

/// An axis-aligned rectangle in source space.
///
/// Persisted placeholders always hold one of these, normalized
/// (`x1 <= x2`, `y1 <= y2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl SourceRect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(self) -> i32 {
        self.y2 - self.y1
    }

    /// A zero-area rectangle indexes no pixels and cannot anchor text.
    pub fn is_degenerate(self) -> bool {
        self.x1 == self.x2 || self.y1 == self.y2
    }
}

/// The linear transform between display space and source space.
///
/// Recomputed every time the preview image finishes loading — window resizes
/// and responsive layout invalidate it, so it is never cached across loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayContext {
    /// Laid-out width of the on-screen preview, in CSS pixels.
    pub displayed_width: u32,
    /// Laid-out height of the on-screen preview, in CSS pixels.
    pub displayed_height: u32,
    /// Intrinsic width of the decoded template asset.
    pub native_width: u32,
    /// Intrinsic height of the decoded template asset.
    pub native_height: u32,
}

impl DisplayContext {
    pub fn new(
        displayed_width: u32,
        displayed_height: u32,
        native_width: u32,
        native_height: u32,
    ) -> Self {
        Self {
            displayed_width,
            displayed_height,
            native_width,
            native_height,
        }
    }

    /// A context with a zero displayed dimension cannot produce scale
    /// factors. This happens transiently while the preview image is still
    /// loading, so the mapper falls back to identity instead of erroring.
    pub fn is_degenerate(&self) -> bool {
        self.displayed_width == 0 || self.displayed_height == 0
    }

    fn scale_x(&self) -> f64 {
        self.native_width as f64 / self.displayed_width as f64
    }

    fn scale_y(&self) -> f64 {
        self.native_height as f64 / self.displayed_height as f64
    }

    /// Map a display-space point to source space, rounded to the nearest
    /// integer pixel (source space indexes real pixels).
    pub fn to_source_point(&self, p: DisplayPoint) -> SourcePoint {
        if self.is_degenerate() {
            eprintln!("sello: degenerate display context, using identity mapping");
            return SourcePoint::new(p.x, p.y);
        }
        SourcePoint::new(
            (p.x as f64 * self.scale_x()).round() as i32,
            (p.y as f64 * self.scale_y()).round() as i32,
        )
    }

    /// Map a display-space rectangle to source space.
    ///
    /// Normalizes before scaling, so scale factors are never applied to a
    /// negative-width box. The result is always normalized.
    pub fn to_source_rect(&self, r: DisplayRect) -> SourceRect {
        let r = r.normalized();
        if self.is_degenerate() {
            eprintln!("sello: degenerate display context, using identity mapping");
            return SourceRect::new(r.x1, r.y1, r.x2, r.y2);
        }
        let (sx, sy) = (self.scale_x(), self.scale_y());
        SourceRect::new(
            (r.x1 as f64 * sx).round() as i32,
            (r.y1 as f64 * sy).round() as i32,
            (r.x2 as f64 * sx).round() as i32,
            (r.y2 as f64 * sy).round() as i32,
        )
    }

    /// Inverse mapping, used to redraw persisted placeholders on a
    /// freshly-loaded preview.
    pub fn to_display_point(&self, p: SourcePoint) -> DisplayPoint {
        if self.is_degenerate() {
            return DisplayPoint::new(p.x, p.y);
        }
        DisplayPoint::new(
            (p.x as f64 / self.scale_x()).round() as i32,
            (p.y as f64 / self.scale_y()).round() as i32,
        )
    }

    /// Inverse rectangle mapping.
    pub fn to_display_rect(&self, r: SourceRect) -> DisplayRect {
        if self.is_degenerate() {
            return DisplayRect::new(r.x1, r.y1, r.x2, r.y2);
        }
        let (sx, sy) = (self.scale_x(), self.scale_y());
        DisplayRect::new(
            (r.x1 as f64 / sx).round() as i32,
            (r.y1 as f64 / sy).round() as i32,
            (r.x2 as f64 / sx).round() as i32,
            (r.y2 as f64 / sy).round() as i32,
        )
    }
}
