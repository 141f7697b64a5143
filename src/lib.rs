//! # Sello - Certificate Placeholder Layout Library
//!
//! Sello is the geometry and text-layout core of a certificate-issuing
//! system. An operator draws a bounding box on a scaled preview of a
//! template image; sello converts that box into resolution-independent
//! source-space coordinates, persists it as a named placeholder, and at
//! generation time resolves exactly where each field's text must be drawn
//! given its alignment and measured extent.
//!
//! ## Quick Start
//!
//! ```
//! use sello::{
//!     capture::CaptureSession,
//!     geometry::{DisplayContext, DisplayPoint},
//!     measure::ApproxMeasure,
//!     placeholder::{FieldKey, PlaceholderSet},
//!     plan::{certificate_fields, resolve_plan},
//! };
//!
//! // Preview shown at half the template's native resolution
//! let ctx = DisplayContext::new(600, 400, 1200, 800);
//! let mut placeholders = PlaceholderSet::new();
//!
//! // Operator selects a field and drags a box on the preview
//! let mut session = CaptureSession::new();
//! session.select_field(FieldKey::StudentName);
//! session.pointer_down(DisplayPoint::new(100, 100));
//! session.pointer_move(DisplayPoint::new(300, 150));
//! session.pointer_up(DisplayPoint::new(300, 150), &ctx, &mut placeholders)?;
//!
//! // At generation time, resolve where each field's text goes
//! let fields = certificate_fields("Jane Doe", "Rust 101", "2026-08-27", "CERT-0042");
//! let commands = resolve_plan(&placeholders, &fields, &ApproxMeasure);
//! assert_eq!(commands.len(), 1);
//!
//! # Ok::<(), sello::error::SelloError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`geometry`] | Display/source coordinate spaces and the mapper |
//! | [`capture`] | Pointer-gesture rectangle capture state machine |
//! | [`placeholder`] | Persisted placeholder model and validation |
//! | [`layout`] | Alignment-aware draw-origin resolver |
//! | [`measure`] | Text extent measurement (TTF metrics or estimate) |
//! | [`plan`] | Draw commands for the external rendering engine |
//! | [`template`] | Template records with authoritative native dimensions |
//! | [`store`] | Persistence gateway (in-memory and JSON-file) |
//! | [`server`] | HTTP editing API |
//! | [`error`] | Error types |
//!
//! ## Coordinate-space discipline
//!
//! Display-space and source-space values are distinct types. Everything
//! persisted, transmitted, or handed to a renderer is source space; the
//! only way across is [`geometry::DisplayContext`].

pub mod capture;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod measure;
pub mod placeholder;
pub mod plan;
pub mod server;
pub mod store;
pub mod template;

// Re-exports for convenience
pub use error::SelloError;
pub use geometry::DisplayContext;
pub use placeholder::{FieldKey, Placeholder, PlaceholderSet};
