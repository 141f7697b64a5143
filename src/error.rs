//! # Error Types
//!
//! This module defines error types used throughout the sello library.

use thiserror::Error;

/// Main error type for sello operations
#[derive(Debug, Error)]
pub enum SelloError {
    /// A placeholder failed validation on upsert; prior state is untouched
    #[error("Invalid placeholder: {0}")]
    InvalidPlaceholder(String),

    /// A field key outside the closed enumeration
    #[error("Unknown field key: {0}")]
    UnknownFieldKey(String),

    /// Template lookup or registration error
    #[error("Template error: {0}")]
    Template(String),

    /// Persistence gateway error (surfaced as-is, no retry)
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Font loading or parsing error
    #[error("Font error: {0}")]
    Font(String),

    /// Image decoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
