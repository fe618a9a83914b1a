//! Custom error types for the wedding planner
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every error can be turned into a
//! user-facing [`Notice`] with [`PlannerError::notice`].

use thiserror::Error;

use crate::models::Notice;

/// Message shown when a command runs before the store or user is ready
pub const NOT_READY_MESSAGE: &str = "Database atau ID pengguna tidak siap.";

/// The main error type for wedding planner operations
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Backend configuration is missing or unusable (fatal)
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Form validation errors; the payload is already localized
    #[error("Validation error: {0}")]
    Validation(String),

    /// The store handle or the signed-in user is not established yet
    #[error("Not ready: {}", NOT_READY_MESSAGE)]
    NotReady,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A remote store operation was rejected
    #[error("{context}: {message}")]
    Remote { context: String, message: String },

    /// Storage errors in the local store adapter
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl PlannerError {
    /// Create a "not found" error for budget items
    pub fn budget_item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget item",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for to-do items
    pub fn todo_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "To-do item",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for vendors
    pub fn vendor_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Vendor",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a raw store document
    pub fn document_not_found(path: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Document",
            identifier: path.into(),
        }
    }

    /// Wrap a failure with the localized action it interrupted,
    /// e.g. `Gagal menambahkan vendor`
    pub fn remote(context: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Remote {
            context: context.into(),
            message: err.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error should halt the application
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Initialization(_))
    }

    /// Convert the error into the notice shown to the user
    pub fn notice(&self) -> Notice {
        match self {
            Self::Validation(message) => Notice::warning(message.clone()),
            Self::NotReady => Notice::warning(NOT_READY_MESSAGE),
            other => Notice::error(other.to_string()),
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for wedding planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
