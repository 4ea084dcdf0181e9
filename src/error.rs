//! Custom error types for Fiscally Fit
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every failure a command can hit is one of
//! these variants; none of them is fatal to the process.

use thiserror::Error;

/// The main error type for Fiscally Fit operations
#[derive(Error, Debug, Clone)]
pub enum FiscalError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Missing or invalid required fields, caught before any write
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A write that would break a uniqueness rule
    #[error("{entity_type} already exists: {identifier}")]
    Conflict {
        entity_type: &'static str,
        identifier: String,
    },

    /// Receipt extraction failed (network, service or schema)
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FiscalError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
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

    /// Check if this is a uniqueness conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if this is an extraction failure
    pub fn is_extraction(&self) -> bool {
        matches!(self, Self::Extraction(_))
    }
}

impl From<std::io::Error> for FiscalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FiscalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for FiscalError {
    fn from(err: reqwest::Error) -> Self {
        Self::Extraction(err.to_string())
    }
}

/// Result type alias for Fiscally Fit operations
pub type FiscalResult<T> = Result<T, FiscalError>;
