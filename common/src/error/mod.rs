//! Error types for the fund tracker
//!
//! This module provides the error type shared by the storage adapters, the
//! fund service, and the HTTP gateway. Validation failures carry enough
//! structure for the gateway to map them onto client errors.

use std::fmt::Display;
use thiserror::Error;

/// Fund tracker error type
#[derive(Debug, Error)]
pub enum Error {
    /// No fund exists with the given id
    #[error("Fund not found: {0}")]
    FundNotFound(i64),

    /// One or more required fields were absent from a payload
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A field was present but its value has the wrong type or format
    #[error("Invalid '{field}' value: {reason}")]
    InvalidField {
        /// Name of the offending field
        field: String,
        /// Human-readable description of the expected value
        reason: String,
    },

    /// Another fund already uses this name
    #[error("Fund already exists: {0}")]
    DuplicateFund(String),

    /// Generic validation error (malformed request body)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema bootstrap error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build an invalid-field error
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        // Client errors keep their exact message; storage failures become internal.
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::Database(e) => Error::Internal(format!("{}: {}", context, e)),
                Error::Migration(e) => Error::Internal(format!("{}: {}", context, e)),
                other => other,
            }
        })
    }
}
