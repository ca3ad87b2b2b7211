//! Error types for the labor engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure an operation can surface to its caller.

use thiserror::Error;

/// The main error type for the labor engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently from the store up to the HTTP layer.
///
/// # Example
///
/// ```
/// use labor_engine::error::EngineError;
///
/// let error = EngineError::NotFound {
///     entity: "invoice",
///     id: 42,
/// };
/// assert_eq!(error.to_string(), "invoice 42 not found");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller's role does not permit the requested action.
    #[error("Role '{role}' is not allowed to {action}")]
    Forbidden {
        /// The caller's role.
        role: String,
        /// The action that was refused.
        action: String,
    },

    /// A referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// The kind of record (e.g. "worker", "payroll period").
        entity: &'static str,
        /// The identifier that was looked up.
        id: u64,
    },

    /// The record exists but is not in a state that allows the operation.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// A description of the conflicting state.
        message: String,
    },

    /// Input was rejected before anything was persisted.
    #[error("Invalid value for '{field}': {message}")]
    ValidationError {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The storage backend failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the backend failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::ValidationError`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`EngineError::InvalidState`].
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
