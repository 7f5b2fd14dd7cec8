//! Error types for envcheck operations.
//!
//! This module defines [`EnvcheckError`], the error type for everything that
//! stops a run before or outside of individual checks, and a [`Result`] type
//! alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `EnvcheckError` for failures that abort the whole run (bad config,
//!   unknown check names, an inconsistent check graph)
//! - A failing check is not an `EnvcheckError`: it is a
//!   [`CheckError`](crate::checks::CheckError) value that ends up in the report
//! - Use `anyhow::Error` (via `EnvcheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for envcheck operations.
#[derive(Debug, Error)]
pub enum EnvcheckError {
    /// A requested check name is not in the registry.
    #[error("I don't know how to check for '{name}'")]
    InvalidCheck { name: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Two checks were registered under the same name.
    #[error("Check '{name}' is registered twice")]
    DuplicateCheck { name: String },

    /// A check refers to another check that was never registered.
    #[error("Check '{check}' depends on unknown check '{reference}'")]
    UnresolvedReference { check: String, reference: String },

    /// Check dependencies form a cycle.
    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    /// A check definition is internally inconsistent.
    #[error("Invalid definition for check '{check}': {message}")]
    InvalidDefinition { check: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for envcheck operations.
pub type Result<T> = std::result::Result<T, EnvcheckError>;
