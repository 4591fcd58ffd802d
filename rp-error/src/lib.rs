//! Unified error handling for Rampage
//!
//! This crate provides the single error type used by the preset store, the ramp
//! conversion layer and the command-line front end.

use std::io;
use std::path::PathBuf;

/// Result type alias using RampageError
pub type Result<T> = std::result::Result<T, RampageError>;

/// Unified error type for all Rampage operations
#[derive(thiserror::Error, Debug)]
pub enum RampageError {
    // ============================================================================
    // I/O and File System Errors
    // ============================================================================
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: io::Error,
    },

    #[error("File too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // ============================================================================
    // Preset Errors
    // ============================================================================
    #[error("Preset name '{name}' already exists (key '{key}')")]
    DuplicateName {
        name: String,
        key: String,
    },

    #[error("Invalid preset name '{name}': {reason}")]
    InvalidName {
        name: String,
        reason: String,
    },

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    // ============================================================================
    // Ramp Errors
    // ============================================================================
    #[error("Parameter '{0}' is not a ramp parameter")]
    NotRampParameter(String),

    #[error("Invalid ramp: {0}")]
    InvalidRamp(String),

    #[error("Unknown ramp basis: {0}")]
    UnknownBasis(String),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Generic(String),
}

impl RampageError {
    /// Create a generic error from a string
    pub fn generic(msg: impl Into<String>) -> Self {
        Self::Generic(msg.into())
    }

    /// Create a duplicate name error
    pub fn duplicate_name(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DuplicateName {
            name: name.into(),
            key: key.into(),
        }
    }

    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid ramp error from a string
    pub fn invalid_ramp(msg: impl Into<String>) -> Self {
        Self::InvalidRamp(msg.into())
    }

    /// True for errors the user can act on (as opposed to I/O or contract failures)
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName { .. } | Self::InvalidName { .. } | Self::PresetNotFound(_)
        )
    }
}

// Allow converting from String to RampageError
impl From<String> for RampageError {
    fn from(s: String) -> Self {
        Self::Generic(s)
    }
}

// Allow converting from &str to RampageError
impl From<&str> for RampageError {
    fn from(s: &str) -> Self {
        Self::Generic(s.to_string())
    }
}
