//! Core error types for pomobar-core.
//!
//! The timer engine itself never fails; these errors come from the settings
//! store and the files behind it.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomobar-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors for event/snapshot output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendering settings as TOML for display
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Key is not one of the known settings
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value outside the allowed range for the key
    #[error("Value {value} for '{key}' is out of range [{min}, {max}]")]
    OutOfRange {
        key: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Value could not be parsed as an integer
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be prepared
    #[error("Configuration directory unavailable: {0}")]
    DataDir(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
