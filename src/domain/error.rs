//! Domain error types

use thiserror::Error;

/// Error when parsing a Python version descriptor
#[derive(Debug, Clone, Error)]
#[error("Invalid Python version: \"{input}\". Expected a dotted version like 3.10 or 3.10.2")]
pub struct VersionParseError {
    pub input: String,
}

/// Error when parsing a build profile
#[derive(Debug, Clone, Error)]
#[error("Invalid profile: \"{input}\". Valid profiles are: debug, release")]
pub struct ProfileParseError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
