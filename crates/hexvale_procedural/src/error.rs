//! # Generation Error Types
//!
//! All errors that can occur before a board is generated.
//!
//! Generation itself never fails: bounded placement loops that run out of
//! attempts place fewer instances and log it. Only configuration can be wrong.

use thiserror::Error;

/// Errors that can occur while configuring terrain generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    /// A configuration value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {message}")]
    ReadConfig {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        message: String,
    },

    /// The configuration file is not valid TOML for a terrain config.
    #[error("failed to parse config {path}: {message}")]
    ParseConfig {
        /// Path (or `<inline>` for string input).
        path: String,
        /// Parser error.
        message: String,
    },
}

/// Result type for generation setup.
pub type GenResult<T> = Result<T, TerrainError>;
