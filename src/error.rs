//! Error types for dbtui
//!
//! This module defines the error hierarchy used throughout the application.
//! We use `thiserror` for library-style errors with clear error chains.

use std::io;

/// Main error type for the dbtui application
#[derive(Debug, thiserror::Error)]
pub enum DbtError {
    /// Adapter-related errors (connection, catalog, query)
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Database adapter operation errors.
///
/// All of these are recoverable: a failed refresh, select or execute leaves
/// session state unchanged and surfaces as a status message. No operation is
/// retried automatically; the user re-issues the action.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Failed to establish a connection
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// An operation requires a connection that does not exist yet,
    /// or a parent-level selection that has not been made
    #[error("Not connected: {0}")]
    NotConnected(&'static str),

    /// Query execution failed
    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    /// Catalog discovery (databases/schemas/tables/columns) failed
    #[error("Catalog load failed: {0}")]
    CatalogFailed(String),

    /// The adapter returned a result violating the row-width invariant
    #[error("Malformed result: {0}")]
    MalformedResult(String),

    /// The engine is part of the closed set but has no adapter wired yet
    #[error("No adapter implemented for engine '{0}'")]
    Unsupported(&'static str),
}

/// Configuration loading/parsing errors. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Home directory not found
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// Config file not found or unreadable
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to parse TOML
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Engine type outside the closed set {postgres, mssql, mysql, sqlite}
    #[error("Unknown engine type '{0}'")]
    UnknownEngine(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Why startup failed. The binary maps these to distinct exit codes;
/// core only exposes the reason.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Session initialization failed (config unreadable or malformed)
    #[error("Session init failed: {0}")]
    Config(#[from] ConfigError),

    /// Initial server catalog could not be loaded
    #[error("Initial catalog load failed: {0}")]
    Catalog(String),
}

/// Specialized Result type for dbtui operations
pub type Result<T> = std::result::Result<T, DbtError>;

/// Specialized Result type for adapter operations
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Specialized Result type for config operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
