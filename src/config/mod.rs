//! Configuration management
//!
//! Handles loading server connection profiles.

pub mod servers;

pub use servers::{Engine, ServerConfig, default_config_path, load_servers};
