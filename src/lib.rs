//! dbtui - a keyboard-driven relational database browser for the terminal
//!
//! dbtui presents a database server as a five-level hierarchy — server,
//! database, schema, table, column — navigated entirely by name. Selecting
//! an entry at one level cascades a catalog refresh into the level below,
//! so the visible panes always describe the current selection path.
//!
//! # Features
//!
//! - **Hierarchy panes**: one pane per level, current selection marked
//! - **Select prompts**: type an exact name to move the selection
//! - **Query slots**: seven independent query buffers, one active at a time
//! - **Pluggable engines**: database access behind an adapter trait
//!
//! # Architecture
//!
//! - [`config`]: server catalog loaded from the user's config file
//! - [`db`]: the adapter trait and the PostgreSQL implementation
//! - [`hierarchy`]: the level registry and navigation controller
//! - [`input`] / [`keymap`]: input modes and data-driven keybindings
//! - [`query`]: the seven-slot query buffer manager
//! - [`app`]: session state and event handling
//! - [`display`] / [`ui`]: row rendering and the ratatui frontend
//! - [`error`]: error types and result aliases

pub mod app;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod hierarchy;
pub mod input;
pub mod keymap;
pub mod query;
pub mod ui;

pub use error::{AdapterError, ConfigError, DbtError, Result, StartupError};
