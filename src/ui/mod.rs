//! Terminal UI
//!
//! All rendering logic using ratatui. The UI is a pure function of the
//! session: `render::render` walks the hierarchy panes, the query editor,
//! the results table, and the prompt/status bar every frame.

pub mod layout;
pub mod render;
pub mod theme;
