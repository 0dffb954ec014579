//! Panel layout management
//!
//! Splits the terminal into the five hierarchy panes (one column per
//! level), the query editor, the results table, and a one-line prompt and
//! status bar.

use crate::hierarchy::Level;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed screen areas for one frame
pub struct ScreenLayout {
    /// One pane per hierarchy level, indexed by `Level::index`
    pub levels: [Rect; 5],
    pub query: Rect,
    pub results: Rect,
    pub status_bar: Rect,
}

impl ScreenLayout {
    pub fn level(&self, level: Level) -> Rect {
        self.levels[level.index()]
    }
}

/// Calculate the panel layout for the main screen
pub fn calculate_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20); 5])
        .split(rows[0]);

    ScreenLayout {
        levels: [panes[0], panes[1], panes[2], panes[3], panes[4]],
        query: rows[1],
        results: rows[2],
        status_bar: rows[3],
    }
}
