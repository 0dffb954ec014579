//! UI theme and styling
//!
//! Defines colors, styles, and visual appearance for all panes.

use ratatui::style::{Color, Modifier, Style};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub border_focused: Style,
    pub border_unfocused: Style,

    // Hierarchy panes
    pub pane_row: Style,
    pub pane_marked: Style,

    // Query editor
    pub editor_text: Style,

    // Results table
    pub results_header: Style,
    pub results_row_even: Style,
    pub results_row_odd: Style,

    // Prompt and status bar
    pub prompt: Style,
    pub status_success: Style,
    pub status_error: Style,
    pub status_info: Style,
    pub status_warning: Style,
    pub hint: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border_unfocused: Style::default().fg(Color::DarkGray),

            pane_row: Style::default().fg(Color::Gray),
            pane_marked: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            editor_text: Style::default().fg(Color::White),

            results_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            results_row_even: Style::default().fg(Color::White),
            results_row_odd: Style::default().fg(Color::Gray),

            prompt: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            status_success: Style::default().fg(Color::Green),
            status_error: Style::default().fg(Color::Red),
            status_info: Style::default().fg(Color::Blue),
            status_warning: Style::default().fg(Color::Yellow),
            hint: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Border style based on focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}
