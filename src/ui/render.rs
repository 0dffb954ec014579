//! Top-level render function
//!
//! Orchestrates rendering of all panes using the layout module. Everything
//! here reads the session; nothing mutates it.

use crate::app::{Session, StatusLevel};
use crate::display::{self, RowRender};
use crate::hierarchy::Level;
use crate::input::InputMode;
use crate::query::SLOT_COUNT;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table};
use unicode_width::UnicodeWidthStr;

/// Render the entire application
pub fn render(frame: &mut Frame, session: &Session, theme: &crate::ui::theme::Theme) {
    let layout = crate::ui::layout::calculate_layout(frame.area());

    for level in Level::ALL {
        render_level_pane(frame, layout.level(level), session, level, theme);
    }
    render_query_pane(frame, layout.query, session, theme);
    render_results(frame, layout.results, session, theme);
    render_status_bar(frame, layout.status_bar, session, theme);
}

/// One hierarchy pane: the level's catalog list with the current selection
/// marked `[*]`, everything else `[ ]`.
fn render_level_pane(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    level: Level,
    theme: &crate::ui::theme::Theme,
) {
    let focused = session.mode == InputMode::Select(level);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", level.title()))
        .border_style(theme.border_style(focused));

    let items: Vec<ListItem> = display::level_rows(&session.navigator, level)
        .into_iter()
        .map(|row| pane_item(row, theme))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn pane_item(row: RowRender, theme: &crate::ui::theme::Theme) -> ListItem<'static> {
    let (mark, style) = if row.marked {
        ("[*] ", theme.pane_marked)
    } else {
        ("[ ] ", theme.pane_row)
    };
    ListItem::new(format!("{}{}", mark, row.label)).style(style)
}

fn render_query_pane(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    theme: &crate::ui::theme::Theme,
) {
    let focused = session.mode == InputMode::Query;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " Query ({}/{}) ",
            session.buffers.active_index() + 1,
            SLOT_COUNT
        ))
        .border_style(theme.border_style(focused));
    let text = Paragraph::new(session.buffers.active_text())
        .style(theme.editor_text)
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(block);
    frame.render_widget(text, area);
}

fn render_results(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    theme: &crate::ui::theme::Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Results ")
        .border_style(theme.border_unfocused);

    let Some(result) = session.last_result.as_ref() else {
        frame.render_widget(block, area);
        return;
    };

    let widths: Vec<Constraint> = column_widths(&result.columns, &result.rows)
        .into_iter()
        .map(|w| Constraint::Length(w))
        .collect();
    let header = Row::new(result.columns.iter().map(String::as_str)).style(theme.results_header);
    let rows = result.rows.iter().enumerate().map(|(i, cells)| {
        let style = if i % 2 == 0 {
            theme.results_row_even
        } else {
            theme.results_row_odd
        };
        Row::new(cells.iter().map(String::as_str)).style(style)
    });
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// Per-column display width: the widest cell (or header) in the column,
/// measured in terminal cells rather than bytes.
fn column_widths(columns: &[String], rows: &[Vec<String>]) -> Vec<u16> {
    let mut widths: Vec<u16> = columns.iter().map(|c| c.width() as u16).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width() as u16);
        }
    }
    widths
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    theme: &crate::ui::theme::Theme,
) {
    let paragraph = match session.mode {
        InputMode::Select(level) => {
            let text = format!("{}{}", level.prompt(), session.line.as_str());
            Paragraph::new(text).style(theme.prompt)
        }
        InputMode::Query => Paragraph::new("-- QUERY -- Ctrl+Enter execute, Ctrl+N next slot, Ctrl+C leave")
            .style(theme.hint),
        InputMode::Normal => {
            if let Some(ref status) = session.status_message {
                let style = match status.level {
                    StatusLevel::Info => theme.status_info,
                    StatusLevel::Success => theme.status_success,
                    StatusLevel::Warning => theme.status_warning,
                    StatusLevel::Error => theme.status_error,
                };
                Paragraph::new(status.message.as_str()).style(style)
            } else {
                Paragraph::new("S/d/s/t/c select, i query, q quit").style(theme.hint)
            }
        }
    };
    frame.render_widget(paragraph, area);
}
