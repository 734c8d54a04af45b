//! Screen layout for the orc TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed areas for the main screen
pub struct AppLayout {
    pub title_area: Rect,
    pub narrative_area: Rect,
    pub sidebar_area: Rect,
    pub status_area: Rect,
    pub input_area: Rect,
}

impl AppLayout {
    /// Split the terminal into title, narrative + sidebar, status, input.
    pub fn calculate(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(26)])
            .split(rows[1]);

        Self {
            title_area: rows[0],
            narrative_area: columns[0],
            sidebar_area: columns[1],
            status_area: rows[2],
            input_area: rows[3],
        }
    }
}
