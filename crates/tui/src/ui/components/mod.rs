pub mod card;
pub mod money;
pub mod popup;
pub mod tabs;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A rect of `percent_x` by `height` rows centered inside `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x.min(100)) / 2),
            Constraint::Percentage(percent_x.min(100)),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
