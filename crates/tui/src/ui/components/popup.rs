use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    ui::{components::centered_rect, theme::Theme},
    views::ViewStatus,
};

/// One labelled input row of a modal form.
pub struct FormRow<'a> {
    pub label: &'a str,
    pub value: String,
    pub focused: bool,
}

impl<'a> FormRow<'a> {
    pub fn new(label: &'a str, value: impl Into<String>, focused: bool) -> Self {
        Self {
            label,
            value: value.into(),
            focused,
        }
    }
}

/// Modal form drawn over `area`, with an optional inline error.
pub fn render_form(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    rows: &[FormRow<'_>],
    error: Option<&str>,
    theme: &Theme,
) {
    let height = rows.len() as u16 + 5;
    let rect = centered_rect(60, height, area);
    frame.render_widget(Clear, rect);

    let mut lines = Vec::with_capacity(rows.len() + 3);
    for row in rows {
        let cursor = if row.focused { "│" } else { "" };
        let style = if row.focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text_muted)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", row.label), Style::default().fg(theme.dim)),
            Span::styled(format!("{}{cursor}", row.value), style),
        ]));
    }
    lines.push(Line::from(""));
    match error {
        Some(error) => lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme.error),
        ))),
        None => lines.push(Line::from(Span::styled(
            "Tab next  Enter save  Esc cancel",
            Style::default().fg(theme.dim),
        ))),
    }

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

/// Yes/no prompt shown before destructive actions.
pub fn render_confirm(frame: &mut Frame<'_>, area: Rect, message: &str, theme: &Theme) {
    let rect = centered_rect(50, 5, area);
    frame.render_widget(Clear, rect);
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(Span::styled(
            "y confirm  any other key cancel",
            Style::default().fg(theme.dim),
        )),
    ];
    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.warning));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        rect,
    );
}

/// One-line status: spinner text while loading, the error banner on failure.
pub fn render_status(frame: &mut Frame<'_>, area: Rect, status: &ViewStatus, theme: &Theme) {
    let line = match status {
        ViewStatus::Loading => Line::from(Span::styled("Loading…", Style::default().fg(theme.dim))),
        ViewStatus::Error(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(theme.error),
        )),
        ViewStatus::Ready => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}
