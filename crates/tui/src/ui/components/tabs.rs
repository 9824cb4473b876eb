use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{routes::Route, ui::theme::Theme};

/// Horizontal navigation bar; the active route is bracketed.
pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, active: Route, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];

    for (i, route) in Route::NAVIGATION.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }

        let label = format!("{} {}", i + 1, route.label());
        if *route == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn tab_shortcuts(theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::styled("1-4", Style::default().fg(theme.accent)),
        Span::raw(" nav"),
    ]
}
