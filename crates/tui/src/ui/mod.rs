pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{ActiveView, AppState};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match &state.view {
        ActiveView::Login(view) => screens::login::render(frame, area, view),
        _ => render_shell(frame, area, state),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // info bar
            Constraint::Length(1), // navigation
            Constraint::Min(0),
            Constraint::Length(1), // key hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.view.route(), &theme);

    let content = layout[2];
    match &state.view {
        ActiveView::Dashboard(view) => screens::dashboard::render(frame, content, view, &theme),
        ActiveView::Transactions(view) => {
            screens::transactions::render(frame, content, view, state.timezone, &theme)
        }
        ActiveView::Budget(view) => screens::budget::render(frame, content, view, &theme),
        ActiveView::Reports(view) => screens::reports::render(frame, content, view, &theme),
        ActiveView::Login(_) => {}
    }

    render_bottom_bar(frame, layout[3], &state.view, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(" Financial Bot", Style::default().fg(theme.accent)),
        Span::styled(
            format!("  {}  {}", state.base_url, state.timezone.name()),
            Style::default().fg(theme.dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, view: &ActiveView, theme: &Theme) {
    let keys: &[(&str, &str)] = match view {
        _ if view.is_typing() => &[("tab", "next"), ("enter", "save"), ("esc", "cancel")],
        ActiveView::Transactions(_) => &[
            ("a", "add"),
            ("e", "edit"),
            ("d", "delete"),
            ("f", "filter"),
        ],
        ActiveView::Budget(_) => &[
            ("a", "add"),
            ("e", "edit"),
            ("d", "delete"),
            ("←/→", "month"),
            ("m", "go to month"),
        ],
        ActiveView::Reports(_) => &[("p", "period"), ("f", "custom range")],
        ActiveView::Dashboard(_) | ActiveView::Login(_) => &[],
    };

    let mut spans = vec![Span::raw(" ")];
    if !view.is_typing() {
        spans.extend(components::tabs::tab_shortcuts(theme));
        for (key, label) in keys
            .iter()
            .chain([("r", "refresh"), ("L", "logout"), ("q", "quit")].iter())
        {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
            spans.push(Span::styled(format!(" {label}"), Style::default().fg(theme.dim)));
        }
    } else {
        for (i, (key, label)) in keys.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
            spans.push(Span::styled(format!(" {label}"), Style::default().fg(theme.dim)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
