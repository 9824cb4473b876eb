use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    client::{format_currency, format_percentage},
    ui::{
        components::{
            card::{Card, StatCard},
            money, popup,
        },
        theme::Theme,
    },
    views::{UsageLevel, ViewStatus, dashboard::DashboardView},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, view: &DashboardView, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    popup::render_status(frame, layout[0], &view.status, theme);
    if view.status != ViewStatus::Ready {
        return;
    }

    render_summary(frame, layout[1], view, theme);
    render_budgets(frame, layout[2], view, theme);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, view: &DashboardView, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let summary = &view.summary;
    StatCard::new("Total Income", format_currency(summary.income), theme)
        .value_style(Style::default().fg(theme.positive))
        .render(frame, columns[0]);
    StatCard::new("Total Expenses", format_currency(summary.expense), theme)
        .value_style(Style::default().fg(theme.negative))
        .render(frame, columns[1]);
    let balance_color = if summary.balance < 0.0 {
        theme.negative
    } else {
        theme.text
    };
    StatCard::new("Current Balance", format_currency(summary.balance), theme)
        .value_style(Style::default().fg(balance_color))
        .render(frame, columns[2]);
}

fn render_budgets(frame: &mut Frame<'_>, area: Rect, view: &DashboardView, theme: &Theme) {
    let card = Card::new("Budget Overview", theme);

    let lines: Vec<Line<'_>> = if view.budgets.is_empty() {
        vec![Line::from(Span::styled(
            "No budgets yet",
            Style::default().fg(theme.dim),
        ))]
    } else {
        view.budgets
            .iter()
            .map(|budget| {
                let level = UsageLevel::from_percentage(budget.percentage);
                Line::from(vec![
                    Span::styled(
                        format!("{:<16}", budget.category),
                        Style::default().fg(theme.text),
                    ),
                    money::usage_bar(budget.percentage, level, 20, theme),
                    Span::styled(
                        format!(" {:>7} ", format_percentage(budget.percentage)),
                        Style::default().fg(theme.usage(level)),
                    ),
                    Span::styled(
                        format!(
                            "{} / {}",
                            format_currency(budget.spent),
                            format_currency(budget.budget)
                        ),
                        Style::default().fg(theme.text_muted),
                    ),
                ])
            })
            .collect()
    };

    card.render_with(frame, area, Paragraph::new(lines));
}
