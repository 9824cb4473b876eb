use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    client::{format_currency, format_percentage},
    ui::{
        components::{
            card::{Card, StatCard},
            money,
            popup::{self, FormRow},
        },
        theme::Theme,
    },
    views::{
        ViewStatus,
        reports::{ReportPeriod, ReportsView},
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, view: &ReportsView, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_period_bar(frame, layout[0], view, theme);
    popup::render_status(frame, layout[1], &view.status, theme);

    if view.status == ViewStatus::Ready {
        render_summary(frame, layout[2], view, theme);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(layout[3]);
        render_top_expenses(frame, columns[0], view, theme);
        render_monthly(frame, columns[1], view, theme);
    }

    if let Some(editor) = &view.range_editor {
        let rows = [
            FormRow::new("Start", editor.start.as_str(), !editor.editing_end),
            FormRow::new("End", editor.end.as_str(), editor.editing_end),
        ];
        popup::render_form(
            frame,
            area,
            "Custom range (YYYY-MM-DD)",
            &rows,
            editor.error.as_deref(),
            theme,
        );
    }
}

fn render_period_bar(frame: &mut Frame<'_>, area: Rect, view: &ReportsView, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    for period in ReportPeriod::ALL {
        let style = if period == view.period {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_muted)
        };
        spans.push(Span::styled(format!("[{}]", period.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!("  {} → {}", view.range.start, view.range.end),
        Style::default().fg(theme.dim),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, view: &ReportsView, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let summary = &view.summary;
    StatCard::new("Income", format_currency(summary.income), theme)
        .value_style(Style::default().fg(theme.positive))
        .render(frame, columns[0]);
    StatCard::new("Expense", format_currency(summary.expense), theme)
        .value_style(Style::default().fg(theme.negative))
        .render(frame, columns[1]);
    StatCard::new("Net", format_currency(summary.balance), theme)
        .value_style(Style::default().fg(if summary.balance < 0.0 {
            theme.negative
        } else {
            theme.positive
        }))
        .render(frame, columns[2]);
}

fn render_top_expenses(frame: &mut Frame<'_>, area: Rect, view: &ReportsView, theme: &Theme) {
    let lines: Vec<Line<'_>> = if view.top_expenses.is_empty() {
        vec![Line::from(Span::styled(
            "No expenses in this range",
            Style::default().fg(theme.dim),
        ))]
    } else {
        view.top_expenses
            .iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(format!("{:<14}", row.category), Style::default().fg(theme.text)),
                    Span::styled(
                        money::progress_bar(row.percentage, 12),
                        Style::default().fg(theme.negative),
                    ),
                    Span::styled(
                        format!(" {:>6} ", format_percentage(row.percentage)),
                        Style::default().fg(theme.text_muted),
                    ),
                    Span::styled(format_currency(row.total), Style::default().fg(theme.text)),
                ])
            })
            .collect()
    };

    Card::new("Top Expenses", theme).render_with(frame, area, Paragraph::new(lines));
}

fn render_monthly(frame: &mut Frame<'_>, area: Rect, view: &ReportsView, theme: &Theme) {
    let mut lines = vec![Line::from(Span::styled(
        format!("{:<9}{:>18}{:>18}{:>18}", "Month", "Income", "Expense", "Balance"),
        Style::default().fg(theme.dim),
    ))];

    for row in &view.monthly {
        let balance_color = if row.balance < 0.0 {
            theme.negative
        } else {
            theme.positive
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<9}", row.month), Style::default().fg(theme.text)),
            Span::styled(
                format!("{:>18}", format_currency(row.income)),
                Style::default().fg(theme.positive),
            ),
            Span::styled(
                format!("{:>18}", format_currency(row.expense)),
                Style::default().fg(theme.negative),
            ),
            Span::styled(
                format!("{:>18}", format_currency(row.balance)),
                Style::default().fg(balance_color),
            ),
        ]));
    }

    Card::new("Monthly Trend", theme).render_with(frame, area, Paragraph::new(lines));
}
