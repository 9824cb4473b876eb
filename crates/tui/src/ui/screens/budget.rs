use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use api_types::budget::Budget;

use crate::{
    client::{format_currency, format_percentage},
    ui::{
        components::{
            money,
            popup::{self, FormRow},
        },
        theme::Theme,
    },
    views::{
        ViewStatus,
        budget::{BudgetField, BudgetView, month_label, spent_percentage, usage_level},
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, view: &BudgetView, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled("Month", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::styled(
            month_label(view.month),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL).title("Budget")),
        layout[0],
    );

    popup::render_status(frame, layout[1], &view.status, theme);
    if view.status == ViewStatus::Ready {
        render_list(frame, layout[2], view, theme);
    }

    if let Some(input) = &view.month_input {
        let rows = [FormRow::new("Month", input.as_str(), true)];
        popup::render_form(frame, area, "Go to month (YYYY-MM)", &rows, None, theme);
    }
    if let Some(form) = &view.form {
        let title = if view.editing.is_some() {
            "Edit Budget"
        } else {
            "Add Budget"
        };
        let rows = [
            FormRow::new(
                "Category",
                form.category.as_str(),
                form.focus == BudgetField::Category,
            ),
            FormRow::new(
                "Amount",
                form.amount.as_str(),
                form.focus == BudgetField::Amount,
            ),
        ];
        popup::render_form(frame, area, title, &rows, form.error.as_deref(), theme);
    }
    if let Some(budget) = &view.pending_delete {
        let message = format!("Delete the {} budget?", budget.category);
        popup::render_confirm(frame, area, &message, theme);
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, view: &BudgetView, theme: &Theme) {
    if view.items.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No budgets for this month",
            Style::default().fg(theme.dim),
        ))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let items = view
        .items
        .iter()
        .map(|budget| ListItem::new(budget_lines(budget, theme)))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(view.selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn budget_lines(budget: &Budget, theme: &Theme) -> Vec<Line<'static>> {
    let level = usage_level(budget);
    let percentage = spent_percentage(budget);
    let shown = if percentage.is_finite() {
        format_percentage(percentage)
    } else {
        "-".to_string()
    };
    // Totals come from the server; a missing figure is shown as zero.
    let remaining = budget.remaining.unwrap_or(0.0);

    vec![
        Line::from(vec![
            Span::styled(
                format!("{:<18}", budget.category),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("limit ", Style::default().fg(theme.dim)),
            Span::styled(format_currency(budget.amount), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::raw("  "),
            money::usage_bar(percentage, level, 24, theme),
            Span::styled(format!(" {shown:>7}"), Style::default().fg(theme.usage(level))),
            Span::styled("  spent ", Style::default().fg(theme.dim)),
            Span::styled(
                format_currency(budget.spent.unwrap_or(0.0)),
                Style::default().fg(theme.text_muted),
            ),
            Span::styled("  remaining ", Style::default().fg(theme.dim)),
            money::signed_amount(remaining, theme),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use api_types::budget::Period;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn budget(spent: Option<f64>, remaining: Option<f64>) -> Budget {
        Budget {
            id: "b1".to_string(),
            category: "food".to_string(),
            amount: 1000.0,
            period: Period {
                start: Utc.with_ymd_and_hms(2026, 9, 30, 17, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2026, 10, 30, 17, 0, 0).unwrap(),
            },
            spent,
            remaining,
        }
    }

    fn rendered(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn missing_remaining_is_shown_as_zero() {
        let text = rendered(&budget_lines(&budget(Some(300.0), None), &Theme::default()));
        assert!(text.contains("spent Rp\u{a0}300"));
        assert!(text.contains("remaining Rp\u{a0}0"));
        assert!(!text.contains("Rp\u{a0}700"));
    }

    #[test]
    fn remaining_is_taken_from_the_server() {
        let text = rendered(&budget_lines(&budget(Some(1200.0), Some(-200.0)), &Theme::default()));
        assert!(text.contains("remaining -Rp\u{a0}200"));
    }
}
