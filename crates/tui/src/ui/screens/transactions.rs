use chrono_tz::Tz;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use api_types::transaction::{Transaction, TransactionType};

use crate::{
    client::{TransactionFilters, format_currency, format_date},
    ui::{
        components::{
            money,
            popup::{self, FormRow},
        },
        theme::Theme,
    },
    views::{
        ViewStatus,
        transactions::{FilterEditor, FilterField, TransactionField, TransactionForm, TransactionsView},
    },
};

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    view: &TransactionsView,
    timezone: Tz,
    theme: &Theme,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    render_header(frame, layout[0], &view.filters, theme);
    popup::render_status(frame, layout[1], &view.status, theme);
    if view.status == ViewStatus::Ready {
        render_list(frame, layout[2], view, timezone, theme);
    }

    if let Some(form) = &view.form {
        let title = if view.editing.is_some() {
            "Edit Transaction"
        } else {
            "Add Transaction"
        };
        render_form(frame, area, title, form, theme);
    }
    if let Some(editor) = &view.filter_editor {
        render_filter_editor(frame, area, editor, theme);
    }
    if let Some(tx) = &view.pending_delete {
        let message = format!(
            "Delete {} {}?",
            tx.category,
            format_currency(tx.amount)
        );
        popup::render_confirm(frame, area, &message, theme);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, filters: &TransactionFilters, theme: &Theme) {
    let or_any = |value: &str| {
        if value.is_empty() {
            "any".to_string()
        } else {
            value.to_string()
        }
    };

    let line = Line::from(vec![
        Span::styled("From", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", or_any(&filters.start_date))),
        Span::styled("To", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", or_any(&filters.end_date))),
        Span::styled("Type", Style::default().fg(theme.dim)),
        Span::raw(format!(
            ": {}   ",
            filters.kind.map(TransactionType::as_str).unwrap_or("any")
        )),
        Span::styled("Category", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", or_any(&filters.category))),
        Span::styled("Source", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", or_any(&filters.source))),
    ]);

    let block = Block::default().borders(Borders::ALL).title("Transactions");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_list(
    frame: &mut Frame<'_>,
    area: Rect,
    view: &TransactionsView,
    timezone: Tz,
    theme: &Theme,
) {
    if view.items.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No transactions found",
            Style::default().fg(theme.dim),
        ))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let items = view
        .items
        .iter()
        .map(|tx| ListItem::new(transaction_line(tx, timezone, theme)))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(view.selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn transaction_line(tx: &Transaction, timezone: Tz, theme: &Theme) -> Line<'static> {
    let color = match tx.kind {
        TransactionType::Income => theme.positive,
        TransactionType::Expense => theme.negative,
    };
    let sign = match tx.kind {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };

    Line::from(vec![
        Span::styled(
            format!("{:<20}", format_date(&tx.created_at, &timezone)),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(format!("{:<8}", tx.kind.as_str()), Style::default().fg(color)),
        Span::styled(format!("{:<16}", tx.category), Style::default().fg(theme.text)),
        Span::styled(sign, Style::default().fg(color)),
        money::amount(tx.amount, color),
        Span::styled(
            format!("  {}", tx.description),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(format!("  [{}]", tx.source), Style::default().fg(theme.dim)),
    ])
}

fn render_form(frame: &mut Frame<'_>, area: Rect, title: &str, form: &TransactionForm, theme: &Theme) {
    let rows = [
        FormRow::new(
            "Amount",
            form.amount.as_str(),
            form.focus == TransactionField::Amount,
        ),
        FormRow::new(
            "Type",
            format!("{} (space)", form.kind.as_str()),
            form.focus == TransactionField::Type,
        ),
        FormRow::new(
            "Category",
            form.category.as_str(),
            form.focus == TransactionField::Category,
        ),
        FormRow::new(
            "Description",
            form.description.as_str(),
            form.focus == TransactionField::Description,
        ),
    ];
    popup::render_form(frame, area, title, &rows, form.error.as_deref(), theme);
}

fn render_filter_editor(frame: &mut Frame<'_>, area: Rect, editor: &FilterEditor, theme: &Theme) {
    let draft = &editor.draft;
    let rows = [
        FormRow::new(
            "From",
            draft.start_date.as_str(),
            editor.focus == FilterField::StartDate,
        ),
        FormRow::new(
            "To",
            draft.end_date.as_str(),
            editor.focus == FilterField::EndDate,
        ),
        FormRow::new(
            "Type",
            format!(
                "{} (space)",
                draft.kind.map(TransactionType::as_str).unwrap_or("any")
            ),
            editor.focus == FilterField::Type,
        ),
        FormRow::new(
            "Category",
            draft.category.as_str(),
            editor.focus == FilterField::Category,
        ),
        FormRow::new(
            "Source",
            draft.source.as_str(),
            editor.focus == FilterField::Source,
        ),
    ];
    popup::render_form(frame, area, "Filters", &rows, None, theme);
}
