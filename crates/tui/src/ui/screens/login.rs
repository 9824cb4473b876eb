use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    ui::{components::centered_rect, theme::Theme},
    views::login::{LoginField, LoginView},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, view: &LoginView) {
    let theme = Theme::default();

    let card_area = centered_rect(40, 7, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Financial Bot · login ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // email
            Constraint::Length(1),
            Constraint::Length(1), // password
        ])
        .margin(1)
        .split(inner);

    render_input(
        frame,
        rows[0],
        "email",
        &view.email,
        false,
        view.focus == LoginField::Email,
        &theme,
    );
    render_input(
        frame,
        rows[2],
        "password",
        &view.password,
        true,
        view.focus == LoginField::Password,
        &theme,
    );

    if let Some(message) = &view.message {
        let error_area = Rect {
            x: card_area.x,
            y: card_area.y.saturating_add(card_area.height).saturating_add(1),
            width: card_area.width,
            height: 1,
        }
        .intersection(area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let shown = if is_password {
        mask_password(value)
    } else {
        value.to_string()
    };

    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    let line = ratatui::text::Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(theme.dim)),
        Span::styled(format!("{shown}{cursor}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// One bullet per character.
fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_masked_per_character() {
        assert_eq!(mask_password(""), "");
        assert_eq!(mask_password("rahasia"), "•••••••");
    }
}
