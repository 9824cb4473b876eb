use ratatui::{style::Style, text::Span};

use crate::{
    client::format_currency,
    ui::theme::Theme,
    views::{UsageLevel, bar_fill},
};

/// Currency span coloured by sign: negative amounts use the negative colour.
#[must_use]
pub fn signed_amount(amount: f64, theme: &Theme) -> Span<'static> {
    let color = if amount < 0.0 {
        theme.negative
    } else {
        theme.positive
    };
    Span::styled(format_currency(amount), Style::default().fg(color))
}

#[must_use]
pub fn amount(amount: f64, color: ratatui::style::Color) -> Span<'static> {
    Span::styled(format_currency(amount), Style::default().fg(color))
}

/// Text progress bar, e.g. `████████░░`. The fill is capped at 100%.
#[must_use]
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((bar_fill(percentage) / 100.0 * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Progress bar coloured by how close spending is to the limit.
#[must_use]
pub fn usage_bar(percentage: f64, level: UsageLevel, width: usize, theme: &Theme) -> Span<'static> {
    Span::styled(
        progress_bar(percentage, width),
        Style::default().fg(theme.usage(level)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_capped_at_full_width() {
        assert_eq!(progress_bar(150.0, 4), "████");
        assert_eq!(progress_bar(50.0, 4), "██░░");
        assert_eq!(progress_bar(0.0, 4), "░░░░");
    }
}
