use ratatui::style::Color;

use crate::views::UsageLevel;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    pub fn usage(&self, level: UsageLevel) -> Color {
        match level {
            UsageLevel::Healthy => self.positive,
            UsageLevel::Warning => self.warning,
            UsageLevel::Exceeded => self.negative,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(170, 170, 170),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(70, 80, 90),
            border_focused: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(90, 180, 110),
            negative: Color::Rgb(210, 90, 90),
            warning: Color::Rgb(220, 180, 70),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
