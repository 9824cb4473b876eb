//! Per-route screen state.
//!
//! Each view owns its data and a [`ViewStatus`]; it talks to the API only
//! through [`Client`](crate::client::Client) and re-fetches after every
//! mutation.

pub mod budget;
pub mod dashboard;
pub mod login;
pub mod reports;
pub mod transactions;

use crate::client::ClientError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewStatus {
    #[default]
    Loading,
    Ready,
    Error(String),
}

impl ViewStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn failed(err: &ClientError) -> Self {
        Self::Error(err.to_string())
    }
}

/// How close a spending figure is to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Healthy,
    Warning,
    Exceeded,
}

impl UsageLevel {
    /// Above 100% is exceeded, above 80% is a warning.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 100.0 {
            Self::Exceeded
        } else if percentage > 80.0 {
            Self::Warning
        } else {
            Self::Healthy
        }
    }
}

/// Bar fill for a percentage, capped to `0..=100`.
pub fn bar_fill(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}

pub(crate) fn require(label: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{label} is required"))
    } else {
        Ok(trimmed.to_string())
    }
}

pub(crate) fn parse_amount(value: &str) -> Result<f64, String> {
    let raw = require("Amount", value)?;
    raw.parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| "Amount must be a number".to_string())
}

pub(crate) fn next_index(selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (selected + 1).min(len - 1)
}

pub(crate) fn clamp_index(selected: usize, len: usize) -> usize {
    selected.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_thresholds() {
        assert_eq!(UsageLevel::from_percentage(10.0), UsageLevel::Healthy);
        assert_eq!(UsageLevel::from_percentage(80.0), UsageLevel::Healthy);
        assert_eq!(UsageLevel::from_percentage(80.1), UsageLevel::Warning);
        assert_eq!(UsageLevel::from_percentage(100.0), UsageLevel::Warning);
        assert_eq!(UsageLevel::from_percentage(130.0), UsageLevel::Exceeded);
    }

    #[test]
    fn bar_fill_is_capped() {
        assert_eq!(bar_fill(130.0), 100.0);
        assert_eq!(bar_fill(-5.0), 0.0);
        assert_eq!(bar_fill(f64::NAN), 0.0);
        assert_eq!(bar_fill(42.5), 42.5);
    }

    #[test]
    fn amount_must_be_present_and_numeric() {
        assert_eq!(parse_amount(" 1500 "), Ok(1500.0));
        assert_eq!(parse_amount(""), Err("Amount is required".to_string()));
        assert_eq!(parse_amount("abc"), Err("Amount must be a number".to_string()));
    }

    #[test]
    fn client_errors_become_banner_text() {
        let status = ViewStatus::failed(&ClientError::MissingToken);
        assert_eq!(status.error(), Some("No authentication token found"));
    }
}
