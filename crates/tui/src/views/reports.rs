use api_types::{
    report::{CategorySummary, MonthlyData, TransactionSummary},
    transaction::TransactionType,
};
use chrono::{Datelike, Months, NaiveDate};

use crate::client::{Client, DateRange, Session};

use super::ViewStatus;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Month,
    Quarter,
    Year,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 3] = [Self::Month, Self::Quarter, Self::Year];

    pub fn label(self) -> &'static str {
        match self {
            Self::Month => "Month",
            Self::Quarter => "Quarter",
            Self::Year => "Year",
        }
    }

    /// First and last calendar day of the period containing `today`.
    pub fn range(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let (start, months) = match self {
            Self::Month => (today.with_day(1)?, 1),
            Self::Quarter => {
                let first_month = today.month0() / 3 * 3 + 1;
                (NaiveDate::from_ymd_opt(today.year(), first_month, 1)?, 3)
            }
            Self::Year => (NaiveDate::from_ymd_opt(today.year(), 1, 1)?, 12),
        };
        let end = start.checked_add_months(Months::new(months))?.pred_opt()?;
        Some((start, end))
    }
}

/// Typed start/end dates, validated on apply.
#[derive(Debug, Clone)]
pub struct RangeEditor {
    pub start: String,
    pub end: String,
    pub editing_end: bool,
    pub error: Option<String>,
}

impl RangeEditor {
    pub fn next_field(&mut self) {
        self.editing_end = !self.editing_end;
    }

    pub fn input(&mut self, ch: char) {
        self.active_mut().push(ch);
    }

    pub fn backspace(&mut self) {
        self.active_mut().pop();
    }

    fn active_mut(&mut self) -> &mut String {
        if self.editing_end {
            &mut self.end
        } else {
            &mut self.start
        }
    }
}

#[derive(Debug)]
pub struct ReportsView {
    pub status: ViewStatus,
    pub period: ReportPeriod,
    pub range: DateRange,
    pub range_editor: Option<RangeEditor>,
    pub summary: TransactionSummary,
    pub top_expenses: Vec<CategorySummary>,
    pub monthly: Vec<MonthlyData>,
}

impl ReportsView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            status: ViewStatus::Loading,
            period: ReportPeriod::Month,
            range: period_range(ReportPeriod::Month, today),
            range_editor: None,
            summary: TransactionSummary::default(),
            top_expenses: Vec::new(),
            monthly: Vec::new(),
        }
    }

    /// Summary, expense categories and monthly series, fetched together.
    pub async fn fetch(&mut self, client: &Client, session: &Session) {
        self.status = ViewStatus::Loading;
        let range = &self.range;
        let joined = tokio::try_join!(
            client.transaction_stats(session, Some(range)),
            client.category_totals(session, TransactionType::Expense, range),
            client.monthly_totals(session, range),
        );
        match joined {
            Ok((summary, top_expenses, monthly)) => {
                self.summary = summary;
                self.top_expenses = top_expenses;
                self.monthly = monthly;
                self.status = ViewStatus::Ready;
            }
            Err(err) => self.status = ViewStatus::failed(&err),
        }
    }

    /// Switches preset; callers re-fetch afterwards.
    pub fn set_period(&mut self, period: ReportPeriod, today: NaiveDate) {
        self.period = period;
        self.range = period_range(period, today);
    }

    pub fn cycle_period(&mut self, today: NaiveDate) {
        let next = match self.period {
            ReportPeriod::Month => ReportPeriod::Quarter,
            ReportPeriod::Quarter => ReportPeriod::Year,
            ReportPeriod::Year => ReportPeriod::Month,
        };
        self.set_period(next, today);
    }

    pub fn open_range_editor(&mut self) {
        self.range_editor = Some(RangeEditor {
            start: self.range.start.clone(),
            end: self.range.end.clone(),
            editing_end: false,
            error: None,
        });
    }

    pub fn cancel_range_editor(&mut self) {
        self.range_editor = None;
    }

    /// Returns `true` when both dates parsed and the range changed.
    pub fn apply_range_editor(&mut self) -> bool {
        let Some(editor) = self.range_editor.as_mut() else {
            return false;
        };
        let start = NaiveDate::parse_from_str(editor.start.trim(), DATE_FORMAT);
        let end = NaiveDate::parse_from_str(editor.end.trim(), DATE_FORMAT);
        match (start, end) {
            (Ok(start), Ok(end)) => {
                self.range = DateRange {
                    start: start.format(DATE_FORMAT).to_string(),
                    end: end.format(DATE_FORMAT).to_string(),
                };
                self.range_editor = None;
                true
            }
            _ => {
                editor.error = Some("Dates must be YYYY-MM-DD".to_string());
                false
            }
        }
    }
}

fn period_range(period: ReportPeriod, today: NaiveDate) -> DateRange {
    let (start, end) = period.range(today).unwrap_or((today, today));
    DateRange {
        start: start.format(DATE_FORMAT).to_string(),
        end: end.format(DATE_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn presets_cover_calendar_periods() {
        let today = date(2026, 8, 17);
        assert_eq!(
            ReportPeriod::Month.range(today),
            Some((date(2026, 8, 1), date(2026, 8, 31)))
        );
        assert_eq!(
            ReportPeriod::Quarter.range(today),
            Some((date(2026, 7, 1), date(2026, 9, 30)))
        );
        assert_eq!(
            ReportPeriod::Year.range(today),
            Some((date(2026, 1, 1), date(2026, 12, 31)))
        );
    }

    #[test]
    fn first_and_last_quarters() {
        assert_eq!(
            ReportPeriod::Quarter.range(date(2026, 2, 28)),
            Some((date(2026, 1, 1), date(2026, 3, 31)))
        );
        assert_eq!(
            ReportPeriod::Quarter.range(date(2026, 12, 31)),
            Some((date(2026, 10, 1), date(2026, 12, 31)))
        );
    }

    #[test]
    fn new_view_starts_on_the_current_month() {
        let view = ReportsView::new(date(2026, 10, 17));
        assert_eq!(view.period, ReportPeriod::Month);
        assert_eq!(view.range.start, "2026-10-01");
        assert_eq!(view.range.end, "2026-10-31");
    }

    #[test]
    fn cycling_periods_updates_the_range() {
        let today = date(2026, 10, 17);
        let mut view = ReportsView::new(today);
        view.cycle_period(today);
        assert_eq!(view.period, ReportPeriod::Quarter);
        assert_eq!(view.range.start, "2026-10-01");
        assert_eq!(view.range.end, "2026-12-31");
        view.cycle_period(today);
        assert_eq!(view.range.start, "2026-01-01");
    }

    #[test]
    fn range_editor_validates_dates() {
        let mut view = ReportsView::new(date(2026, 10, 17));
        view.open_range_editor();
        if let Some(editor) = view.range_editor.as_mut() {
            editor.start = "2026-02-30".to_string();
        }
        assert!(!view.apply_range_editor());
        assert!(view.range_editor.as_ref().and_then(|e| e.error.as_ref()).is_some());

        if let Some(editor) = view.range_editor.as_mut() {
            editor.start = "2026-02-01".to_string();
        }
        assert!(view.apply_range_editor());
        assert_eq!(view.range.start, "2026-02-01");
        assert!(view.range_editor.is_none());
    }
}
