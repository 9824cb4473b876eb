use api_types::budget::{Budget, BudgetInput, PeriodInput};
use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

use crate::client::{Client, DateRange, Session};

use super::{UsageLevel, ViewStatus, clamp_index, next_index, parse_amount, require};

/// Local midnight of the first and of the last day of `month`, in UTC.
pub fn month_range(month: NaiveDate, tz: Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = month.with_day(1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((local_midnight(first, tz)?, local_midnight(last, tz)?))
}

fn local_midnight(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// ISO-8601 in UTC with milliseconds, e.g. `2026-09-30T17:00:00.000Z`.
pub fn iso_millis(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses the `YYYY-MM` month selector.
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    let (year, month) = value.trim().split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

pub fn month_label(month: NaiveDate) -> String {
    format!("{:04}-{:02}", month.year(), month.month())
}

/// Share of the limit already spent, for the progress bar.
pub fn spent_percentage(budget: &Budget) -> f64 {
    let spent = budget.spent.unwrap_or(0.0);
    if budget.amount > 0.0 {
        spent / budget.amount * 100.0
    } else if spent > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

pub fn usage_level(budget: &Budget) -> UsageLevel {
    UsageLevel::from_percentage(spent_percentage(budget))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetField {
    Category,
    Amount,
}

#[derive(Debug, Clone)]
pub struct BudgetForm {
    pub category: String,
    pub amount: String,
    pub focus: BudgetField,
    pub error: Option<String>,
}

impl BudgetForm {
    pub fn blank() -> Self {
        Self {
            category: String::new(),
            amount: String::new(),
            focus: BudgetField::Category,
            error: None,
        }
    }

    pub fn for_budget(budget: &Budget) -> Self {
        Self {
            category: budget.category.clone(),
            amount: budget.amount.to_string(),
            ..Self::blank()
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            BudgetField::Category => BudgetField::Amount,
            BudgetField::Amount => BudgetField::Category,
        };
    }

    pub fn input(&mut self, ch: char) {
        match self.focus {
            BudgetField::Category => self.category.push(ch),
            BudgetField::Amount => self.amount.push(ch),
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            BudgetField::Category => self.category.pop(),
            BudgetField::Amount => self.amount.pop(),
        };
    }
}

#[derive(Debug)]
pub struct BudgetView {
    pub status: ViewStatus,
    pub items: Vec<Budget>,
    pub selected: usize,
    /// First day of the selected month.
    pub month: NaiveDate,
    pub month_input: Option<String>,
    pub form: Option<BudgetForm>,
    pub editing: Option<Budget>,
    pub pending_delete: Option<Budget>,
    tz: Tz,
}

impl BudgetView {
    pub fn new(today: NaiveDate, tz: Tz) -> Self {
        Self {
            status: ViewStatus::Loading,
            items: Vec::new(),
            selected: 0,
            month: today.with_day(1).unwrap_or(today),
            month_input: None,
            form: None,
            editing: None,
            pending_delete: None,
            tz,
        }
    }

    pub fn period(&self) -> Option<DateRange> {
        let (start, end) = month_range(self.month, self.tz)?;
        Some(DateRange {
            start: iso_millis(&start),
            end: iso_millis(&end),
        })
    }

    pub async fn fetch(&mut self, client: &Client, session: &Session) {
        self.status = ViewStatus::Loading;
        let Some(range) = self.period() else {
            self.status = ViewStatus::Error(format!(
                "Invalid month {}",
                month_label(self.month)
            ));
            return;
        };
        match client.budgets(session, &range).await {
            Ok(items) => {
                self.selected = clamp_index(self.selected, items.len());
                self.items = items;
                self.status = ViewStatus::Ready;
            }
            Err(err) => self.status = ViewStatus::failed(&err),
        }
    }

    pub fn selected_budget(&self) -> Option<&Budget> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        self.selected = next_index(self.selected, self.items.len());
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the month selector; callers re-fetch afterwards.
    pub fn shift_month(&mut self, forward: bool) {
        let shifted = if forward {
            self.month.checked_add_months(Months::new(1))
        } else {
            self.month.checked_sub_months(Months::new(1))
        };
        if let Some(month) = shifted {
            self.month = month;
        }
    }

    pub fn open_month_input(&mut self) {
        self.month_input = Some(month_label(self.month));
    }

    /// Returns `true` when the typed month was valid and applied.
    pub fn apply_month_input(&mut self) -> bool {
        let Some(input) = self.month_input.take() else {
            return false;
        };
        match parse_month(&input) {
            Some(month) => {
                self.month = month;
                true
            }
            None => {
                self.status = ViewStatus::Error(format!("Invalid month: {input}"));
                false
            }
        }
    }

    pub fn open_create(&mut self) {
        self.editing = None;
        self.form = Some(BudgetForm::blank());
    }

    pub fn open_edit(&mut self) {
        if let Some(budget) = self.selected_budget().cloned() {
            self.form = Some(BudgetForm::for_budget(&budget));
            self.editing = Some(budget);
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.editing = None;
    }

    /// The period always covers the currently selected month. A rejected
    /// request leaves the form open with the server message.
    pub async fn submit(&mut self, client: &Client, session: &Session) {
        let period = self.period();
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let input = match build_input(form, period) {
            Ok(input) => input,
            Err(message) => {
                form.error = Some(message);
                return;
            }
        };
        form.error = None;

        let result = match &self.editing {
            Some(budget) => client.update_budget(session, &budget.id, &input).await,
            None => client.create_budget(session, &input).await,
        };

        match result {
            Ok(()) => {
                self.fetch(client, session).await;
                self.close_form();
            }
            Err(err) => {
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(err.to_string());
                }
            }
        }
    }

    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_budget().cloned();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self, client: &Client, session: &Session) {
        let Some(budget) = self.pending_delete.take() else {
            return;
        };
        match client.delete_budget(session, &budget.id).await {
            Ok(()) => self.fetch(client, session).await,
            Err(err) => self.status = ViewStatus::failed(&err),
        }
    }
}

fn build_input(form: &BudgetForm, period: Option<DateRange>) -> Result<BudgetInput, String> {
    let category = require("Category", &form.category)?;
    let amount = parse_amount(&form.amount)?;
    let period = period.ok_or_else(|| "Invalid month".to_string())?;
    Ok(BudgetInput {
        category,
        amount,
        period: PeriodInput {
            start: period.start,
            end: period.end,
        },
    })
}

#[cfg(test)]
mod tests {
    use api_types::budget::Period;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_range_uses_local_midnights() {
        let (start, end) = month_range(date(2026, 10, 17), chrono_tz::Asia::Jakarta).unwrap();
        assert_eq!(iso_millis(&start), "2026-09-30T17:00:00.000Z");
        assert_eq!(iso_millis(&end), "2026-10-30T17:00:00.000Z");
    }

    #[test]
    fn month_range_handles_february_and_december() {
        let (start, end) = month_range(date(2028, 2, 1), chrono_tz::UTC).unwrap();
        assert_eq!(iso_millis(&start), "2028-02-01T00:00:00.000Z");
        assert_eq!(iso_millis(&end), "2028-02-29T00:00:00.000Z");

        let (_, end) = month_range(date(2026, 12, 5), chrono_tz::UTC).unwrap();
        assert_eq!(iso_millis(&end), "2026-12-31T00:00:00.000Z");
    }

    #[test]
    fn month_selector_round_trips_its_label() {
        assert_eq!(parse_month("2026-03"), Some(date(2026, 3, 1)));
        assert_eq!(month_label(date(2026, 3, 1)), "2026-03");
        assert_eq!(parse_month("2026-13"), None);
        assert_eq!(parse_month("March"), None);
    }

    #[test]
    fn shifting_crosses_years() {
        let mut view = BudgetView::new(date(2026, 1, 20), chrono_tz::UTC);
        assert_eq!(view.month, date(2026, 1, 1));
        view.shift_month(false);
        assert_eq!(view.month, date(2025, 12, 1));
        view.shift_month(true);
        view.shift_month(true);
        assert_eq!(view.month, date(2026, 2, 1));
    }

    #[test]
    fn invalid_month_input_is_reported() {
        let mut view = BudgetView::new(date(2026, 1, 20), chrono_tz::UTC);
        view.month_input = Some("20xx-01".to_string());
        assert!(!view.apply_month_input());
        assert_eq!(view.month, date(2026, 1, 1));
        assert!(view.status.error().is_some());
    }

    #[test]
    fn spent_share_drives_usage_level() {
        let now = Utc::now();
        let mut budget = Budget {
            id: "b1".to_string(),
            category: "food".to_string(),
            amount: 1000.0,
            period: Period { start: now, end: now },
            spent: Some(850.0),
            remaining: Some(150.0),
        };
        assert_eq!(usage_level(&budget), UsageLevel::Warning);
        budget.spent = Some(1200.0);
        assert_eq!(usage_level(&budget), UsageLevel::Exceeded);
        budget.spent = None;
        assert_eq!(spent_percentage(&budget), 0.0);
        budget.amount = 0.0;
        budget.spent = Some(1.0);
        assert_eq!(usage_level(&budget), UsageLevel::Exceeded);
    }
}
