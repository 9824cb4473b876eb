use api_types::{budget::BudgetSummary, report::TransactionSummary};

use crate::client::{Client, Session};

use super::ViewStatus;

#[derive(Debug, Default)]
pub struct DashboardView {
    pub status: ViewStatus,
    pub summary: TransactionSummary,
    pub budgets: Vec<BudgetSummary>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// All-time totals and the budget overview, requested concurrently.
    /// Either failure discards both results.
    pub async fn fetch(&mut self, client: &Client, session: &Session) {
        self.status = ViewStatus::Loading;
        let joined = tokio::try_join!(
            client.transaction_stats(session, None),
            client.budget_overview(session),
        );
        match joined {
            Ok((summary, budgets)) => {
                self.summary = summary;
                self.budgets = budgets;
                self.status = ViewStatus::Ready;
            }
            Err(err) => self.status = ViewStatus::failed(&err),
        }
    }
}
