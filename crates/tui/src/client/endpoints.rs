use api_types::{
    auth::{AuthToken, Credentials},
    budget::{Budget, BudgetInput, BudgetSummary},
    report::{CategorySummary, MonthlyData, TransactionSummary},
    transaction::{Transaction, TransactionInput, TransactionType},
};
use serde::de::IgnoredAny;

use super::{Client, ClientError, Endpoint, Session};

/// Query filters for `GET /transactions`. Empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilters {
    pub start_date: String,
    pub end_date: String,
    pub kind: Option<TransactionType>,
    pub category: String,
    pub source: String,
}

impl TransactionFilters {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new("/transactions")
            .query_non_empty("startDate", &self.start_date)
            .query_non_empty("endDate", &self.end_date)
            .query_non_empty("type", self.kind.map(TransactionType::as_str).unwrap_or(""))
            .query_non_empty("category", &self.category)
            .query_non_empty("source", &self.source)
    }
}

/// Inclusive `startDate`/`endDate` bounds, already formatted for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    fn apply(&self, endpoint: Endpoint) -> Endpoint {
        endpoint
            .query("startDate", self.start.as_str())
            .query("endDate", self.end.as_str())
    }
}

impl Client {
    pub async fn login(
        &self,
        session: &Session,
        credentials: &Credentials,
    ) -> Result<AuthToken, ClientError> {
        self.post(session, "/auth/login", credentials).await
    }

    pub async fn transactions(
        &self,
        session: &Session,
        filters: &TransactionFilters,
    ) -> Result<Vec<Transaction>, ClientError> {
        self.get(session, filters.endpoint()).await
    }

    pub async fn create_transaction(
        &self,
        session: &Session,
        input: &TransactionInput,
    ) -> Result<(), ClientError> {
        self.post::<_, IgnoredAny>(session, "/transactions", input)
            .await
            .map(drop)
    }

    pub async fn update_transaction(
        &self,
        session: &Session,
        id: &str,
        input: &TransactionInput,
    ) -> Result<(), ClientError> {
        self.put::<_, IgnoredAny>(session, format!("/transactions/{id}"), input)
            .await
            .map(drop)
    }

    pub async fn delete_transaction(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        self.delete::<IgnoredAny>(session, format!("/transactions/{id}"))
            .await
            .map(drop)
    }

    /// Income/expense/balance totals, optionally restricted to a range.
    pub async fn transaction_stats(
        &self,
        session: &Session,
        range: Option<&DateRange>,
    ) -> Result<TransactionSummary, ClientError> {
        let endpoint = Endpoint::new("/transactions/stats");
        let endpoint = match range {
            Some(range) => range.apply(endpoint),
            None => endpoint,
        };
        self.get(session, endpoint).await
    }

    pub async fn category_totals(
        &self,
        session: &Session,
        kind: TransactionType,
        range: &DateRange,
    ) -> Result<Vec<CategorySummary>, ClientError> {
        let endpoint = Endpoint::new("/transactions/categories").query("type", kind.as_str());
        self.get(session, range.apply(endpoint)).await
    }

    pub async fn monthly_totals(
        &self,
        session: &Session,
        range: &DateRange,
    ) -> Result<Vec<MonthlyData>, ClientError> {
        self.get(session, range.apply(Endpoint::new("/transactions/monthly")))
            .await
    }

    /// Budgets of one period, with server-derived `spent`/`remaining`.
    pub async fn budgets(
        &self,
        session: &Session,
        range: &DateRange,
    ) -> Result<Vec<Budget>, ClientError> {
        self.get(session, range.apply(Endpoint::new("/budgets")))
            .await
    }

    pub async fn budget_overview(&self, session: &Session) -> Result<Vec<BudgetSummary>, ClientError> {
        self.get(session, "/budgets").await
    }

    pub async fn create_budget(&self, session: &Session, input: &BudgetInput) -> Result<(), ClientError> {
        self.post::<_, IgnoredAny>(session, "/budgets", input)
            .await
            .map(drop)
    }

    pub async fn update_budget(
        &self,
        session: &Session,
        id: &str,
        input: &BudgetInput,
    ) -> Result<(), ClientError> {
        self.put::<_, IgnoredAny>(session, format!("/budgets/{id}"), input)
            .await
            .map(drop)
    }

    pub async fn delete_budget(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        self.delete::<IgnoredAny>(session, format!("/budgets/{id}"))
            .await
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_send_no_query() {
        let endpoint = TransactionFilters::default().endpoint();
        assert_eq!(endpoint.path(), "/transactions");
        assert!(endpoint.query_pairs().is_empty());
    }

    #[test]
    fn filters_keep_field_order_and_skip_blanks() {
        let filters = TransactionFilters {
            start_date: "2026-10-01".to_string(),
            kind: Some(TransactionType::Expense),
            source: "telegram".to_string(),
            ..TransactionFilters::default()
        };
        let pairs = filters
            .endpoint()
            .query_pairs()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>();
        assert_eq!(pairs, ["startDate=2026-10-01", "type=expense", "source=telegram"]);
    }
}
