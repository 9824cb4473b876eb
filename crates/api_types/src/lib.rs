use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform wrapper around every API response body.
///
/// Successful responses carry the payload in `data`; failed ones usually
/// carry a human readable `message` or `error`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthToken {
        pub token: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum TransactionType {
        Income,
        Expense,
    }

    impl TransactionType {
        /// Wire name, also used as the `type` query filter.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
            }
        }

        pub fn toggle(self) -> Self {
            match self {
                Self::Income => Self::Expense,
                Self::Expense => Self::Income,
            }
        }
    }

    /// Source recorded for transactions created from this client.
    pub const SOURCE_WEB: &str = "web";

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        #[serde(rename = "_id")]
        pub id: String,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub category: String,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub source: String,
        #[serde(rename = "createdAt")]
        pub created_at: DateTime<Utc>,
    }

    /// Body of `POST /transactions` and `PUT /transactions/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionInput {
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub category: String,
        pub description: String,
        pub source: String,
    }
}

pub mod budget {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Period {
        pub start: DateTime<Utc>,
        pub end: DateTime<Utc>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Budget {
        #[serde(rename = "_id")]
        pub id: String,
        pub category: String,
        /// Spending limit for the period.
        pub amount: f64,
        pub period: Period,
        /// Computed by the server.
        #[serde(default)]
        pub spent: Option<f64>,
        /// Computed by the server.
        #[serde(default)]
        pub remaining: Option<f64>,
    }

    /// Body of `POST /budgets` and `PUT /budgets/{id}`.
    ///
    /// Period bounds are sent as UTC ISO-8601 strings with milliseconds.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetInput {
        pub category: String,
        pub amount: f64,
        pub period: PeriodInput,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PeriodInput {
        pub start: String,
        pub end: String,
    }

    /// Dashboard read model returned by `GET /budgets` without a range.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct BudgetSummary {
        pub category: String,
        pub budget: f64,
        pub spent: f64,
        pub remaining: f64,
        pub percentage: f64,
    }
}

pub mod report {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct TransactionSummary {
        pub income: f64,
        pub expense: f64,
        pub balance: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategorySummary {
        pub category: String,
        pub total: f64,
        pub percentage: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MonthlyData {
        /// Opaque label chosen by the server (e.g. `2026-10`).
        pub month: String,
        pub income: f64,
        pub expense: f64,
        pub balance: f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_reads_backend_field_names() {
        let raw = r#"{
            "_id": "64f1",
            "amount": 25000,
            "type": "expense",
            "category": "food",
            "description": "lunch",
            "source": "telegram",
            "createdAt": "2026-10-17T03:00:00.000Z"
        }"#;
        let tx: transaction::Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.id, "64f1");
        assert_eq!(tx.kind, transaction::TransactionType::Expense);
        assert_eq!(tx.amount, 25000.0);
        assert_eq!(tx.source, "telegram");
    }

    #[test]
    fn budget_without_derived_fields() {
        let raw = r#"{
            "_id": "b1",
            "category": "food",
            "amount": 500000,
            "period": {"start": "2026-09-30T17:00:00.000Z", "end": "2026-10-30T17:00:00.000Z"}
        }"#;
        let budget: budget::Budget = serde_json::from_str(raw).unwrap();
        assert_eq!(budget.spent, None);
        assert_eq!(budget.remaining, None);
    }

    #[test]
    fn envelope_without_data() {
        let env: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"message": "deleted"}"#).unwrap();
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("deleted"));
        assert!(env.error.is_none());
    }
}
