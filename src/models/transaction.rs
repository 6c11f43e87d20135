use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{Validate, require};

/// TransactionKind
///
/// Direction of a bookkeeping entry. Serialised as `"income"` / `"expense"`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, TS, ToSchema, sqlx::Type, Default, PartialEq, Eq,
    Hash, PartialOrd, Ord,
)]
#[ts(export)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// Transaction
///
/// A single income or expense entry used by the admin dashboard, stored in `transactions`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default, PartialEq)]
#[ts(export)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Always positive; the sign comes from `kind`.
    pub amount: f64,
    pub category: String,
    pub description: String,
    #[ts(type = "string")]
    pub date: NaiveDate,
    /// The admin who recorded the entry.
    pub created_by: Uuid,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

fn check_amount(errors: &mut Vec<String>, amount: f64) {
    if !amount.is_finite() || amount <= 0.0 {
        errors.push("amount must be greater than zero".to_string());
    }
}

/// CreateTransaction
///
/// Input payload for `POST /api/transactions`. `date` defaults to today (UTC).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub date: Option<NaiveDate>,
}

impl Validate for CreateTransaction {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_amount(&mut errors, self.amount);
        require(&mut errors, "category", &self.category);
        errors
    }
}

impl CreateTransaction {
    pub fn into_transaction(self, created_by: Uuid, now: DateTime<Utc>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            kind: self.kind,
            amount: self.amount,
            category: self.category.trim().to_string(),
            description: self.description,
            date: self.date.unwrap_or_else(|| now.date_naive()),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// UpdateTransaction
///
/// Partial update payload for `PUT /api/transactions/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateTransaction {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub date: Option<NaiveDate>,
}

impl Validate for UpdateTransaction {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(amount) = self.amount {
            check_amount(&mut errors, amount);
        }
        if let Some(category) = &self.category {
            require(&mut errors, "category", category);
        }
        errors
    }
}

impl UpdateTransaction {
    pub fn apply(self, transaction: &mut Transaction) {
        if let Some(v) = self.kind {
            transaction.kind = v;
        }
        if let Some(v) = self.amount {
            transaction.amount = v;
        }
        if let Some(v) = self.category {
            transaction.category = v.trim().to_string();
        }
        if let Some(v) = self.description {
            transaction.description = v;
        }
        if let Some(v) = self.date {
            transaction.date = v;
        }
    }
}

/// TransactionFilter
///
/// Query parameters shared by `GET /api/transactions` and `GET /api/transactions/summary`.
/// `from` and `to` are inclusive calendar dates (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TransactionFilter {
    #[serde(rename = "type")]
    #[param(inline)]
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.kind.is_none_or(|k| transaction.kind == k)
            && self
                .category
                .as_ref()
                .is_none_or(|c| transaction.category.to_lowercase() == c.to_lowercase())
            && self.from.is_none_or(|from| transaction.date >= from)
            && self.to.is_none_or(|to| transaction.date <= to)
    }
}

// --- Reporting Schemas (Output) ---

/// CategoryTotal
///
/// Sum of all entries of one kind within one category.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct CategoryTotal {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub total: f64,
    pub count: i64,
}

/// MonthlyTotal
///
/// Income and expense for one calendar month, keyed as `YYYY-MM`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct MonthlyTotal {
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

/// TransactionSummary
///
/// Output schema for `GET /api/transactions/summary`, shaped for the dashboard charts.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
pub struct TransactionSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub count: i64,
    /// Largest totals first.
    pub by_category: Vec<CategoryTotal>,
    /// Oldest month first.
    pub by_month: Vec<MonthlyTotal>,
}
