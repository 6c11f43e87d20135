//! Bookkeeping aggregation for the admin dashboard charts.
//!
//! Everything here is a pure function over already-filtered transactions, so both
//! repository implementations share one definition of the numbers.

use std::collections::BTreeMap;

use crate::models::{
    CategoryTotal, ConsultationStatus, MonthlyTotal, StatusCount, Transaction, TransactionKind,
    TransactionSummary,
};

/// Builds the totals, per-category and per-month series for a set of transactions.
///
/// Categories are grouped case-insensitively, matching the `category` filter, and keep
/// the spelling of their first entry. They are ordered by total descending, ties broken
/// by kind then lowercased category name. Months are `YYYY-MM` in chronological order
/// and only months with at least one entry appear.
pub fn summarize(transactions: &[Transaction]) -> TransactionSummary {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut categories: BTreeMap<(TransactionKind, String), CategoryTotal> = BTreeMap::new();
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for tx in transactions {
        let month = months
            .entry(tx.date.format("%Y-%m").to_string())
            .or_insert((0.0, 0.0));
        match tx.kind {
            TransactionKind::Income => {
                total_income += tx.amount;
                month.0 += tx.amount;
            }
            TransactionKind::Expense => {
                total_expense += tx.amount;
                month.1 += tx.amount;
            }
        }

        let entry = categories
            .entry((tx.kind, tx.category.to_lowercase()))
            .or_insert_with(|| CategoryTotal {
                kind: tx.kind,
                category: tx.category.clone(),
                total: 0.0,
                count: 0,
            });
        entry.total += tx.amount;
        entry.count += 1;
    }

    let mut by_category: Vec<CategoryTotal> = categories.into_values().collect();
    // Stable sort keeps the BTreeMap (kind, category) order among equal totals.
    by_category.sort_by(|a, b| b.total.total_cmp(&a.total));

    let by_month = months
        .into_iter()
        .map(|(month, (income, expense))| MonthlyTotal {
            month,
            income,
            expense,
            net: income - expense,
        })
        .collect();

    TransactionSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        count: transactions.len() as i64,
        by_category,
        by_month,
    }
}

/// Expands per-status counts into one entry per known status, in workflow order.
pub fn status_breakdown(counts: &[(ConsultationStatus, i64)]) -> Vec<StatusCount> {
    ConsultationStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: *status,
            count: counts
                .iter()
                .filter(|(s, _)| s == status)
                .map(|(_, c)| *c)
                .sum(),
        })
        .collect()
}
