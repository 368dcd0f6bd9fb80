//! Category totals and headline sums computed from the full transaction list.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::Transaction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) total: Decimal,
    pub(crate) count: usize,
}

/// Sum amounts per category in a single pass.
///
/// Categories appear in the order they are first seen. An empty category
/// string is a key like any other. Amounts are bounded by `MAX_AMOUNT`, so
/// the sums stay far from `Decimal::MAX`.
pub(crate) fn totals_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for txn in transactions {
        match index.get(txn.category.as_str()) {
            Some(&i) => {
                totals[i].total += txn.amount;
                totals[i].count += 1;
            }
            None => {
                index.insert(&txn.category, totals.len());
                totals.push(CategoryTotal {
                    category: txn.category.clone(),
                    total: txn.amount,
                    count: 1,
                });
            }
        }
    }

    totals
}

/// Pie slice fractions, one per category.
///
/// A slice is sized by the magnitude of the category sum, so a net expense
/// category still gets a visible slice. Returns all zeros when every sum is
/// zero.
pub(crate) fn slice_weights(totals: &[CategoryTotal]) -> Vec<f64> {
    let magnitudes: Vec<f64> = totals
        .iter()
        .map(|t| t.total.abs().to_f64().unwrap_or(0.0))
        .collect();
    let sum: f64 = magnitudes.iter().sum();
    if sum <= 0.0 {
        return vec![0.0; totals.len()];
    }
    magnitudes.iter().map(|m| m / sum).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    /// Sum of negative amounts; zero or below.
    pub(crate) expenses: Decimal,
}

impl Totals {
    pub(crate) fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut acc, t| {
            if t.is_income() {
                acc.income += t.amount;
            } else if t.is_expense() {
                acc.expenses += t.amount;
            }
            acc
        })
    }

    pub(crate) fn net(&self) -> Decimal {
        self.income + self.expenses
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
