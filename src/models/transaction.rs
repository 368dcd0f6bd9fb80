use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::ValidationError;

const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";

pub(super) static DATE_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| match Regex::new(DATE_PATTERN) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!("date pattern failed to compile, rejecting all dates: {e}");
            None
        }
    });

/// Largest magnitude accepted for a single amount (one quadrillion).
///
/// Keeps category and headline sums far below `Decimal::MAX`.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Whether `amount` is within the accepted range.
pub(crate) fn amount_in_range(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub(crate) id: i64,
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    /// Format: "YYYY-MM-DD"
    pub(crate) date: String,
    pub(crate) description: Option<String>,
}

impl Transaction {
    pub(crate) fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} - {}: {}",
            self.id, self.date, self.category, self.amount
        )?;
        if let Some(desc) = &self.description {
            write!(f, " ({desc})")?;
        }
        Ok(())
    }
}

/// Field values for creating or overwriting a transaction.
///
/// Everything except the ID, which the store assigns. Build one with
/// [`TransactionDraft::parse`] so raw input is checked before it reaches the
/// database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransactionDraft {
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    pub(crate) date: String,
    pub(crate) description: Option<String>,
}

impl TransactionDraft {
    /// Validate raw text fields. A blank description becomes `None`.
    pub(crate) fn parse(
        category: &str,
        amount: &str,
        date: &str,
        description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }

        Ok(Self {
            category: category.to_string(),
            amount: parse_amount(amount)?,
            date: parse_date(date)?,
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        })
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|amount| amount_in_range(*amount))
        .ok_or_else(|| ValidationError::InvalidAmount(raw.to_string()))
}

fn parse_date(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let shape_ok = DATE_SHAPE
        .as_ref()
        .is_some_and(|re| re.is_match(trimmed));
    if shape_ok && NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok() {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::InvalidDate(raw.to_string()))
    }
}

/// Parse a transaction ID typed by the user.
pub(crate) fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ValidationError::InvalidId(raw.to_string()))
}
