use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Category, NewTransaction, TransactionType};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),

    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    #[error("unknown transaction type '{0}'")]
    UnknownType(String),

    #[error("'{0}' is not a date (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Raw values as typed into the add-transaction form.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransactionForm {
    pub(crate) amount: String,
    pub(crate) description: String,
    /// Category chip id, e.g. "food".
    pub(crate) category: String,
    /// Empty means "expense".
    pub(crate) kind: String,
    pub(crate) upi_id: String,
    pub(crate) merchant: String,
    pub(crate) notes: String,
    /// Comma-separated participant names.
    pub(crate) split_with: String,
    pub(crate) due_date: String,
    pub(crate) fine_per_day: String,
    pub(crate) is_recurring: bool,
}

impl TransactionForm {
    /// Turn the raw form into a record the store will accept. `today` is the
    /// due date used when a due record leaves the date blank.
    pub(crate) fn validate(&self, today: NaiveDate) -> Result<NewTransaction, FormError> {
        let amount = parse_amount(&self.amount, "amount")?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(FormError::MissingField("description"));
        }
        if self.category.trim().is_empty() {
            return Err(FormError::MissingField("category"));
        }

        let kind = if self.kind.trim().is_empty() {
            TransactionType::Expense
        } else {
            TransactionType::parse(&self.kind)
                .ok_or_else(|| FormError::UnknownType(self.kind.trim().to_string()))?
        };

        let mut txn = NewTransaction::new(
            description.to_string(),
            amount,
            kind,
            Category::from_form_id(&self.category),
        );
        txn.split_with = split_names(&self.split_with);
        txn.upi_id = non_empty(&self.upi_id);
        txn.merchant = non_empty(&self.merchant);
        txn.notes = self.notes.trim().to_string();
        txn.is_recurring = self.is_recurring;

        if kind == TransactionType::Due {
            let due = self.due_date.trim();
            txn.due_date = Some(if due.is_empty() {
                today
            } else {
                NaiveDate::parse_from_str(due, "%Y-%m-%d")
                    .map_err(|_| FormError::InvalidDate(due.to_string()))?
            });
            if !self.fine_per_day.trim().is_empty() {
                txn.fine_per_day = Some(parse_amount(&self.fine_per_day, "fine per day")?);
            }
        }

        Ok(txn)
    }
}

/// Parse a non-negative amount. Currency symbols and thousands separators
/// are tolerated.
pub(crate) fn parse_amount(raw: &str, field: &'static str) -> Result<Decimal, FormError> {
    let cleaned = raw.replace(['₹', '$', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(FormError::MissingField(field));
    }
    let value =
        Decimal::from_str(cleaned).map_err(|_| FormError::InvalidAmount(raw.trim().to_string()))?;
    if value < Decimal::ZERO {
        return Err(FormError::NegativeAmount(field));
    }
    Ok(value)
}

/// Participants are separated by commas; semicolons are accepted too so a
/// name never carries the CSV list separator.
fn split_names(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
