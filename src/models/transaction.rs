use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TransactionType {
    Expense,
    Income,
    Due,
    Split,
}

impl TransactionType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::Due => "due",
            Self::Split => "split",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Some(Self::Expense),
            "income" => Some(Self::Income),
            "due" => Some(Self::Due),
            "split" => Some(Self::Split),
            _ => None,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
            Self::Due => "Due",
            Self::Split => "Split",
        }
    }

    pub(crate) fn emoji(&self) -> &'static str {
        match self {
            Self::Expense => "💸",
            Self::Income => "💰",
            Self::Due => "⏰",
            Self::Split => "🤝",
        }
    }

    /// Money leaving the user's pocket. Only `Income` flows in.
    pub(crate) fn is_outflow(&self) -> bool {
        !matches!(self, Self::Income)
    }

    pub(crate) fn all() -> &'static [TransactionType] {
        &[Self::Expense, Self::Income, Self::Due, Self::Split]
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A logged money movement. `amount` is always a non-negative magnitude;
/// direction comes from `kind`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transaction {
    pub(crate) id: i64,
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    pub(crate) kind: TransactionType,
    pub(crate) category: Category,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) split_with: Vec<String>,
    pub(crate) upi_id: Option<String>,
    pub(crate) merchant: Option<String>,
    pub(crate) notes: String,
    pub(crate) is_recurring: bool,
    pub(crate) due_date: Option<NaiveDate>,
    pub(crate) fine_per_day: Option<Decimal>,
}

impl Transaction {
    pub(crate) fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the display sign applied: outflows are negative.
    pub(crate) fn signed_amount(&self) -> Decimal {
        if self.kind.is_outflow() {
            -self.amount
        } else {
            self.amount
        }
    }

    pub(crate) fn emoji(&self) -> &'static str {
        self.category.emoji()
    }

    /// The user's equal share of a split, counting the user as one
    /// participant alongside everyone in `split_with`.
    pub(crate) fn split_share(&self) -> Option<Decimal> {
        if self.kind != TransactionType::Split || self.split_with.is_empty() {
            return None;
        }
        let heads = Decimal::from(self.split_with.len() as u64 + 1);
        Some((self.amount / heads).round_dp(2))
    }

    /// Fine accrued on a due record as of `today`. Zero when not overdue or
    /// when the record carries no due date or fine.
    pub(crate) fn accrued_fine(&self, today: NaiveDate) -> Decimal {
        if self.kind != TransactionType::Due {
            return Decimal::ZERO;
        }
        match (self.due_date, self.fine_per_day) {
            (Some(due), Some(fine)) => {
                let overdue = (today - due).num_days().max(0);
                fine * Decimal::from(overdue)
            }
            _ => Decimal::ZERO,
        }
    }
}

/// Everything a caller supplies to create a transaction; the store assigns
/// the id.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewTransaction {
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    pub(crate) kind: TransactionType,
    pub(crate) category: Category,
    pub(crate) split_with: Vec<String>,
    pub(crate) upi_id: Option<String>,
    pub(crate) merchant: Option<String>,
    pub(crate) notes: String,
    pub(crate) is_recurring: bool,
    pub(crate) due_date: Option<NaiveDate>,
    pub(crate) fine_per_day: Option<Decimal>,
}

impl NewTransaction {
    pub(crate) fn new(
        description: String,
        amount: Decimal,
        kind: TransactionType,
        category: Category,
    ) -> Self {
        Self {
            description,
            amount,
            kind,
            category,
            split_with: Vec::new(),
            upi_id: None,
            merchant: None,
            notes: String::new(),
            is_recurring: false,
            due_date: None,
            fine_per_day: None,
        }
    }

    pub(crate) fn into_transaction(self, id: i64, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            created_at,
            split_with: self.split_with,
            upi_id: self.upi_id,
            merchant: self.merchant,
            notes: self.notes,
            is_recurring: self.is_recurring,
            due_date: self.due_date,
            fine_per_day: self.fine_per_day,
        }
    }
}
