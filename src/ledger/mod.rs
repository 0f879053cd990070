//! Derived views over a transaction snapshot: totals, category rollups,
//! percentages and filters. Nothing here mutates its input.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{Category, Transaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Totals {
    pub(crate) total_expenses: Decimal,
    pub(crate) total_income: Decimal,
    pub(crate) net_amount: Decimal,
}

impl Totals {
    /// What the home screen calls "Saved". May be negative.
    pub(crate) fn savings(&self) -> Decimal {
        self.net_amount
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: Category,
    pub(crate) total: Decimal,
    pub(crate) count: usize,
}

impl CategoryTotal {
    pub(crate) fn color(&self) -> &'static str {
        self.category.color()
    }

    pub(crate) fn emoji(&self) -> &'static str {
        self.category.emoji()
    }
}

/// Selector for the category chips above the transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub(crate) enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub(crate) fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(Category::parse(s))
        }
    }

    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => txn.category == *category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<CategoryFilter> for String {
    fn from(f: CategoryFilter) -> Self {
        f.to_string()
    }
}

/// Trailing reporting windows offered by the period picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Period {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Quarter => "3 Months",
            Self::Year => "This Year",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "quarter" => Some(Self::Quarter),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub(crate) fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    pub(crate) fn all() -> &'static [Period] {
        &[Self::Week, Self::Month, Self::Quarter, Self::Year]
    }
}

pub(crate) fn totals(transactions: &[Transaction]) -> Totals {
    let mut out = Totals::default();
    for txn in transactions {
        match txn.kind {
            TransactionType::Expense => out.total_expenses += txn.amount,
            TransactionType::Income => out.total_income += txn.amount,
            TransactionType::Due | TransactionType::Split => {}
        }
    }
    out.net_amount = out.total_income - out.total_expenses;
    out
}

/// Expense totals per category, largest first. Equal totals keep the order
/// in which their category was first seen.
pub(crate) fn category_rollup(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut rollup: Vec<CategoryTotal> = Vec::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match rollup.iter_mut().find(|e| e.category == txn.category) {
            Some(entry) => {
                entry.total += txn.amount;
                entry.count += 1;
            }
            None => rollup.push(CategoryTotal {
                category: txn.category.clone(),
                total: txn.amount,
                count: 1,
            }),
        }
    }
    // sort_by is stable
    rollup.sort_by(|a, b| b.total.cmp(&a.total));
    rollup
}

/// Whole-number share of `part` in `grand`, half rounded up, within 0..=100.
/// A zero grand total yields 0.
pub(crate) fn percent_of_total(part: Decimal, grand: Decimal) -> u32 {
    if grand <= Decimal::ZERO {
        return 0;
    }
    let pct = (part / grand * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or(0)
}

pub(crate) fn filter_by_category(
    transactions: &[Transaction],
    selector: &CategoryFilter,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| selector.matches(t))
        .cloned()
        .collect()
}

/// Progress-bar fill for `spent` against `budget`, never above 100.
pub(crate) fn budget_progress(spent: Decimal, budget: Decimal) -> Decimal {
    if budget <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (spent / budget * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
}

/// Records still waiting for a category, in list order.
pub(crate) fn uncategorized(transactions: &[Transaction]) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.category.is_uncategorized())
        .cloned()
        .collect()
}

/// Records created inside the trailing `period` ending at `now`.
pub(crate) fn within_period(
    transactions: &[Transaction],
    period: Period,
    now: DateTime<Utc>,
) -> Vec<Transaction> {
    let start = now - Duration::days(period.days());
    transactions
        .iter()
        .filter(|t| t.created_at >= start && t.created_at <= now)
        .cloned()
        .collect()
}

/// Fines accrued across every overdue record.
pub(crate) fn total_accrued_fines(
    transactions: &[Transaction],
    today: chrono::NaiveDate,
) -> Decimal {
    transactions.iter().map(|t| t.accrued_fine(today)).sum()
}

#[cfg(test)]
mod tests;
