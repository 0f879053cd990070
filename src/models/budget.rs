use rust_decimal::Decimal;

use super::Category;

#[derive(Debug, Clone)]
pub(crate) struct Budget {
    /// `None` budgets the whole month.
    pub(crate) category: Option<Category>,
    /// Format: "YYYY-MM"
    pub(crate) month: String,
    pub(crate) limit_amount: Decimal,
}

impl Budget {
    pub(crate) fn monthly(month: String, limit_amount: Decimal) -> Self {
        Self {
            category: None,
            month,
            limit_amount,
        }
    }

    pub(crate) fn for_category(category: Category, month: String, limit_amount: Decimal) -> Self {
        Self {
            category: Some(category),
            month,
            limit_amount,
        }
    }

    /// Whether `spent` has gone past the limit.
    pub(crate) fn is_exceeded(&self, spent: Decimal) -> bool {
        spent > self.limit_amount
    }

    pub(crate) fn remaining(&self, spent: Decimal) -> Decimal {
        self.limit_amount - spent
    }
}
