use crate::models::{Category, Transaction};

/// Walks the uncategorized records one at a time. Choosing a category
/// records a decision and moves on; the records themselves are not changed.
#[derive(Debug, Clone)]
pub(crate) struct ReviewQueue {
    items: Vec<Transaction>,
    index: usize,
    decisions: Vec<(i64, Category)>,
}

impl ReviewQueue {
    pub(crate) fn new(items: Vec<Transaction>) -> Self {
        Self {
            items,
            index: 0,
            decisions: Vec::new(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn current(&self) -> Option<&Transaction> {
        self.items.get(self.index)
    }

    /// 1-based position and total, e.g. `(1, 3)` for "1 of 3".
    pub(crate) fn position(&self) -> (usize, usize) {
        if self.items.is_empty() {
            (0, 0)
        } else {
            (self.index + 1, self.items.len())
        }
    }

    pub(crate) fn next(&mut self) {
        if self.index + 1 < self.items.len() {
            self.index += 1;
        }
    }

    pub(crate) fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub(crate) fn skip(&mut self) {
        self.next();
    }

    /// Record `category` for the current record and advance. A later choice
    /// for the same record replaces the earlier one.
    pub(crate) fn categorize(&mut self, category: Category) {
        let Some(id) = self.current().map(|t| t.id) else {
            return;
        };
        self.decisions.retain(|(txn_id, _)| *txn_id != id);
        self.decisions.push((id, category));
        self.next();
    }

    pub(crate) fn decisions(&self) -> &[(i64, Category)] {
        &self.decisions
    }
}
