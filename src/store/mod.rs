pub(crate) mod seed;

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;

use crate::models::*;

/// Owner of the authoritative transaction list. Readers get immutable
/// snapshots; every mutation swaps in a fresh list.
pub(crate) struct TransactionStore {
    transactions: Arc<Vec<Transaction>>,
    friends: Vec<FriendBalance>,
    next_id: i64,
}

impl TransactionStore {
    pub(crate) fn new() -> Self {
        Self {
            transactions: Arc::new(Vec::new()),
            friends: Vec::new(),
            next_id: 1,
        }
    }

    /// Store preloaded with the demo transactions and friends.
    pub(crate) fn with_seed(now: DateTime<Utc>) -> Self {
        let mut store = Self::adopt(seed::transactions(now));
        store.friends = seed::friends();
        store
    }

    /// Adopt an externally loaded list, newest first. Ids must be positive
    /// and unique; new ids continue after the largest one present.
    pub(crate) fn from_transactions(transactions: Vec<Transaction>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(transactions.len());
        for txn in &transactions {
            if txn.id < 1 {
                anyhow::bail!("Transaction id {} is not positive", txn.id);
            }
            if !seen.insert(txn.id) {
                anyhow::bail!("Duplicate transaction id {}", txn.id);
            }
        }
        Ok(Self::adopt(transactions))
    }

    fn adopt(transactions: Vec<Transaction>) -> Self {
        let next_id = transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        log::debug!(
            "store loaded {} transactions, next id {next_id}",
            transactions.len()
        );
        Self {
            transactions: Arc::new(transactions),
            friends: Vec::new(),
            next_id,
        }
    }

    pub(crate) fn snapshot(&self) -> Arc<Vec<Transaction>> {
        Arc::clone(&self.transactions)
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub(crate) fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Assign the next id and put the record at the front of the list.
    pub(crate) fn add(&mut self, new: NewTransaction, now: DateTime<Utc>) -> i64 {
        let id = self.next_id;
        self.next_id += 1;

        let txn = new.into_transaction(id, now);
        log::debug!(
            "adding transaction {id}: {} {} {}",
            txn.kind.as_str(),
            txn.amount,
            txn.category
        );

        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.push(txn);
        next.extend(self.transactions.iter().cloned());
        self.transactions = Arc::new(next);
        id
    }

    /// The first `limit` records, i.e. the most recently added.
    pub(crate) fn recent(&self, limit: usize) -> Vec<Transaction> {
        self.transactions.iter().take(limit).cloned().collect()
    }

    pub(crate) fn friends(&self) -> &[FriendBalance] {
        &self.friends
    }
}
