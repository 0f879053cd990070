use anyhow::{Context, Result};
use std::path::Path;

use super::{HEADER, SPLIT_SEPARATOR};
use crate::models::Transaction;

/// Write every transaction to `path`, newest first as given. Returns the
/// number of data rows written.
pub(crate) fn write_csv(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    wtr.write_record(HEADER)
        .context("Failed to write CSV header")?;

    for txn in transactions {
        if let Some(name) = txn.split_with.iter().find(|n| n.contains(SPLIT_SEPARATOR)) {
            anyhow::bail!(
                "Transaction {}: participant '{name}' contains '{SPLIT_SEPARATOR}'",
                txn.id
            );
        }
        wtr.write_record(row(txn))
            .with_context(|| format!("Failed to write transaction {}", txn.id))?;
    }
    wtr.flush().context("Failed to flush CSV file")?;

    log::info!(
        "exported {} transactions to {}",
        transactions.len(),
        path.display()
    );
    Ok(transactions.len())
}

fn row(txn: &Transaction) -> [String; 13] {
    let sep = SPLIT_SEPARATOR.to_string();
    [
        txn.id.to_string(),
        txn.created_at.to_rfc3339(),
        txn.description.clone(),
        txn.amount.to_string(),
        txn.kind.as_str().to_string(),
        txn.category.to_string(),
        txn.merchant.clone().unwrap_or_default(),
        txn.upi_id.clone().unwrap_or_default(),
        txn.split_with.join(&sep),
        txn.is_recurring.to_string(),
        txn.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        txn.fine_per_day.map(|f| f.to_string()).unwrap_or_default(),
        txn.notes.clone(),
    ]
}
