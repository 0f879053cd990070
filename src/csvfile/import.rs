use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::SPLIT_SEPARATOR;
use crate::form::parse_amount;
use crate::models::{Category, Transaction, TransactionType};

/// Load transactions written by `write_csv` (or hand-edited copies of it).
///
/// Only `description` and `amount` are required columns. Rows without an
/// `id` get one after the largest id in the file; rows without a
/// `created_at` are stamped with `now`. Any malformed row, or a repeated id,
/// fails the whole load with its 1-based data row number.
pub(crate) fn read_csv(path: &Path, now: DateTime<Utc>) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let columns: HashMap<String, usize> = rdr
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_lowercase(), i))
        .collect();
    for required in ["description", "amount"] {
        if !columns.contains_key(required) {
            anyhow::bail!("CSV file is missing the '{required}' column");
        }
    }

    let mut parsed: Vec<(Option<i64>, Transaction)> = Vec::new();
    let mut seen_ids = HashSet::new();
    for (i, result) in rdr.records().enumerate() {
        let row_no = i + 1;
        let record = result.with_context(|| format!("Row {row_no}: failed to read record"))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let row = Row {
            columns: &columns,
            record: &record,
        };
        let parsed_row =
            parse_row(&row, now).with_context(|| format!("Row {row_no}: invalid transaction"))?;
        if let Some(id) = parsed_row.0 {
            if !seen_ids.insert(id) {
                anyhow::bail!("Row {row_no}: duplicate id {id}");
            }
        }
        parsed.push(parsed_row);
    }

    let mut next_id = parsed
        .iter()
        .filter_map(|(id, _)| *id)
        .max()
        .unwrap_or(0)
        + 1;
    let transactions: Vec<Transaction> = parsed
        .into_iter()
        .map(|(id, mut txn)| {
            txn.id = id.unwrap_or_else(|| {
                let assigned = next_id;
                next_id += 1;
                assigned
            });
            txn
        })
        .collect();

    log::info!(
        "imported {} transactions from {}",
        transactions.len(),
        path.display()
    );
    Ok(transactions)
}

/// One data record viewed through the header's column positions.
struct Row<'r> {
    columns: &'r HashMap<String, usize>,
    record: &'r csv::StringRecord,
}

impl<'r> Row<'r> {
    /// Trimmed value of a named column; empty when the column is absent.
    fn get(&self, name: &str) -> &'r str {
        self.columns
            .get(name)
            .and_then(|&c| self.record.get(c))
            .map(str::trim)
            .unwrap_or("")
    }
}

fn parse_row(row: &Row<'_>, now: DateTime<Utc>) -> Result<(Option<i64>, Transaction)> {
    let id = match row.get("id") {
        "" => None,
        raw => {
            let id = raw
                .parse::<i64>()
                .with_context(|| format!("'{raw}' is not a valid id"))?;
            if id < 1 {
                anyhow::bail!("id must be positive, got {id}");
            }
            Some(id)
        }
    };

    let description = row.get("description");
    if description.is_empty() {
        anyhow::bail!("description is required");
    }

    let amount = parse_amount(row.get("amount"), "amount")?;

    let kind = match row.get("type") {
        "" => TransactionType::Expense,
        raw => TransactionType::parse(raw)
            .ok_or_else(|| anyhow::anyhow!("'{raw}' is not a transaction type"))?,
    };

    let created_at = match row.get("created_at") {
        "" => now,
        raw => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("'{raw}' is not an RFC 3339 timestamp"))?
            .with_timezone(&Utc),
    };

    let due_date = match row.get("due_date") {
        "" => None,
        raw => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("'{raw}' is not a YYYY-MM-DD date"))?,
        ),
    };

    let fine_per_day = match row.get("fine_per_day") {
        "" => None,
        raw => Some(parse_amount(raw, "fine_per_day")?),
    };

    let is_recurring = match row.get("is_recurring").to_lowercase().as_str() {
        "" | "false" | "0" | "no" => false,
        "true" | "1" | "yes" => true,
        other => anyhow::bail!("'{other}' is not a boolean"),
    };

    let txn = Transaction {
        id: 0,
        description: description.to_string(),
        amount,
        kind,
        category: Category::parse(row.get("category")),
        created_at,
        split_with: row.get("split_with")
            .split(SPLIT_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        upi_id: optional(row.get("upi_id")),
        merchant: optional(row.get("merchant")),
        notes: row.get("notes").to_string(),
        is_recurring,
        due_date,
        fine_per_day,
    };
    Ok((id, txn))
}

fn optional(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}
