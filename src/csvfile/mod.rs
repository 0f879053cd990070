mod export;
mod import;

pub(crate) use export::write_csv;
pub(crate) use import::read_csv;

/// Column order written by `write_csv`. `read_csv` looks columns up by name,
/// so files with reordered or missing optional columns still load.
pub(crate) const HEADER: [&str; 13] = [
    "id",
    "created_at",
    "description",
    "amount",
    "type",
    "category",
    "merchant",
    "upi_id",
    "split_with",
    "is_recurring",
    "due_date",
    "fine_per_day",
    "notes",
];

/// Separator for the names packed into the `split_with` column.
pub(crate) const SPLIT_SEPARATOR: char = ';';
