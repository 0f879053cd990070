mod categorize;
mod config;
mod csvfile;
mod form;
mod ledger;
mod models;
mod run;
mod store;
mod view;

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config_path = run::flag_value(&args, "--config").map(|p| PathBuf::from(run::shellexpand(p)));
    let settings = config::Settings::load(config_path.as_deref())?;
    init_logging(&settings.log_level);
    log::debug!("settings: {settings:?}");

    let mut store = open_store(run::flag_value(&args, "--file"))?;
    run::as_cli(&args, &mut store, &settings)
}

fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Load the ledger named by `--file`, or fall back to the demo data. A file
/// that does not exist yet starts an empty ledger so `add` can create it.
fn open_store(file: Option<&str>) -> Result<store::TransactionStore> {
    let now = Utc::now();
    match file {
        Some(raw) => {
            let expanded = run::shellexpand(raw);
            let path = Path::new(&expanded);
            if path.exists() {
                store::TransactionStore::from_transactions(csvfile::read_csv(path, now)?)
                    .with_context(|| format!("Invalid ledger file: {}", path.display()))
            } else {
                log::info!("{} does not exist yet, starting empty", path.display());
                Ok(store::TransactionStore::new())
            }
        }
        None => {
            log::info!("no --file given, using demo data");
            Ok(store::TransactionStore::with_seed(now))
        }
    }
}
