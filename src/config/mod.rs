use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub(crate) const BUDGET_ENV: &str = "POCKETLEDGER_BUDGET";
pub(crate) const CURRENCY_ENV: &str = "POCKETLEDGER_CURRENCY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) currency_symbol: String,
    pub(crate) monthly_budget: Decimal,
    /// Default `env_logger` filter; `RUST_LOG` still wins.
    pub(crate) log_level: String,
    /// How many records the home screen lists under "Recent Activity".
    pub(crate) recent_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
            monthly_budget: Decimal::from(10_000),
            log_level: "warn".into(),
            recent_limit: 3,
        }
    }
}

impl Settings {
    /// Load settings from `explicit` if given, else from the platform config
    /// dir. A missing file means defaults; a malformed one is an error.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => default_path(),
        };

        let mut settings = match path {
            Some(p) if p.exists() => Self::from_file(&p)?,
            Some(p) if explicit.is_some() => {
                anyhow::bail!("Config file not found: {}", p.display())
            }
            _ => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Overlay environment overrides. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub(crate) fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(BUDGET_ENV) {
            self.monthly_budget = Decimal::from_str(raw.trim())
                .with_context(|| format!("{BUDGET_ENV} is not a number: '{raw}'"))?;
            if self.monthly_budget < Decimal::ZERO {
                anyhow::bail!("{BUDGET_ENV} cannot be negative");
            }
        }
        if let Some(symbol) = lookup(CURRENCY_ENV) {
            if symbol.trim().is_empty() {
                log::warn!("{CURRENCY_ENV} is set but empty, keeping '{}'", self.currency_symbol);
            } else {
                self.currency_symbol = symbol.trim().to_string();
            }
        }
        Ok(())
    }
}

pub(crate) fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "pocketledger", "PocketLedger")
        .map(|dirs| dirs.config_dir().join("settings.json"))
}
