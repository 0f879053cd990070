use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ledger::{CategoryFilter, Period};
use crate::models::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Tab {
    #[default]
    Home,
    Expenses,
    Friends,
    Profile,
}

impl Tab {
    pub(crate) fn all() -> &'static [Tab] {
        &[Self::Home, Self::Expenses, Self::Friends, Self::Profile]
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.to_string().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Friends => write!(f, "Friends"),
            Self::Profile => write!(f, "Profile"),
        }
    }
}

/// Sub-tabs of the expenses screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ExpenseTab {
    #[default]
    Chart,
    Categories,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ChartKind {
    #[default]
    Pie,
    Bar,
}

/// Everything the user has selected, owned in one place and passed down.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ViewState {
    pub(crate) tab: Tab,
    pub(crate) expense_tab: ExpenseTab,
    pub(crate) filter: CategoryFilter,
    pub(crate) period: Period,
    pub(crate) chart: ChartKind,
    pub(crate) form_open: bool,
}

impl ViewState {
    pub(crate) fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.form_open = false;
    }

    /// Tapping a category chip jumps to the full list filtered by it.
    pub(crate) fn select_category(&mut self, category: Category) {
        self.tab = Tab::Expenses;
        self.expense_tab = ExpenseTab::All;
        self.filter = CategoryFilter::Only(category);
    }

    pub(crate) fn clear_filter(&mut self) {
        self.filter = CategoryFilter::All;
    }

    pub(crate) fn toggle_chart(&mut self) {
        self.chart = match self.chart {
            ChartKind::Pie => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Pie,
        };
    }

    pub(crate) fn open_form(&mut self) {
        self.form_open = true;
    }

    pub(crate) fn close_form(&mut self) {
        self.form_open = false;
    }

    pub(crate) fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize view state")
    }

    pub(crate) fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("Failed to parse view state")
    }
}
