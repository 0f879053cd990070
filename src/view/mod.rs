pub(crate) mod review;
pub(crate) mod state;
pub(crate) mod util;

pub(crate) use review::ReviewQueue;
pub(crate) use state::{ChartKind, ExpenseTab, Tab, ViewState};


#[cfg(test)]
#[path = "util_tests.rs"]
mod util_tests;
