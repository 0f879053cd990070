use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{flag_value, shellexpand};
use crate::categorize::{self, Categorizer};
use crate::config::Settings;
use crate::csvfile;
use crate::form::TransactionForm;
use crate::ledger::{self, CategoryFilter, Period};
use crate::models::{BalanceDirection, Budget, Category, FriendBalance, Transaction, TransactionType};
use crate::store::TransactionStore;
use crate::view::util::{format_amount, format_signed, progress_bar, relative_time, truncate};
use crate::view::{ChartKind, ExpenseTab, ReviewQueue, Tab, ViewState};

/// Flags that consume the following argument.
const VALUE_FLAGS: &[&str] = &[
    "--file",
    "--config",
    "--state",
    "--tab",
    "--category",
    "--period",
    "--chart",
    "--amount",
    "--desc",
    "--type",
    "--split",
    "--due",
    "--fine",
    "--merchant",
    "--upi",
    "--notes",
];

const BAR_WIDTH: usize = 20;

/// Run one command. `args` excludes the program name.
pub(crate) fn as_cli(args: &[String], store: &mut TransactionStore, settings: &Settings) -> Result<()> {
    let positional = positional(args)?;
    let mut state = view_state(args)?;
    let now = Utc::now();
    let file = flag_value(args, "--file").map(|p| PathBuf::from(shellexpand(p)));
    let rest = positional.get(1..).unwrap_or(&[]);

    match positional.first().copied() {
        None => cli_tab(&state, store, settings, now),
        Some("summary" | "home" | "s") => cli_summary(store, settings, now),
        Some("categories" | "chart") => {
            if state.expense_tab == ExpenseTab::All {
                state.expense_tab = ExpenseTab::Categories;
            }
            cli_categories(&state, store, settings, now)
        }
        Some("list" | "ls") => {
            if let Some(selector) = rest.first() {
                match CategoryFilter::parse(selector) {
                    CategoryFilter::All => state.clear_filter(),
                    CategoryFilter::Only(c) => state.select_category(c),
                }
            }
            cli_list(&state, store, settings, now)
        }
        Some("budget") => cli_budget(&state, store, settings, now),
        Some("friends") => cli_friends(store, settings),
        Some("profile") => cli_profile(store, settings, now),
        Some("review") => cli_review(rest, store),
        Some("add") => cli_add(args, &mut state, store, settings, file.as_deref(), now),
        Some("export") => cli_export(rest, store, now),
        Some("state") => {
            println!("{}", state.to_json()?);
            Ok(())
        }
        Some("help") => {
            print_usage();
            Ok(())
        }
        Some("version") => {
            println!("pocketledger {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(other) => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("pocketledger - pocket-money tracker for expenses, income, dues and splits");
    println!();
    println!("Usage: pocketledger [--file <ledger.csv>] [--config <settings.json>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Show the screen selected by --tab / --state");
    println!("  summary                       Balance, budget and recent activity");
    println!("  categories                    Spending per category");
    println!("  list [category|all]           Transactions, optionally filtered");
    println!("  budget                        Monthly budget progress");
    println!("  friends                       Who owes whom");
    println!("  profile                       Account overview");
    println!("  review [step...]              Categorize uncategorized records; steps are");
    println!("                                a category, skip, next or back (suggests when empty)");
    println!("  add --amount <n> --desc <s>   Record a transaction");
    println!("    --type <t>                  {}", names(TransactionType::all()));
    println!("    --category <id>             Form category id (guessed when omitted)");
    println!("    --split <a,b>               Friends sharing a split");
    println!("    --due <YYYY-MM-DD>          Due date (type due)");
    println!("    --fine <n>                  Fine per day once overdue");
    println!("    --merchant <m>  --upi <id>  --notes <s>  --recurring");
    println!("  export [path]                 Export transactions to CSV");
    println!("  state                         Print the resolved view state as JSON");
    println!("  help, version");
    println!();
    println!("View options:");
    println!("  --tab <tab>                   {}", names(Tab::all()));
    println!("  --category <name|all>         Filter the list by category");
    println!(
        "  --period <p>                  {}",
        Period::all()
            .iter()
            .map(|p| format!("{p:?}").to_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  --chart <pie|bar>             Chart style for categories");
    println!("  --state <json>                Start from a saved view state");
}

fn names<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string().to_lowercase())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Arguments that are not flags or flag values.
pub(crate) fn positional(args: &[String]) -> Result<Vec<&str>> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            flag if VALUE_FLAGS.contains(&flag) => {
                if iter.next().is_none() {
                    anyhow::bail!("{flag} needs a value");
                }
            }
            "--recurring" => {}
            "--help" | "-h" => out.push("help"),
            "--version" | "-V" => out.push("version"),
            flag if flag.starts_with("--") => anyhow::bail!("Unknown flag: {flag}"),
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Starting view state from `--state`, then `--tab`, `--category`,
/// `--period` and `--chart` applied on top.
pub(crate) fn view_state(args: &[String]) -> Result<ViewState> {
    let mut state = match flag_value(args, "--state") {
        Some(json) => ViewState::from_json(json)?,
        None => ViewState::default(),
    };

    if let Some(raw) = flag_value(args, "--tab") {
        let tab = Tab::parse(raw).ok_or_else(|| {
            anyhow::anyhow!("Unknown tab '{raw}' (expected {})", names(Tab::all()))
        })?;
        state.select_tab(tab);
    }
    if let Some(raw) = flag_value(args, "--category") {
        match CategoryFilter::parse(raw) {
            CategoryFilter::All => state.clear_filter(),
            CategoryFilter::Only(category) => state.select_category(category),
        }
    }
    if let Some(raw) = flag_value(args, "--period") {
        state.period = Period::parse(raw)
            .ok_or_else(|| anyhow::anyhow!("Unknown period '{raw}'"))?;
    }
    if let Some(raw) = flag_value(args, "--chart") {
        let wanted = match raw.to_lowercase().as_str() {
            "pie" => ChartKind::Pie,
            "bar" => ChartKind::Bar,
            _ => anyhow::bail!("Unknown chart '{raw}' (expected pie or bar)"),
        };
        if state.chart != wanted {
            state.toggle_chart();
        }
    }
    log::debug!("view state: {state:?}");
    Ok(state)
}

fn cli_tab(
    state: &ViewState,
    store: &TransactionStore,
    settings: &Settings,
    now: DateTime<Utc>,
) -> Result<()> {
    match state.tab {
        Tab::Home => cli_summary(store, settings, now),
        Tab::Expenses => match state.expense_tab {
            ExpenseTab::Chart | ExpenseTab::Categories => cli_categories(state, store, settings, now),
            ExpenseTab::All => cli_list(state, store, settings, now),
        },
        Tab::Friends => cli_friends(store, settings),
        Tab::Profile => cli_profile(store, settings, now),
    }
}

fn cli_summary(store: &TransactionStore, settings: &Settings, now: DateTime<Utc>) -> Result<()> {
    let snapshot = store.snapshot();
    let totals = ledger::totals(&snapshot);
    let sym = settings.currency_symbol.as_str();
    let spent = month_spent(&snapshot, now);
    let progress = ledger::budget_progress(spent, settings.monthly_budget);

    println!("pocketledger - {}", now.format("%d %b %Y"));
    println!("{}", "─".repeat(40));
    println!("  Balance:    {}", format_signed(totals.net_amount, sym));
    println!("  Income:     {}", format_amount(totals.total_income, sym));
    println!("  Expenses:   {}", format_amount(totals.total_expenses, sym));
    println!("  Savings:    {}", format_signed(totals.savings(), sym));
    println!(
        "  Budget:     {} {progress:.0}% of {} ({} this month)",
        progress_bar(progress, BAR_WIDTH),
        format_amount(settings.monthly_budget, sym),
        format_amount(spent, sym)
    );

    let fines = ledger::total_accrued_fines(&snapshot, now.date_naive());
    if fines > Decimal::ZERO {
        println!("  Fines due:  {}", format_amount(fines, sym));
    }
    let pending = ledger::uncategorized(&snapshot).len();
    if pending > 0 {
        println!("  To review:  {pending} uncategorized (run `pocketledger review`)");
    }

    println!();
    if store.is_empty() {
        println!("No transactions yet. Record one with `pocketledger add`.");
        return Ok(());
    }
    println!("Recent Activity:");
    for txn in &store.recent(settings.recent_limit) {
        print_row(txn, sym, now);
    }
    Ok(())
}

/// Expenses inside the trailing month window, the same span `budget` reports.
fn month_spent(snapshot: &[Transaction], now: DateTime<Utc>) -> Decimal {
    ledger::totals(&ledger::within_period(snapshot, Period::Month, now)).total_expenses
}

fn cli_categories(
    state: &ViewState,
    store: &TransactionStore,
    settings: &Settings,
    now: DateTime<Utc>,
) -> Result<()> {
    let in_period = ledger::within_period(&store.snapshot(), state.period, now);
    let totals = ledger::totals(&in_period);
    let rollup = ledger::category_rollup(&in_period);
    let sym = settings.currency_symbol.as_str();

    println!(
        "Spending by Category - {} ({})",
        state.period.label(),
        format_amount(totals.total_expenses, sym)
    );
    println!("{}", "─".repeat(40));
    if rollup.is_empty() {
        println!("  No expenses");
        return Ok(());
    }

    for entry in &rollup {
        let pct = ledger::percent_of_total(entry.total, totals.total_expenses);
        let label = format!("{} {}", entry.emoji(), entry.category);
        match state.chart {
            ChartKind::Pie => println!(
                "  {:<20} {:>10}  {pct:>3}%  {} txn(s)  {}",
                label,
                format_amount(entry.total, sym),
                entry.count,
                entry.color()
            ),
            ChartKind::Bar => println!(
                "  {:<20} {} {:>10}  {pct:>3}%",
                label,
                progress_bar(Decimal::from(pct), BAR_WIDTH),
                format_amount(entry.total, sym)
            ),
        }
    }
    Ok(())
}

fn cli_list(
    state: &ViewState,
    store: &TransactionStore,
    settings: &Settings,
    now: DateTime<Utc>,
) -> Result<()> {
    let in_period = ledger::within_period(&store.snapshot(), state.period, now);
    let txns = ledger::filter_by_category(&in_period, &state.filter);

    println!(
        "Transactions - {} - {} ({})",
        state.filter,
        state.period.label(),
        txns.len()
    );
    println!("{}", "─".repeat(60));
    if txns.is_empty() {
        println!("  No transactions");
        return Ok(());
    }
    for txn in &txns {
        print_row(txn, &settings.currency_symbol, now);
    }
    Ok(())
}

fn print_row(txn: &Transaction, sym: &str, now: DateTime<Utc>) {
    let mut detail = relative_time(txn.created_at, now);
    if let Some(share) = txn.split_share() {
        detail.push_str(&format!(", your share {}", format_amount(share, sym)));
    } else if !txn.split_with.is_empty() {
        detail.push_str(&format!(", with {}", txn.split_with.join(", ")));
    }
    if let Some(due) = txn.due_date {
        detail.push_str(&format!(", due {}", due.format("%d %b")));
    }
    println!(
        "  {:>4} {} {:<28} {:>12}  {} {:<7} {}",
        txn.id,
        txn.emoji(),
        truncate(&txn.description, 28),
        format_signed(txn.signed_amount(), sym),
        txn.kind.emoji(),
        txn.kind.label(),
        detail
    );
}

fn cli_budget(
    state: &ViewState,
    store: &TransactionStore,
    settings: &Settings,
    now: DateTime<Utc>,
) -> Result<()> {
    let month = now.format("%Y-%m").to_string();
    let this_month = ledger::within_period(&store.snapshot(), Period::Month, now);
    let (budget, spent) = match &state.filter {
        CategoryFilter::All => (
            Budget::monthly(month, settings.monthly_budget),
            ledger::totals(&this_month).total_expenses,
        ),
        CategoryFilter::Only(category) => {
            let spent = ledger::category_rollup(&this_month)
                .into_iter()
                .find(|e| e.category == *category)
                .map(|e| e.total)
                .unwrap_or(Decimal::ZERO);
            (
                Budget::for_category(category.clone(), month, settings.monthly_budget),
                spent,
            )
        }
    };
    let sym = settings.currency_symbol.as_str();
    let progress = ledger::budget_progress(spent, budget.limit_amount);
    let scope = budget
        .category
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "Monthly".into());

    println!("{scope} Budget - {}", budget.month);
    println!("{}", "─".repeat(40));
    println!("  {} {progress:.0}%", progress_bar(progress, BAR_WIDTH));
    println!("  Spent:      {}", format_amount(spent, sym));
    println!("  Limit:      {}", format_amount(budget.limit_amount, sym));
    if budget.is_exceeded(spent) {
        println!(
            "  Over by:    {}",
            format_amount(-budget.remaining(spent), sym)
        );
    } else {
        println!("  Remaining:  {}", format_amount(budget.remaining(spent), sym));
    }
    Ok(())
}

fn cli_friends(store: &TransactionStore, settings: &Settings) -> Result<()> {
    let friends = store.friends();
    let sym = settings.currency_symbol.as_str();
    if friends.is_empty() {
        println!("No friends yet");
        return Ok(());
    }

    println!("Friends");
    println!("{}", "─".repeat(40));
    for friend in friends {
        let status = match friend.direction() {
            BalanceDirection::OwesYou => format!("owes you {}", format_amount(friend.owes, sym)),
            BalanceDirection::YouOwe => format!("you owe {}", format_amount(friend.owes.abs(), sym)),
            BalanceDirection::Even => "settled up".to_string(),
        };
        println!("  {} {:<12} {status}", friend.avatar, friend.name);
    }
    println!();
    println!(
        "  Net:        {}",
        format_signed(FriendBalance::net(friends), sym)
    );
    Ok(())
}

fn cli_profile(store: &TransactionStore, settings: &Settings, now: DateTime<Utc>) -> Result<()> {
    let snapshot = store.snapshot();
    let totals = ledger::totals(&snapshot);
    let sym = settings.currency_symbol.as_str();
    let recurring = snapshot.iter().filter(|t| t.is_recurring).count();
    let incomes = snapshot.iter().filter(|t| t.is_income()).count();
    let dues = snapshot
        .iter()
        .filter(|t| t.kind == TransactionType::Due)
        .count();

    println!("Profile");
    println!("{}", "─".repeat(40));
    println!("  Transactions:   {} ({incomes} income)", store.len());
    println!("  Income:         {}", format_amount(totals.total_income, sym));
    println!("  Spent:          {}", format_amount(totals.total_expenses, sym));
    println!("  Saved:          {}", format_signed(totals.savings(), sym));
    println!("  Recurring:      {recurring}");
    println!("  Open dues:      {dues}");
    println!(
        "  Fines accrued:  {}",
        format_amount(ledger::total_accrued_fines(&snapshot, now.date_naive()), sym)
    );
    println!("  Friends:        {}", store.friends().len());
    println!("  Monthly budget: {}", format_amount(settings.monthly_budget, sym));
    println!("  Currency:       {sym}");
    Ok(())
}

/// Walk the uncategorized records. With no `steps` the built-in rules
/// suggest a category for each; otherwise each step is a category name,
/// `skip`, `next` or `back`, applied in order.
fn cli_review(rest: &[&str], store: &TransactionStore) -> Result<()> {
    let snapshot = store.snapshot();
    let mut queue = ReviewQueue::new(ledger::uncategorized(&snapshot));
    if queue.is_empty() {
        println!("Nothing to review - every transaction has a category");
        return Ok(());
    }
    let (_, total) = queue.position();
    println!("Review - {total} uncategorized");
    println!("{}", "─".repeat(60));

    if rest.is_empty() {
        suggest_all(&mut queue, &snapshot, total);
    } else {
        for step in rest {
            match step.to_lowercase().as_str() {
                "skip" | "s" => queue.skip(),
                "next" | "n" => queue.next(),
                "back" | "b" | "previous" => queue.previous(),
                _ => queue.categorize(Category::parse(step)),
            }
        }
    }

    println!();
    for (id, category) in queue.decisions() {
        let desc = snapshot
            .iter()
            .find(|t| t.id == *id)
            .map(|t| truncate(&t.description, 28))
            .unwrap_or_default();
        println!("  #{id:<4} {desc:<28} → {} {category}", category.emoji());
    }
    println!(
        "Categorized {}/{total}; records are unchanged",
        queue.decisions().len()
    );
    Ok(())
}

fn suggest_all(queue: &mut ReviewQueue, snapshot: &[Transaction], total: usize) {
    let (categorizer, bad_patterns) = Categorizer::new(&categorize::default_rules());
    if !bad_patterns.is_empty() {
        eprintln!(
            "Warning: invalid regex rule(s): {}",
            bad_patterns.join(", ")
        );
    }
    let suggestions: HashMap<i64, Category> = categorizer.suggest_batch(snapshot).into_iter().collect();

    for _ in 0..total {
        let Some(txn) = queue.current().cloned() else {
            break;
        };
        let (pos, _) = queue.position();
        match suggestions.get(&txn.id) {
            Some(category) => queue.categorize(category.clone()),
            None => {
                println!(
                    "  [{pos}/{total}] {:<28} no match, try rule \"{}\"",
                    truncate(&txn.description, 28),
                    categorize::suggest_rule(&txn.description)
                );
                queue.skip();
            }
        }
    }
}

/// Build the add-transaction form from `add` flags. Without `--category` the
/// built-in rules guess one from the merchant or description.
pub(crate) fn form_from_args(args: &[String]) -> TransactionForm {
    let value = |flag: &str| flag_value(args, flag).unwrap_or_default().to_string();
    let mut form = TransactionForm {
        amount: value("--amount"),
        description: value("--desc"),
        category: value("--category").to_lowercase(),
        kind: value("--type"),
        upi_id: value("--upi"),
        merchant: value("--merchant"),
        notes: value("--notes"),
        split_with: value("--split"),
        due_date: value("--due"),
        fine_per_day: value("--fine"),
        is_recurring: args.iter().any(|a| a == "--recurring"),
    };

    if form.category.trim().is_empty() {
        let (categorizer, _) = Categorizer::new(&categorize::default_rules());
        let guess = [form.merchant.as_str(), form.description.as_str()]
            .iter()
            .find_map(|text| categorizer.categorize(text))
            .cloned()
            .unwrap_or(Category::Other);
        form.category = guess.form_id().unwrap_or("other").to_string();
    }
    form
}

fn cli_add(
    args: &[String],
    state: &mut ViewState,
    store: &mut TransactionStore,
    settings: &Settings,
    file: Option<&Path>,
    now: DateTime<Utc>,
) -> Result<()> {
    state.open_form();
    let form = form_from_args(args);
    let new = form
        .validate(now.date_naive())
        .context("Could not add transaction")?;
    let id = store.add(new, now);
    state.close_form();

    let sym = settings.currency_symbol.as_str();
    if let Some(txn) = store.get(id) {
        println!(
            "Added #{id}: {} {} {} ({})",
            txn.emoji(),
            txn.description,
            format_signed(txn.signed_amount(), sym),
            txn.category
        );
        if let Some(share) = txn.split_share() {
            println!("  Your share: {}", format_amount(share, sym));
        }
    }

    match file {
        Some(path) => {
            let count = csvfile::write_csv(path, &store.snapshot())?;
            println!("Saved {count} transactions to {}", path.display());
        }
        None => println!("Demo data is not saved; pass --file <ledger.csv> to keep it"),
    }
    Ok(())
}

fn cli_export(rest: &[&str], store: &TransactionStore, now: DateTime<Utc>) -> Result<()> {
    let output_path = rest.first().map(|a| shellexpand(a)).unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/pocketledger-export-{}.csv", now.format("%Y-%m-%d"))
    });

    let count = csvfile::write_csv(Path::new(&output_path), &store.snapshot())?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
