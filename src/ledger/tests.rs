#![allow(clippy::unwrap_used)]

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::NewTransaction;

fn make_txn(id: i64, amount: Decimal, kind: TransactionType, category: Category) -> Transaction {
    NewTransaction::new(format!("txn {id}"), amount, kind, category)
        .into_transaction(id, Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap())
}

fn expense(id: i64, amount: Decimal, category: Category) -> Transaction {
    make_txn(id, amount, TransactionType::Expense, category)
}

fn sample() -> Vec<Transaction> {
    vec![
        expense(1, dec!(350), Category::Food),
        expense(2, dec!(150), Category::Transport),
        make_txn(
            3,
            dec!(5000),
            TransactionType::Income,
            Category::Custom("Family".into()),
        ),
    ]
}

// ── totals ────────────────────────────────────────────────────

#[test]
fn test_totals_sample() {
    let t = totals(&sample());
    assert_eq!(t.total_expenses, dec!(500));
    assert_eq!(t.total_income, dec!(5000));
    assert_eq!(t.net_amount, dec!(4500));
    assert_eq!(t.savings(), dec!(4500));
}

#[test]
fn test_totals_empty() {
    assert_eq!(totals(&[]), Totals::default());
}

#[test]
fn test_totals_ignore_due_and_split() {
    let txns = vec![
        expense(1, dec!(100), Category::Food),
        make_txn(2, dec!(999), TransactionType::Due, Category::Rent),
        make_txn(3, dec!(300), TransactionType::Split, Category::Food),
    ];
    let t = totals(&txns);
    assert_eq!(t.total_expenses, dec!(100));
    assert_eq!(t.total_income, Decimal::ZERO);
    assert_eq!(t.net_amount, dec!(-100));
}

#[test]
fn test_net_is_income_minus_expenses() {
    let txns = vec![
        expense(1, dec!(12.50), Category::Food),
        make_txn(2, dec!(40.25), TransactionType::Income, Category::Other),
        expense(3, dec!(7.75), Category::Bills),
        make_txn(4, dec!(1.10), TransactionType::Income, Category::Other),
    ];
    let t = totals(&txns);
    assert_eq!(t.net_amount, t.total_income - t.total_expenses);
    assert_eq!(t.net_amount, dec!(21.10));
}

// ── category_rollup ───────────────────────────────────────────

#[test]
fn test_rollup_sample() {
    let rollup = category_rollup(&sample());
    assert_eq!(
        rollup,
        vec![
            CategoryTotal {
                category: Category::Food,
                total: dec!(350),
                count: 1
            },
            CategoryTotal {
                category: Category::Transport,
                total: dec!(150),
                count: 1
            },
        ]
    );
}

#[test]
fn test_rollup_groups_and_counts() {
    let txns = vec![
        expense(1, dec!(100), Category::Food),
        expense(2, dec!(50), Category::Transport),
        expense(3, dec!(25), Category::Food),
        expense(4, dec!(500), Category::Rent),
    ];
    let rollup = category_rollup(&txns);
    let names: Vec<&str> = rollup.iter().map(|e| e.category.as_str()).collect();
    assert_eq!(names, vec!["Rent", "Food", "Transport"]);
    assert_eq!(rollup[1].total, dec!(125));
    assert_eq!(rollup[1].count, 2);
}

#[test]
fn test_rollup_merges_custom_labels_across_case() {
    let txns = vec![
        expense(1, dec!(300), Category::Custom("Family".into())),
        expense(2, dec!(200), Category::parse("family")),
    ];
    let rollup = category_rollup(&txns);
    assert_eq!(rollup.len(), 1);
    assert_eq!(rollup[0].category.as_str(), "Family");
    assert_eq!(rollup[0].total, dec!(500));
    assert_eq!(rollup[0].count, 2);
}

#[test]
fn test_rollup_ties_keep_first_seen_order() {
    let txns = vec![
        expense(1, dec!(50), Category::Shopping),
        expense(2, dec!(50), Category::Bills),
        expense(3, dec!(80), Category::Health),
        expense(4, dec!(50), Category::Education),
    ];
    let rollup = category_rollup(&txns);
    let names: Vec<&str> = rollup.iter().map(|e| e.category.as_str()).collect();
    assert_eq!(names, vec!["Health", "Shopping", "Bills", "Education"]);
}

#[test]
fn test_rollup_totals_sum_to_total_expenses() {
    let txns = vec![
        expense(1, dec!(10.10), Category::Food),
        make_txn(2, dec!(99), TransactionType::Income, Category::Other),
        expense(3, dec!(20.20), Category::Custom("Gifts".into())),
        make_txn(4, dec!(7), TransactionType::Split, Category::Food),
        expense(5, dec!(30.30), Category::Food),
        expense(6, dec!(0), Category::Uncategorized),
    ];
    let sum: Decimal = category_rollup(&txns).iter().map(|e| e.total).sum();
    assert_eq!(sum, totals(&txns).total_expenses);
}

#[test]
fn test_rollup_empty_and_income_only() {
    assert!(category_rollup(&[]).is_empty());
    let incomes = vec![make_txn(1, dec!(10), TransactionType::Income, Category::Other)];
    assert!(category_rollup(&incomes).is_empty());
}

#[test]
fn test_rollup_colors_fall_back() {
    let txns = vec![
        expense(1, dec!(10), Category::Food),
        expense(2, dec!(5), Category::Custom("Gifts".into())),
    ];
    let rollup = category_rollup(&txns);
    assert_eq!(rollup[0].color(), "#FF8042");
    assert_eq!(rollup[0].emoji(), "🍕");
    assert_eq!(rollup[1].color(), "#95A5A6");
    assert_eq!(rollup[1].emoji(), "💰");
}

#[test]
fn test_rollup_does_not_touch_input() {
    let txns = sample();
    let before = txns.clone();
    let _ = category_rollup(&txns);
    assert_eq!(txns, before);
}

// ── percent_of_total ──────────────────────────────────────────

#[test]
fn test_percent_basic() {
    assert_eq!(percent_of_total(dec!(350), dec!(500)), 70);
    assert_eq!(percent_of_total(dec!(150), dec!(500)), 30);
}

#[test]
fn test_percent_rounds_half_up() {
    assert_eq!(percent_of_total(dec!(1), dec!(8)), 13);
    assert_eq!(percent_of_total(dec!(1), dec!(3)), 33);
    assert_eq!(percent_of_total(dec!(2), dec!(3)), 67);
}

#[test]
fn test_percent_zero_grand_total() {
    assert_eq!(percent_of_total(Decimal::ZERO, Decimal::ZERO), 0);
    assert_eq!(percent_of_total(dec!(42), Decimal::ZERO), 0);
}

#[test]
fn test_percent_stays_in_bounds() {
    assert_eq!(percent_of_total(dec!(150), dec!(100)), 100);
    assert_eq!(percent_of_total(dec!(100), dec!(100)), 100);
}

// ── filter_by_category ────────────────────────────────────────

#[test]
fn test_filter_all_is_identity() {
    let txns = sample();
    assert_eq!(filter_by_category(&txns, &CategoryFilter::All), txns);
}

#[test]
fn test_filter_only_preserves_order() {
    let txns = vec![
        expense(1, dec!(1), Category::Food),
        expense(2, dec!(2), Category::Transport),
        expense(3, dec!(3), Category::Food),
    ];
    let ids: Vec<i64> = filter_by_category(&txns, &CategoryFilter::Only(Category::Food))
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_filter_no_match() {
    let filtered = filter_by_category(&sample(), &CategoryFilter::Only(Category::Health));
    assert!(filtered.is_empty());
}

#[test]
fn test_filter_custom_label_ignores_case() {
    for raw in ["family", "FAMILY", "Family"] {
        let filtered = filter_by_category(&sample(), &CategoryFilter::parse(raw));
        let ids: Vec<i64> = filtered.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3], "filter {raw}");
    }
}

#[test]
fn test_filter_parse() {
    assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
    assert_eq!(
        CategoryFilter::parse("food"),
        CategoryFilter::Only(Category::Food)
    );
    assert_eq!(
        CategoryFilter::parse("Family"),
        CategoryFilter::Only(Category::Custom("Family".into()))
    );
    assert_eq!(format!("{}", CategoryFilter::All), "all");
}

// ── budget_progress ───────────────────────────────────────────

#[test]
fn test_budget_progress_clamped() {
    assert_eq!(budget_progress(dec!(15000), dec!(10000)), dec!(100));
    assert_eq!(budget_progress(dec!(12450), dec!(10000)), dec!(100));
}

#[test]
fn test_budget_progress_partial() {
    assert_eq!(budget_progress(dec!(2500), dec!(10000)), dec!(25));
    assert_eq!(budget_progress(Decimal::ZERO, dec!(10000)), Decimal::ZERO);
}

#[test]
fn test_budget_progress_zero_budget() {
    assert_eq!(budget_progress(dec!(10), Decimal::ZERO), Decimal::ZERO);
}

// ── uncategorized / periods / fines ───────────────────────────

#[test]
fn test_uncategorized() {
    let txns = vec![
        expense(1, dec!(1), Category::Uncategorized),
        expense(2, dec!(2), Category::Food),
        expense(3, dec!(3), Category::Uncategorized),
    ];
    let ids: Vec<i64> = uncategorized(&txns).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_within_period() {
    let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
    let mut recent = expense(1, dec!(1), Category::Food);
    recent.created_at = now - Duration::days(3);
    let mut last_month = expense(2, dec!(2), Category::Food);
    last_month.created_at = now - Duration::days(20);
    let mut old = expense(3, dec!(3), Category::Food);
    old.created_at = now - Duration::days(200);
    let txns = vec![recent, last_month, old];

    let ids = |p: Period| -> Vec<i64> {
        within_period(&txns, p, now).iter().map(|t| t.id).collect()
    };
    assert_eq!(ids(Period::Week), vec![1]);
    assert_eq!(ids(Period::Month), vec![1, 2]);
    assert_eq!(ids(Period::Quarter), vec![1, 2]);
    assert_eq!(ids(Period::Year), vec![1, 2, 3]);
}

#[test]
fn test_period_labels() {
    assert_eq!(Period::default(), Period::Month);
    assert_eq!(Period::Quarter.label(), "3 Months");
    assert_eq!(Period::parse("year"), Some(Period::Year));
    assert_eq!(Period::parse("decade"), None);
    assert_eq!(Period::all().len(), 4);
}

#[test]
fn test_total_accrued_fines() {
    let mut due = make_txn(1, dec!(500), TransactionType::Due, Category::Education);
    due.due_date = NaiveDate::from_ymd_opt(2024, 3, 1);
    due.fine_per_day = Some(dec!(5));
    let txns = vec![due, expense(2, dec!(10), Category::Food)];
    let today = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
    assert_eq!(total_accrued_fines(&txns, today), dec!(50));
}
