use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::models::*;

/// Demo activity shown on first launch, newest first.
pub(crate) fn transactions(now: DateTime<Utc>) -> Vec<Transaction> {
    let mut zomato = NewTransaction::new(
        "Zomato Food Order".into(),
        Decimal::from(350),
        TransactionType::Expense,
        Category::Food,
    );
    zomato.merchant = Some("Zomato".into());

    let mut uber = NewTransaction::new(
        "Split Uber Ride".into(),
        Decimal::from(150),
        TransactionType::Expense,
        Category::Transport,
    );
    uber.split_with = vec!["Rahul".into(), "Priya".into()];

    let pocket_money = NewTransaction::new(
        "Pocket Money".into(),
        Decimal::from(5000),
        TransactionType::Income,
        Category::Custom("Family".into()),
    );

    vec![
        zomato.into_transaction(1, now - Duration::hours(2)),
        uber.into_transaction(2, now - Duration::hours(5)),
        pocket_money.into_transaction(3, now - Duration::days(1)),
    ]
}

pub(crate) fn friends() -> Vec<FriendBalance> {
    vec![
        FriendBalance::new("Rahul", "👨‍🎓", Decimal::from(450)),
        FriendBalance::new("Priya", "👩‍🎓", Decimal::from(-200)),
        FriendBalance::new("Arjun", "👨‍💻", Decimal::from(300)),
    ]
}
