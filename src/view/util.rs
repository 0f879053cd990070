use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount with thousand separators, e.g. `12450` → `"₹12,450"`.
/// Whole amounts drop the decimals; anything else shows 2 places.
pub(crate) fn format_amount(val: Decimal, symbol: &str) -> String {
    let rounded = val
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let whole = rounded.trunc();
    let cents = ((rounded - whole) * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or(0);

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    let grouped = group_thousands(&whole.to_string());
    if cents == 0 {
        format!("{sign}{symbol}{grouped}")
    } else {
        format!("{sign}{symbol}{grouped}.{cents:02}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

/// Like `format_amount` but always signed: `+₹4,500` / `-₹200`.
pub(crate) fn format_signed(val: Decimal, symbol: &str) -> String {
    if val >= Decimal::ZERO {
        format!("+{}", format_amount(val, symbol))
    } else {
        format_amount(val, symbol)
    }
}

/// Relative label for an instant: "Just now", "5 minutes ago", "2 hours ago",
/// "1 day ago". Anything older than 30 days shows the date.
pub(crate) fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - then;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if hours < 1 {
        plural(minutes, "minute")
    } else if days < 1 {
        plural(hours, "hour")
    } else if days <= 30 {
        plural(days, "day")
    } else {
        then.format("%d %b %Y").to_string()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Cut `s` down to `max` characters, the last one being "…" when anything
/// was dropped. Counts chars, not bytes.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    let Some(keep) = max.checked_sub(1) else {
        return String::new();
    };
    if s.chars().nth(max).is_none() {
        return s.to_string();
    }
    let cut = s.char_indices().nth(keep).map_or(s.len(), |(at, _)| at);
    format!("{}…", &s[..cut])
}

/// Text progress bar `width` cells wide for a 0..=100 percentage.
pub(crate) fn progress_bar(percent: Decimal, width: usize) -> String {
    let pct = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (pct * Decimal::from(width as u64) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}
