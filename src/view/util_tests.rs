#![allow(clippy::unwrap_used)]

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_whole() {
    assert_eq!(format_amount(dec!(12450), "₹"), "₹12,450");
    assert_eq!(format_amount(dec!(350), "₹"), "₹350");
}

#[test]
fn test_format_amount_fraction() {
    assert_eq!(format_amount(dec!(1234567.5), "$"), "$1,234,567.50");
    assert_eq!(format_amount(dec!(0.01), "₹"), "₹0.01");
}

#[test]
fn test_format_amount_trailing_zero_scale() {
    assert_eq!(format_amount(dec!(5000.00), "₹"), "₹5,000");
}

#[test]
fn test_format_amount_rounds_to_cents() {
    assert_eq!(format_amount(dec!(12.345), "₹"), "₹12.35");
    assert_eq!(format_amount(dec!(0.999), "₹"), "₹1");
    assert_eq!(format_amount(dec!(999999.995), "₹"), "₹1,000,000");
    assert_eq!(format_amount(dec!(100000), "₹"), "₹100,000");
}

#[test]
fn test_format_amount_negative_and_zero() {
    assert_eq!(format_amount(dec!(-200), "₹"), "-₹200");
    assert_eq!(format_amount(Decimal::ZERO, "₹"), "₹0");
}

#[test]
fn test_format_signed() {
    assert_eq!(format_signed(dec!(4500), "₹"), "+₹4,500");
    assert_eq!(format_signed(dec!(-2450), "₹"), "-₹2,450");
    assert_eq!(format_signed(Decimal::ZERO, "₹"), "+₹0");
}

// ── relative_time ─────────────────────────────────────────────

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 18, 0, 0).unwrap()
}

#[test]
fn test_relative_just_now() {
    assert_eq!(relative_time(now(), now()), "Just now");
    assert_eq!(relative_time(now() - Duration::seconds(30), now()), "Just now");
}

#[test]
fn test_relative_future_is_just_now() {
    assert_eq!(relative_time(now() + Duration::hours(1), now()), "Just now");
}

#[test]
fn test_relative_minutes_hours_days() {
    assert_eq!(relative_time(now() - Duration::minutes(1), now()), "1 minute ago");
    assert_eq!(relative_time(now() - Duration::minutes(45), now()), "45 minutes ago");
    assert_eq!(relative_time(now() - Duration::hours(2), now()), "2 hours ago");
    assert_eq!(relative_time(now() - Duration::hours(5), now()), "5 hours ago");
    assert_eq!(relative_time(now() - Duration::days(1), now()), "1 day ago");
    assert_eq!(relative_time(now() - Duration::days(12), now()), "12 days ago");
}

#[test]
fn test_relative_old_shows_date() {
    assert_eq!(relative_time(now() - Duration::days(45), now()), "18 Jul 2024");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Zomato Food Order", 7), "Zomato…");
}

#[test]
fn test_truncate_exact_length_and_one() {
    assert_eq!(truncate("hello", 5), "hello");
    assert_eq!(truncate("hello", 4), "hel…");
    assert_eq!(truncate("hello", 1), "…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_emoji() {
    assert_eq!(truncate("🍕🚗🏠🎬", 3), "🍕🚗…");
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar() {
    assert_eq!(progress_bar(Decimal::ZERO, 4), "[░░░░]");
    assert_eq!(progress_bar(dec!(50), 4), "[██░░]");
    assert_eq!(progress_bar(dec!(100), 4), "[████]");
}

#[test]
fn test_progress_bar_clamps() {
    assert_eq!(progress_bar(dec!(150), 4), "[████]");
    assert_eq!(progress_bar(dec!(-5), 4), "[░░░░]");
}
