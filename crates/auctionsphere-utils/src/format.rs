//! Currency and date/time formatting in the `en-IN` style

use chrono::{DateTime, Local, TimeZone};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a digit string with Indian grouping: the last three digits, then pairs.
///
/// `1234567` becomes `12,34,567`.
pub fn group_indian(digits: &str) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i == 3 || (i > 3 && (i - 3) % 2 == 0) {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format an amount as rupees with Indian grouping and exactly two decimals.
///
/// `1234567.5` becomes `₹12,34,567.50`.
pub fn format_currency(amount: f64) -> String {
    format_amount(amount, "₹", 2)
}

/// Format an amount with an arbitrary symbol and number of decimal places.
///
/// Halves round away from zero. Negative amounts keep the sign after the symbol
/// (`₹-500.00`), and non-finite input renders as `NaN` / `∞`.
pub fn format_amount(amount: f64, symbol: &str, decimal_places: u32) -> String {
    if amount.is_nan() {
        return format!("{}NaN", symbol);
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{}∞", symbol, sign);
    }

    let fixed = match Decimal::from_f64(amount) {
        Some(value) => {
            let mut rounded =
                value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(decimal_places);
            rounded.to_string()
        }
        // Beyond Decimal's range; fall back to float formatting
        None => format!("{:.*}", decimal_places as usize, amount),
    };

    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut result = format!("{}{}{}", symbol, sign, group_indian(int_part));
    if let Some(frac) = frac_part {
        result.push('.');
        result.push_str(frac);
    }
    result
}

/// Format an epoch-millisecond timestamp in the local time zone,
/// e.g. `19 Oct 2026, 02:30 pm`.
pub fn format_date_time(timestamp_ms: i64) -> String {
    format_date_time_in(timestamp_ms, &Local)
}

/// Format an epoch-millisecond timestamp in the given time zone.
///
/// Out-of-range timestamps render as `Invalid Date`.
pub fn format_date_time_in<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(utc) => utc
            .with_timezone(tz)
            .format("%-d %b %Y, %I:%M %P")
            .to_string(),
        None => "Invalid Date".to_string(),
    }
}
