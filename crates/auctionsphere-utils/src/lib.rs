//! Utility functions and helpers

pub mod format;
pub mod validators;

use chrono::Utc;
use rand::Rng;

pub use format::{format_amount, format_currency, format_date_time, format_date_time_in, group_indian};
pub use validators::{
    is_valid_bank_account, is_valid_email, is_valid_ifsc, is_valid_password, is_valid_upi,
};

const BASE36_DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Encode an unsigned integer in lowercase base 36
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut result = Vec::new();
    while n > 0 {
        result.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    result.reverse();
    String::from_utf8(result).unwrap_or_default()
}

/// Generate a unique ID
///
/// Base-36 millisecond timestamp followed by 52 random bits in base 36. Collisions are
/// possible and nothing checks for them.
pub fn generate_id() -> String {
    let now = Utc::now().timestamp_millis().max(0) as u64;
    let mut rng = rand::thread_rng();
    let noise: u64 = rng.gen_range(1..(1u64 << 52));
    format!("{}{}", to_base36(now), to_base36(noise))
}
