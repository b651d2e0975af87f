//! Form-field validators
//!
//! These are permissive shape checks for form input, not authoritative validation: the
//! email pattern accepts any single-dot domain, the UPI check knows no handle list, and
//! the IFSC check does not consult a bank registry. Every check returns `false` on
//! malformed input instead of erroring.

use once_cell::sync::OnceCell;
use regex::Regex;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceCell<Regex> = OnceCell::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn upi_regex() -> &'static Regex {
    static UPI: OnceCell<Regex> = OnceCell::new();
    UPI.get_or_init(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z]+$").unwrap())
}

fn bank_account_regex() -> &'static Regex {
    static ACCOUNT: OnceCell<Regex> = OnceCell::new();
    ACCOUNT.get_or_init(|| Regex::new(r"^[0-9]{9,18}$").unwrap())
}

fn ifsc_regex() -> &'static Regex {
    static IFSC: OnceCell<Regex> = OnceCell::new();
    IFSC.get_or_init(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").unwrap())
}

/// `local@domain.tld`, none of the parts containing whitespace or `@`
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// At least 8 characters with at least one ASCII letter and one digit
pub fn is_valid_password(password: &str) -> bool {
    // length counted in UTF-16 code units, as browsers count it
    if password.encode_utf16().count() < 8 {
        return false;
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_number = password.chars().any(|c| c.is_ascii_digit());
    has_letter && has_number
}

/// UPI virtual payment address, e.g. `name.surname@okbank`
pub fn is_valid_upi(upi: &str) -> bool {
    upi_regex().is_match(upi)
}

/// 9 to 18 decimal digits
pub fn is_valid_bank_account(account: &str) -> bool {
    bank_account_regex().is_match(account)
}

/// Four uppercase letters, a literal `0`, then six uppercase letters or digits
pub fn is_valid_ifsc(ifsc: &str) -> bool {
    ifsc_regex().is_match(ifsc)
}
