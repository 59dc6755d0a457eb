use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::errors::DomainError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").unwrap());

/// Canonical form used for storage and every email comparison.
pub fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() || !EMAIL_RE.is_match(&email) {
        return Err(DomainError::InvalidEmail);
    }
    Ok(email)
}

pub fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
