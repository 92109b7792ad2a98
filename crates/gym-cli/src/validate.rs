use thiserror::Error as ThisError;

use gym_domain::Amount;

/// Input rejected before it reaches the store.
#[derive(ThisError, Debug, PartialEq)]
pub enum ValidationError {
    #[error("'{0}' is not a valid email address")]
    Email(String),
    #[error("'{0}' is not a valid phone number (at least 10 digits)")]
    Phone(String),
    #[error("'{0}' is not a valid amount")]
    Amount(String),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Something, an @, something with a dot in it. No whitespace.
pub fn email(value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::Email(value.to_string());
    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Digits, spaces and `-+()` only, with at least ten digits.
pub fn phone(value: &str) -> Result<(), ValidationError> {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if value.is_empty() || !allowed || digits < 10 {
        return Err(ValidationError::Phone(value.to_string()));
    }
    Ok(())
}

/// A finite, non-negative number.
pub fn amount(value: &str) -> Result<Amount, ValidationError> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| ValidationError::Amount(value.to_string()))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(ValidationError::Amount(value.to_string()));
    }
    Ok(Amount::Number(parsed))
}

pub fn not_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(())
}
