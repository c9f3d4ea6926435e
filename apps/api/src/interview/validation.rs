//! Field validators. Pure functions: each returns `Ok(())` or the reason the
//! answer was rejected, which the controller shows to the candidate as-is.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field cannot be empty. Please provide the required information.")]
    Empty,

    #[error("Please provide your full name (at least 2 characters).")]
    NameTooShort,

    #[error("Please provide a valid email address (e.g., user@example.com).")]
    InvalidEmail,

    #[error("Please provide a valid phone number (e.g., +1234567890 or 1234567890).")]
    InvalidPhone,

    #[error("Please provide a valid number for years of experience (e.g., 2, 3.5).")]
    NotANumber,

    #[error("Please provide a valid number of years (0-50).")]
    OutOfRange,
}

pub type Validator = fn(&str) -> Result<(), ValidationError>;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$";
const PHONE_PATTERN: &str = r"^(?:\+?[1-9][0-9]{3,14}|[0-9]{10})$";

const MIN_NAME_CHARS: usize = 2;
const MAX_EXPERIENCE_YEARS: f64 = 50.0;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is valid"))
}

pub fn validate_non_empty(s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(())
}

/// Names need at least two characters once trimmed.
pub fn validate_full_name(s: &str) -> Result<(), ValidationError> {
    if s.trim().chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

pub fn validate_email(s: &str) -> Result<(), ValidationError> {
    if email_regex().is_match(s) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Spaces and hyphens are ignored. Accepts ten plain digits, or an optional
/// `+`, a non-zero digit and 3 to 14 more digits.
pub fn validate_phone(s: &str) -> Result<(), ValidationError> {
    let compact: String = s.chars().filter(|c| *c != ' ' && *c != '-').collect();
    if phone_regex().is_match(&compact) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

pub fn validate_experience_years(s: &str) -> Result<(), ValidationError> {
    let years: f64 = s.trim().parse().map_err(|_| ValidationError::NotANumber)?;
    // NaN fails the range check too.
    if !(0.0..=MAX_EXPERIENCE_YEARS).contains(&years) {
        return Err(ValidationError::OutOfRange);
    }
    Ok(())
}

/// Free-text fields need nothing beyond the non-empty check.
pub fn validate_free_text(_: &str) -> Result<(), ValidationError> {
    Ok(())
}

/// Runs the non-empty check, then `validator` on the trimmed value.
pub fn check(validator: Validator, raw: &str) -> Result<(), ValidationError> {
    validate_non_empty(raw)?;
    validator(raw.trim())
}
