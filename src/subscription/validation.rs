// Synchronous validation of raw form input
//
// The email check is a shape heuristic, not RFC 5322 validation.

use regex::Regex;
use std::sync::LazyLock;

use super::errors::SubmissionError;
use super::types::{RawSubmission, SubmissionAttempt};

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape pattern is valid")
});

/// Returns true when `email` looks like `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Non-empty as supplied; whitespace counts as a value
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Validate raw input, first failure wins.
///
/// 1. presence: name non-empty after trimming, email and consent non-empty
/// 2. email shape, checked against the email exactly as supplied
pub fn validate(raw: &RawSubmission) -> Result<SubmissionAttempt, SubmissionError> {
    let (Some(name), Some(email), Some(_)) = (
        present(&raw.name).map(str::trim).filter(|n| !n.is_empty()),
        present(&raw.email),
        present(&raw.consent),
    ) else {
        return Err(SubmissionError::MissingFields);
    };

    if !is_valid_email(email) {
        return Err(SubmissionError::InvalidEmailShape);
    }

    Ok(SubmissionAttempt {
        name: name.to_string(),
        email: email.to_string(),
        consent: true,
    })
}
