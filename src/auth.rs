//! Patient credential rules and password hashing.
//!
//! Validation happens before any row is written; emails are stored in
//! normalized form (trimmed, lowercased) so lookups are exact matches.

use std::sync::LazyLock;

use base64::Engine;
use regex::Regex;
use sha2::{Digest, Sha256};

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 8;

/// Registration input that passed validation: trimmed name, normalized
/// email. The password stays with the caller for hashing.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
}

/// Validate registration input, returning the first violated rule as a
/// user-facing message.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
) -> Result<ValidRegistration, String> {
    let name = name.trim();
    if name.chars().count() < MIN_NAME_LEN {
        return Err("Name must be at least 2 characters long".into());
    }

    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err("Email address is not valid".into());
    }

    if !is_strong_password(password) {
        return Err(
            "Password must be at least 8 characters and contain an uppercase letter, \
             a lowercase letter, a digit and a special character"
                .into(),
        );
    }

    Ok(ValidRegistration {
        name: name.to_string(),
        email,
    })
}

/// Trim and lowercase. Both storage and lookup use this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least 8 characters with an ASCII lowercase letter, an ASCII
/// uppercase letter, a digit and one character that is none of those.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

/// SHA-256 of the password, standard Base64.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(hasher.finalize())
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}
