use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::constants::INVALID_EMAIL_ERROR;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Permissive `local@domain.tld` shape check. No DNS or mailbox lookup.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// An email that passed validation, together with its lowercased uniqueness key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEmail {
    key: String,
    original: String,
}

impl NormalizedEmail {
    /// Lowercased form used as the storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The address as submitted, original casing kept.
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl std::fmt::Display for NormalizedEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}

fn email_error(code: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(INVALID_EMAIL_ERROR.into());
    err
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(email_error("required"));
    }
    if !is_valid_email(email) {
        return Err(email_error("invalid_email_format"));
    }
    Ok(())
}

/// Validates `raw` exactly as given. Surrounding whitespace is a shape
/// failure here; input fields trim before calling this.
pub fn validate_and_normalize(raw: &str) -> Result<NormalizedEmail, ValidationError> {
    validate_email(raw)?;

    Ok(NormalizedEmail {
        key: raw.to_lowercase(),
        original: raw.to_string(),
    })
}
