//! Format checks applied before a request leaves the client.

use thiserror::Error;

/// Largest file accepted for bulk student import.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shortest password accepted when provisioning or resetting credentials.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be a 10-digit mobile number")]
    InvalidMobile { field: &'static str },

    #[error("{field} must be a 10-digit mobile number starting with 6-9")]
    InvalidIndianMobile { field: &'static str },

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("{0} is required")]
    Required(&'static str),

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("File size must be less than 10MB")]
    FileTooLarge,

    #[error("Please select at least one {0}")]
    EmptySelection(&'static str),

    #[error("Invalid access level: {0}")]
    InvalidAccessLevel(String),
}

/// Exactly ten ASCII digits.
pub fn validate_mobile(mobile: &str) -> bool {
    mobile.len() == 10 && mobile.bytes().all(|b| b.is_ascii_digit())
}

/// Digits of an Indian mobile number (separators ignored), if it has ten
/// digits and starts with 6-9.
pub fn normalize_indian_mobile(mobile: &str) -> Option<String> {
    let digits: String = mobile.chars().filter(char::is_ascii_digit).collect();
    match digits.as_bytes().first() {
        Some(b'6'..=b'9') if digits.len() == 10 => Some(digits),
        _ => None,
    }
}

/// Loose `local@domain.tld` shape check with no whitespace.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    email.match_indices('@').any(|(at, _)| {
        if at == 0 {
            return false;
        }
        let domain = &email[at + 1..];
        domain
            .match_indices('.')
            .any(|(dot, _)| dot > 0 && dot + 1 < domain.len())
    })
}

/// Keeps the first six digits of a 10-digit number; anything else is returned unchanged.
pub fn mask_mobile(mobile: &str) -> String {
    if !validate_mobile(mobile) {
        return mobile.to_string();
    }
    format!("{}****", &mobile[..6])
}

pub fn mask_email(email: &str) -> String {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return email.to_string();
    }
    let visible: String = parts[0].chars().take(3).collect();
    format!("{}***@{}", visible, parts[1])
}

pub(crate) fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

pub(crate) fn require_mobile(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if !validate_mobile(value) {
        return Err(ValidationError::InvalidMobile { field });
    }
    Ok(())
}

/// Contact number on the student and staff forms; returns the bare digits.
pub(crate) fn require_indian_mobile(value: &str, field: &'static str) -> Result<String, ValidationError> {
    normalize_indian_mobile(value).ok_or(ValidationError::InvalidIndianMobile { field })
}

pub(crate) fn require_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}
