// Validation utilities module
// Provides custom validation functions for user account rules

use validator::ValidationError;

/// Minimum accepted password length
pub const PASSWORD_MIN_LEN: usize = 8;

/// Maximum accepted password length
pub const PASSWORD_MAX_LEN: usize = 64;

/// Validates that an email address is well formed
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if validator::validate_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_email"))
    }
}

/// Validates the password strength policy
/// Requires 8 to 64 ASCII letters or digits with at least one uppercase letter,
/// one lowercase letter and one digit
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(ValidationError::new("password_length"));
    }

    if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new("password_charset"));
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("password_too_weak"))
    }
}

/// Validates that a required text field is not blank
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// Parses a boolean the way query strings usually spell it
/// Accepts 1, t, T, TRUE, true, True and 0, f, F, FALSE, false, False
pub fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
