// src/models/validators.rs
// DOCUMENTATION: Field validators shared by request DTOs
// PURPOSE: Rules the derive attributes cannot express directly

use std::borrow::Cow;
use validator::ValidationError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Letters (including Latin-1 accented), whitespace, apostrophes and hyphens
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('\u{C0}'..='\u{FF}').contains(&c)
        || c.is_whitespace()
        || c == '\''
        || c == '-'
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("blank", "must not be blank"));
    }
    Ok(())
}

/// Person and city names
pub fn letters_only(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(is_name_char) {
        return Err(invalid(
            "letters_only",
            "can only contain letters, spaces, apostrophes and hyphens",
        ));
    }
    Ok(())
}

/// At least one lowercase, one uppercase, one digit and one of `@$!%*?&`
pub fn strong_password(value: &str) -> Result<(), ValidationError> {
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| "@$!%*?&".contains(c));

    if has_lower && has_upper && has_digit && has_special {
        Ok(())
    } else {
        Err(invalid(
            "weak_password",
            "must contain uppercase, lowercase, number and special character",
        ))
    }
}

/// 3 to 10 digits
pub fn validate_postal_code(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if !(3..=10).contains(&len) || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("postal_code", "must be 3 to 10 digits"));
    }
    Ok(())
}

/// Empty (automatic) or one to three euro signs
pub fn validate_price_range(value: &str) -> Result<(), ValidationError> {
    match value {
        "" | "€" | "€€" | "€€€" => Ok(()),
        _ => Err(invalid("price_range", "must be empty, €, €€ or €€€")),
    }
}
