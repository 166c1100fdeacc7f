//! Input validation helpers
//!
//! Centralized text length constants and validation functions for the
//! draft save path.

use shared::error::{AppError, AppResult};

// ── Text length limits ──────────────────────────────────────────────

/// Part numbers and rate codes
pub const MAX_CODE_LEN: usize = 64;

/// Labor, part and charge descriptions
pub const MAX_DESCRIPTION_LEN: usize = 200;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_field(field));
    }
    validate_text(value, field, max_len)
}

/// Validate that a string is within the length limit.
pub fn validate_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_field(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Brake job", "description", MAX_DESCRIPTION_LEN).is_ok());
        assert!(validate_required_text("  ", "description", MAX_DESCRIPTION_LEN).is_err());
    }

    #[test]
    fn test_text_length() {
        let long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        let err = validate_text(&long, "description", MAX_DESCRIPTION_LEN).unwrap_err();
        assert_eq!(err.field(), Some("description"));
    }
}
