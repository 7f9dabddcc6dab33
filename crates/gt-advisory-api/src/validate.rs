//! Caller-supplied identifier validation.
//!
//! Pure syntactic checks, no network or storage access. Checks fire in
//! a fixed order and short-circuit on the first failure.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

/// Allowed identifier shape: letters, numbers, underscores, hyphens.
static USER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid user_id pattern"));

/// Maximum identifier length after trimming.
pub const MAX_USER_ID_LEN: usize = 50;

/// Why an identifier was rejected. Variant order is the check order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'user_id' field is required in the request body.")]
    Missing,

    #[error("'user_id' must be a string.")]
    NotAString,

    #[error("'user_id' cannot be empty or contain only whitespace.")]
    Empty,

    #[error(
        "'user_id' contains invalid characters. Only letters, numbers, underscores, and hyphens are allowed."
    )]
    InvalidChars,

    #[error("'user_id' must be 50 characters or less.")]
    TooLong,
}

/// Validate a caller-supplied identifier value.
///
/// On success returns the trimmed identifier — the trimmed value, not
/// the original, is what downstream code uses.
pub fn validate_user_id(value: &Value) -> Result<String, ValidationError> {
    if value.is_null() {
        return Err(ValidationError::Missing);
    }
    let Some(raw) = value.as_str() else {
        return Err(ValidationError::NotAString);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !USER_ID_PATTERN.is_match(trimmed) {
        return Err(ValidationError::InvalidChars);
    }
    if trimmed.len() > MAX_USER_ID_LEN {
        return Err(ValidationError::TooLong);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_identifiers() {
        let max_len = "x".repeat(50);
        for id in ["testuser1", "a", "user_42", "USER-42", "_", "-", max_len.as_str()] {
            let result = validate_user_id(&json!(id));
            assert_eq!(result.as_deref(), Ok(id), "should accept {id:?}");
        }
    }

    #[test]
    fn returns_trimmed_value() {
        assert_eq!(
            validate_user_id(&json!("  abc123  ")).unwrap(),
            "abc123"
        );
    }

    #[test]
    fn missing_identifier() {
        assert_eq!(
            validate_user_id(&Value::Null).unwrap_err(),
            ValidationError::Missing
        );
    }

    #[test]
    fn non_string_identifier() {
        assert_eq!(
            validate_user_id(&json!(42)).unwrap_err(),
            ValidationError::NotAString
        );
        assert_eq!(
            validate_user_id(&json!(["abc"])).unwrap_err(),
            ValidationError::NotAString
        );
    }

    #[test]
    fn empty_or_whitespace() {
        assert_eq!(validate_user_id(&json!("")).unwrap_err(), ValidationError::Empty);
        assert_eq!(
            validate_user_id(&json!("   \t ")).unwrap_err(),
            ValidationError::Empty
        );
    }

    #[test]
    fn invalid_characters() {
        for id in ["user@invalid", "user name", "user.name", "émile", "a/b"] {
            assert_eq!(
                validate_user_id(&json!(id)).unwrap_err(),
                ValidationError::InvalidChars,
                "should reject {id:?}"
            );
        }
    }

    #[test]
    fn too_long() {
        let id = "x".repeat(51);
        assert_eq!(
            validate_user_id(&json!(id)).unwrap_err(),
            ValidationError::TooLong
        );
    }

    #[test]
    fn checks_fire_in_priority_order() {
        // Whitespace-only trips the empty check, not invalid characters.
        assert_eq!(
            validate_user_id(&json!("   ")).unwrap_err(),
            ValidationError::Empty
        );
        // Over-long AND invalid trips invalid characters first.
        let id = format!("{}@", "x".repeat(60));
        assert_eq!(
            validate_user_id(&json!(id)).unwrap_err(),
            ValidationError::InvalidChars
        );
    }

    #[test]
    fn length_measured_after_trim() {
        let id = format!("  {}  ", "x".repeat(50));
        assert_eq!(validate_user_id(&json!(id)).unwrap(), "x".repeat(50));
    }

    #[test]
    fn reason_wording_is_stable() {
        assert!(ValidationError::Missing.to_string().contains("required"));
        assert!(
            ValidationError::InvalidChars
                .to_string()
                .contains("invalid characters")
        );
        assert!(ValidationError::Empty.to_string().contains("empty"));
    }
}
