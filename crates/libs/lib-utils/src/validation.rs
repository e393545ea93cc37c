//! # Validation Utilities
//!
//! Input validation helpers. Messages are user-facing (Vietnamese).

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} không được để trống", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format (basic check).
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err("Email không hợp lệ".to_string())
    }
}

/// Validate that a number is zero or positive.
pub fn validate_non_negative(value: i64, field_name: &str) -> Result<(), String> {
    if value < 0 {
        Err(format!("{} không được âm", field_name))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty() {
        assert!(validate_not_empty("thép", "Tên").is_ok());
        assert_eq!(
            validate_not_empty("   ", "Tên"),
            Err("Tên không được để trống".to_string())
        );
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative(0, "Thứ tự").is_ok());
        assert!(validate_non_negative(-1, "Thứ tự").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("admin@thep.vn").is_ok());
        assert!(validate_email("admin").is_err());
    }
}
