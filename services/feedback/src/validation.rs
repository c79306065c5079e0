//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate that a field is present
pub fn validate_required(value: &str, label: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{} is required", label));
    }

    Ok(())
}

/// Validate email shape
pub fn validate_email(email: &str) -> Result<(), String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate length bounds
pub fn validate_length(value: &str, label: &str, min: usize, max: usize) -> Result<(), String> {
    if value.len() < min {
        return Err(format!(
            "{} must be at least {} characters long",
            label, min
        ));
    }

    if value.len() > max {
        return Err(format!("{} must be at most {} characters long", label, max));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("alice", "Username").is_ok());
        assert_eq!(
            validate_required("", "Username"),
            Err("Username is required".to_string())
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("alice.smith+tag@sub.example.co").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_length() {
        assert!(validate_length("secret", "Password", 6, 55).is_ok());
        assert_eq!(
            validate_length("short", "Password", 6, 55),
            Err("Password must be at least 6 characters long".to_string())
        );
        assert_eq!(
            validate_length(&"x".repeat(56), "Password", 6, 55),
            Err("Password must be at most 55 characters long".to_string())
        );
    }
}
