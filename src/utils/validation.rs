//! Centralized validation and helper functions.

/// Maximum length of a file name on common filesystems
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty name provided")]
    Empty,
    #[error("Name too long: exceeds {0} characters")]
    TooLong(usize),
    #[error("Invalid name: contains path separators, traversal or control characters")]
    InvalidCharacters,
}

/// Validate a string that will be embedded in an output file name.
///
/// The input is never rewritten; anything unsafe is rejected.
///
/// # Examples
///
/// ```
/// use stacks_dat::utils::validation::validate_name_component;
///
/// assert!(validate_name_component("1234", 200).is_ok());
/// assert!(validate_name_component("../1234", 200).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::Empty` for an empty or whitespace-only name,
/// `ValidationError::TooLong` if it exceeds `max_len` bytes, or
/// `ValidationError::InvalidCharacters` for separators, `..`, or control characters.
pub fn validate_name_component(name: &str, max_len: usize) -> Result<&str, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    if name.len() > max_len {
        return Err(ValidationError::TooLong(max_len));
    }

    // Prevent directory traversal
    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ValidationError::InvalidCharacters);
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_safe() {
        assert_eq!(validate_name_component("1", 10), Ok("1"));
        assert!(validate_name_component("locus_12-b", 20).is_ok());
        assert!(validate_name_component("a.b", 20).is_ok());
    }

    #[test]
    fn test_validate_name_dangerous() {
        // Directory traversal attempts
        assert_eq!(
            validate_name_component("../etc/passwd", 50),
            Err(ValidationError::InvalidCharacters)
        );
        assert!(validate_name_component("..\\windows", 50).is_err());
        assert!(validate_name_component("a/b", 50).is_err());

        // Null bytes and control characters
        assert!(validate_name_component("test\0", 50).is_err());
        assert!(validate_name_component("test\x01", 50).is_err());
        assert!(validate_name_component("te\tst", 50).is_err());

        // Empty or whitespace-only
        assert_eq!(validate_name_component("", 50), Err(ValidationError::Empty));
        assert_eq!(validate_name_component("   ", 50), Err(ValidationError::Empty));
    }

    #[test]
    fn test_validate_name_length() {
        let long_name = "a".repeat(300);
        assert_eq!(
            validate_name_component(&long_name, MAX_FILENAME_LENGTH),
            Err(ValidationError::TooLong(MAX_FILENAME_LENGTH))
        );
        assert!(validate_name_component(&"a".repeat(10), 10).is_ok());
    }
}
