//! Group field validation

use thiserror::Error;

/// Maximum length of a group name
pub const MAX_GROUP_NAME_LENGTH: usize = 120;

/// Errors for invalid group fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupValidationError {
    #[error("group name must not be empty")]
    EmptyName,

    #[error("group name must be at most {MAX_GROUP_NAME_LENGTH} characters")]
    NameTooLong,
}

/// Validate a group display name
pub fn validate_group_name(name: &str) -> Result<(), GroupValidationError> {
    if name.trim().is_empty() {
        return Err(GroupValidationError::EmptyName);
    }

    if name.chars().count() > MAX_GROUP_NAME_LENGTH {
        return Err(GroupValidationError::NameTooLong);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(validate_group_name("Friends").is_ok());
        assert!(validate_group_name("cool links 2025").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_group_name(""), Err(GroupValidationError::EmptyName));
        assert_eq!(
            validate_group_name("   "),
            Err(GroupValidationError::EmptyName)
        );
    }

    #[test]
    fn test_name_too_long() {
        let name = "x".repeat(MAX_GROUP_NAME_LENGTH + 1);
        assert_eq!(
            validate_group_name(&name),
            Err(GroupValidationError::NameTooLong)
        );

        let name = "x".repeat(MAX_GROUP_NAME_LENGTH);
        assert!(validate_group_name(&name).is_ok());
    }
}
