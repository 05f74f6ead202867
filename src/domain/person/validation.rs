//! Person field validation

use thiserror::Error;

/// Errors that can occur when validating person fields
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PersonValidationError {
    #[error("Display name cannot be empty")]
    EmptyName,

    #[error("Display name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Contact cannot be empty")]
    EmptyContact,

    #[error("Contact cannot exceed {0} characters")]
    ContactTooLong(usize),
}

const MAX_NAME_LENGTH: usize = 100;
const MAX_CONTACT_LENGTH: usize = 254;

/// Validate a person's display name
pub fn validate_display_name(name: &str) -> Result<(), PersonValidationError> {
    if name.trim().is_empty() {
        return Err(PersonValidationError::EmptyName);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(PersonValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a person's contact string (usually an email)
pub fn validate_contact(contact: &str) -> Result<(), PersonValidationError> {
    if contact.trim().is_empty() {
        return Err(PersonValidationError::EmptyContact);
    }

    if contact.len() > MAX_CONTACT_LENGTH {
        return Err(PersonValidationError::ContactTooLong(MAX_CONTACT_LENGTH));
    }

    Ok(())
}
