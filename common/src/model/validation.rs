//! Field-shape checks applied to every student submission.
//!
//! Data entry and edit both go through [`validate_student`]; the first
//! failing field wins and is reported back with its user-facing message.

use crate::model::student::StudentForm;
use thiserror::Error;

/// Required length of a USN, in characters.
pub const USN_LENGTH: usize = 10;
/// Required number of digits in a phone number.
pub const PHONE_LENGTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required.")]
    MissingName,
    #[error("USN must be exactly 10 characters.")]
    UsnLength,
    #[error("Phone number must be numeric and exactly 10 digits.")]
    PhoneShape,
}

impl ValidationError {
    /// Name of the form field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "name",
            ValidationError::UsnLength => "usn",
            ValidationError::PhoneShape => "phone",
        }
    }
}

/// Checks name, USN and phone of an already trimmed form.
pub fn validate_student(form: &StudentForm) -> Result<(), ValidationError> {
    if form.name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if form.usn.chars().count() != USN_LENGTH {
        return Err(ValidationError::UsnLength);
    }
    if form.phone.len() != PHONE_LENGTH || !form.phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::PhoneShape);
    }
    Ok(())
}
