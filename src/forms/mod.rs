//! Form definitions backing the clinic routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod admin;
pub mod appointments;
pub mod auth;
pub mod reports;
pub mod settings;
pub mod staff;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid license number")]
    InvalidLicense,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("invalid identifier")]
    InvalidId,

    #[error("invalid date or time")]
    InvalidDateTime,

    #[error("date must be in the future")]
    DateInPast,

    #[error("opening time must be before closing time")]
    InvalidHours,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("unknown payment method")]
    InvalidPaymentMethod,

    #[error("unknown week day: {0}")]
    InvalidWeekday(String),

    #[error("a reason is required")]
    MissingReason,

    #[error("only PNG or JPEG images are accepted")]
    UnsupportedFileType,

    #[error("file is larger than {0} bytes")]
    FileTooLarge(usize),

    #[error("failed to read upload: {0}")]
    Upload(String),

    #[error("malformed form body: {0}")]
    Malformed(String),
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::InvalidEmail => FormError::InvalidEmail,
            TypeConstraintError::InvalidPhone => FormError::InvalidPhoneNumber,
            TypeConstraintError::InvalidLicense => FormError::InvalidLicense,
            TypeConstraintError::NonPositiveId => FormError::InvalidId,
            TypeConstraintError::InvalidAmount => FormError::InvalidAmount,
            TypeConstraintError::EmptyString | TypeConstraintError::InvalidValue(_) => {
                FormError::InvalidName
            }
        }
    }
}
