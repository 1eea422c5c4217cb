use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::{FieldErrors, RepositoryError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("insufficient permissions")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("validation failed: {message}")]
    Validation { message: String, fields: FieldErrors },

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unauthenticated => ServiceError::Unauthenticated,
            RepositoryError::Forbidden(_) => ServiceError::Unauthorized,
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Validation { message, fields } => {
                ServiceError::Validation { message, fields }
            }
            RepositoryError::Conflict(message) => ServiceError::Form(message),
            RepositoryError::Server { status, message } => {
                ServiceError::Unavailable(format!("HTTP {status}: {message}"))
            }
            RepositoryError::ConnectionError(message) => ServiceError::Unavailable(message),
            RepositoryError::Decode(message) | RepositoryError::Unexpected(message) => {
                ServiceError::Internal(message)
            }
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation(errors) => ServiceError::Validation {
                message: "Please correct the highlighted fields".to_string(),
                fields: field_errors(&errors),
            },
            other => ServiceError::Form(other.to_string()),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

/// Flattens `validator` output into the same shape the backend reports on 422.
fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("invalid value ({})", e.code),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
