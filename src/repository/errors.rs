use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Field name to messages, as reported by backend validation.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Validation error: {message}")]
    Validation { message: String, fields: FieldErrors },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, OneOrMany>,
}

impl RepositoryError {
    /// Classifies a non-success backend response by status code.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status {
            401 => RepositoryError::Unauthenticated,
            403 => RepositoryError::Forbidden(message),
            404 => RepositoryError::NotFound,
            409 => RepositoryError::Conflict(message),
            422 => {
                let fields = parsed
                    .errors
                    .into_iter()
                    .map(|(field, messages)| {
                        let messages = match messages {
                            OneOrMany::One(m) => vec![m],
                            OneOrMany::Many(ms) => ms,
                        };
                        (field, messages)
                    })
                    .collect();
                RepositoryError::Validation { message, fields }
            }
            400..=499 => RepositoryError::Unexpected(format!("HTTP {status}: {message}")),
            _ => RepositoryError::Server { status, message },
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else if err.is_timeout() || err.is_connect() || err.is_request() {
            RepositoryError::ConnectionError(err.to_string())
        } else {
            RepositoryError::Unexpected(err.to_string())
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Decode(val.to_string())
    }
}
