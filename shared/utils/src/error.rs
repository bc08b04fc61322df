use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PickListError {
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Fixture not found: {fixture}")]
    FixtureNotFound { fixture: String },

    #[error("Timed out waiting for {operation}")]
    Timeout { operation: String },
}

impl PickListError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn fixture_not_found(fixture: impl Into<String>) -> Self {
        Self::FixtureNotFound {
            fixture: fixture.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Database { .. } => "DATABASE_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::FixtureNotFound { .. } => "FIXTURE_NOT_FOUND",
            Self::Timeout { .. } => "TIMEOUT",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Database { .. } => 500,
            Self::Validation { .. } => 400,
            Self::FixtureNotFound { .. } => 404,
            Self::Timeout { .. } => 504,
        }
    }
}

pub type PickListResult<T> = Result<T, PickListError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<PickListError> for ErrorResponse {
    fn from(error: PickListError) -> Self {
        let details = match &error {
            PickListError::FixtureNotFound { fixture } => {
                Some(serde_json::json!({ "fixture": fixture }))
            }
            PickListError::Validation { field, .. } => Some(serde_json::json!({ "field": field })),
            _ => None,
        };

        Self {
            error: error.error_code().to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}
