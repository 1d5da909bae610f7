//! Error types for the club management backend

use crate::validation::ValidationErrors;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClubError>;

#[derive(Error, Debug)]
pub enum ClubError {
    #[error("{entity} with key '{key}' was not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("{message}")]
    Failure { message: String },

    #[error("Malformed request body: {message}")]
    MalformedBody { message: String },

    #[error("Malformed query string: {message}")]
    MalformedQuery { message: String },

    #[error("Invalid identifier: {value}")]
    InvalidId { value: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parsing failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Handler task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ClubError {
    /// Build a not-found failure for `entity` identified by `key`.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        ClubError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ClubError::Failure {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ClubError::Forbidden {
            message: message.into(),
        }
    }

    /// Validation failure carrying a single field message.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        ClubError::Validation(errors)
    }
}

impl From<ValidationErrors> for ClubError {
    fn from(errors: ValidationErrors) -> Self {
        ClubError::Validation(errors)
    }
}
