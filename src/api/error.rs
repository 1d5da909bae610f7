//! Mapping of [`ClubError`] onto HTTP responses.

use crate::error::ClubError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ClubError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClubError::Validation(_)
            | ClubError::MalformedBody { .. }
            | ClubError::MalformedQuery { .. }
            | ClubError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            ClubError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ClubError::NotFound { .. } => StatusCode::NOT_FOUND,
            ClubError::Failure { .. } => StatusCode::CONFLICT,
            ClubError::Database(_)
            | ClubError::Json(_)
            | ClubError::Io(_)
            | ClubError::Toml(_)
            | ClubError::Config { .. }
            | ClubError::TaskJoin(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self) -> ErrorBody {
        match self {
            ClubError::Validation(errors) => ErrorBody {
                message: "Validation failed".to_string(),
                errors: Some(errors.into_map()),
            },
            ClubError::Failure { message } | ClubError::Forbidden { message } => ErrorBody {
                message,
                errors: None,
            },
            other => ErrorBody {
                message: other.to_string(),
                errors: None,
            },
        }
    }
}

impl IntoResponse for ClubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            ErrorBody {
                message: "internal server error".to_string(),
                errors: None,
            }
        } else {
            self.into_body()
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrors;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ClubError::not_found("Team", "t1").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ClubError::failure("taken").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ClubError::forbidden("no").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ClubError::invalid_field("name", "Name is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ClubError::MalformedQuery {
                message: "missing field `clubId`".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ClubError::Config {
                message: "bad".to_string()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_body_carries_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Name is required");
        errors.add("name", "Name is too short");
        let body = ClubError::Validation(errors).into_body();

        assert_eq!(body.message, "Validation failed");
        let map = body.errors.unwrap();
        assert_eq!(map["name"].len(), 2);
    }

    #[test]
    fn test_failure_body_keeps_message_without_errors() {
        let body = ClubError::failure("Squad number 7 is already taken").into_body();
        assert_eq!(body.message, "Squad number 7 is already taken");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("errors").is_none());
    }
}
