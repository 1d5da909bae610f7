//! Request extractors: caller identity headers, path, query and JSON bodies.
//!
//! The wrappers here replace axum's plain-text rejections with
//! [`ClubError`], so every failure leaves as a JSON error body.

use crate::domain::{Role, UserId};
use crate::error::ClubError;
use crate::mediator::Caller;
use axum::extract::path::ErrorKind;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use serde::de::DeserializeOwned;
use std::error::Error;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, ClubError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|text| Some(text.trim()).filter(|t| !t.is_empty()))
            .map_err(|_| ClubError::invalid_field(name, "Header is not valid text")),
    }
}

/// Read the caller from the identity headers set by the gateway.
pub fn caller_from_headers(headers: &HeaderMap) -> Result<Caller, ClubError> {
    let user_id = match header_text(headers, USER_ID_HEADER)? {
        Some(text) => Some(
            text.parse::<UserId>()
                .map_err(|_| ClubError::invalid_field(USER_ID_HEADER, "Must be a UUID"))?,
        ),
        None => None,
    };

    let role = match header_text(headers, USER_ROLE_HEADER)? {
        Some(text) => Role::from_label(text).ok_or_else(|| {
            ClubError::invalid_field(USER_ROLE_HEADER, "Must be one of member, coach, admin")
        })?,
        None => Role::Member,
    };

    Ok(Caller { user_id, role })
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ClubError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        caller_from_headers(&parts.headers)
    }
}

/// `Json` extractor whose rejection uses the service's error body.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ClubError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ClubError::MalformedBody {
                message: rejection.body_text(),
            }),
        }
    }
}

/// `Path` extractor; an unparseable segment is an [`ClubError::InvalidId`].
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ClubError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(path_error(rejection)),
        }
    }
}

fn path_error(rejection: PathRejection) -> ClubError {
    let value = match &rejection {
        PathRejection::FailedToDeserializePathParams(inner) => match inner.kind() {
            ErrorKind::ParseErrorAtKey { value, .. }
            | ErrorKind::ParseErrorAtIndex { value, .. }
            | ErrorKind::ParseError { value, .. }
            | ErrorKind::DeserializeError { value, .. } => Some(value.clone()),
            _ => None,
        },
        _ => None,
    };
    ClubError::InvalidId {
        value: value.unwrap_or_else(|| rejection.body_text()),
    }
}

/// `Query` extractor whose rejection is a [`ClubError::MalformedQuery`].
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ClubError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(query_error(rejection)),
        }
    }
}

fn query_error(rejection: QueryRejection) -> ClubError {
    let detail = match &rejection {
        QueryRejection::FailedToDeserializeQueryString(inner) => {
            inner.source().map(ToString::to_string)
        }
        _ => None,
    };
    ClubError::MalformedQuery {
        message: detail.unwrap_or_else(|| rejection.body_text()),
    }
}
