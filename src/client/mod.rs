//! Typed HTTP client for the club API.
//!
//! Success bodies decode into the same DTOs the server produces; error
//! bodies decode into [`ApiError`]. Nothing is retried.

pub mod hooks;

use crate::api::caller::{USER_ID_HEADER, USER_ROLE_HEADER};
use crate::api::ErrorBody;
use crate::domain::{ClubId, TeamId};
use crate::handlers::clubs::ClubDto;
use crate::handlers::squads::{AddPlayerToTeamInput, PlayerTeamDto, SquadPlayerDto};
use crate::handlers::teams::TeamStatisticsDto;
use crate::mediator::Caller;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub use hooks::{MutationHook, QueryHook, QueryState};

/// Failure surfaced to client code.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    /// HTTP status, absent when the request never got a response
    pub status_code: Option<u16>,
    pub validation_errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            validation_errors: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            message: e.to_string(),
            status_code: e.status().map(|s| s.as_u16()),
            validation_errors: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    caller: Caller,
}

impl ApiClient {
    /// Client for the service at `base_url` (e.g. `http://127.0.0.1:8080`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("club-manager/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            caller: Caller::anonymous(),
        })
    }

    /// Send subsequent requests as `caller`.
    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = caller;
        self
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_ROLE_HEADER,
            HeaderValue::from_static(self.caller.role.label()),
        );
        if let Some(user_id) = self.caller.user_id {
            if let Ok(value) = HeaderValue::from_str(&user_id.to_string()) {
                headers.insert(USER_ID_HEADER, value);
            }
        }
        headers
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api/{}", self.base_url, path.trim_start_matches('/'));
        self.http.request(method, url).headers(self.headers())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        decode(self.request(Method::GET, path).send().await?).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        decode(self.request(Method::GET, path).query(query).send().await?).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(self.request(Method::POST, path).json(body).send().await?).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(self.request(Method::PUT, path).json(body).send().await?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        expect_empty(self.request(Method::DELETE, path).send().await?).await
    }

    /// POST without a body, for archive endpoints.
    pub async fn archive(&self, path: &str) -> Result<(), ApiError> {
        expect_empty(self.request(Method::POST, path).send().await?).await
    }

    pub async fn clubs(&self) -> Result<Vec<ClubDto>, ApiError> {
        self.get("clubs").await
    }

    pub async fn club(&self, club_id: ClubId) -> Result<ClubDto, ApiError> {
        self.get(&format!("clubs/{}", club_id)).await
    }

    pub async fn team_players(&self, team_id: TeamId) -> Result<Vec<SquadPlayerDto>, ApiError> {
        self.get(&format!("teams/{}/players", team_id)).await
    }

    pub async fn team_statistics(&self, team_id: TeamId) -> Result<TeamStatisticsDto, ApiError> {
        self.get(&format!("teams/{}/statistics", team_id)).await
    }

    pub async fn add_player_to_team(
        &self,
        team_id: TeamId,
        input: &AddPlayerToTeamInput,
    ) -> Result<PlayerTeamDto, ApiError> {
        self.post(&format!("teams/{}/players", team_id), input).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.status().is_success() {
        Ok(response.json::<T>().await?)
    } else {
        Err(error_from(response).await)
    }
}

async fn expect_empty(response: Response) -> Result<(), ApiError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from(response).await)
    }
}

async fn error_from(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let (message, validation_errors) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.message, body.errors),
        Err(_) if !text.trim().is_empty() => (text.trim().to_string(), None),
        Err(_) => (
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            None,
        ),
    };
    ApiError {
        message,
        status_code: Some(status.as_u16()),
        validation_errors,
    }
}
