//! Stateful query and mutation wrappers for client code.
//!
//! A [`QueryHook`] owns a fetch function and the key it was last run with.
//! Setting the same key again does nothing; setting no key resolves to
//! [`QueryState::NoData`] without calling the fetcher. State is kept behind
//! a shared lock so a [`QueryView`] can observe a fetch in flight.

use super::{ApiClient, ApiError};
use crate::domain::TeamId;
use crate::handlers::squads::{AddPlayerToTeamInput, PlayerTeamDto, SquadPlayerDto};
use crate::handlers::teams::TeamStatisticsDto;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;
type Fetcher<K, T> = Arc<dyn Fn(K) -> BoxFuture<T> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// No key has been set yet
    Idle,
    Loading,
    /// The key was cleared, so nothing was fetched
    NoData,
    Ready(T),
    Failed(ApiError),
}

fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read-only handle onto a query's state.
#[derive(Debug)]
pub struct QueryView<T> {
    state: Arc<Mutex<QueryState<T>>>,
}

impl<T> Clone for QueryView<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone> QueryView<T> {
    pub fn state(&self) -> QueryState<T> {
        lock(&self.state).clone()
    }

    pub fn data(&self) -> Option<T> {
        match &*lock(&self.state) {
            QueryState::Ready(data) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(*lock(&self.state), QueryState::Loading)
    }

    pub fn error(&self) -> Option<ApiError> {
        match &*lock(&self.state) {
            QueryState::Failed(e) => Some(e.clone()),
            _ => None,
        }
    }
}

pub struct QueryHook<K, T> {
    fetch: Fetcher<K, T>,
    key: Option<K>,
    view: QueryView<T>,
}

impl<K, T> QueryHook<K, T>
where
    K: Clone + PartialEq + Send + 'static,
    T: Clone + Send + 'static,
{
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        Self {
            fetch: Arc::new(move |key| Box::pin(fetch(key)) as BoxFuture<T>),
            key: None,
            view: QueryView {
                state: Arc::new(Mutex::new(QueryState::Idle)),
            },
        }
    }

    pub fn view(&self) -> QueryView<T> {
        self.view.clone()
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Switch to `key`, fetching only when it differs from the current key.
    pub async fn set_key(&mut self, key: Option<K>) {
        let unchanged = self.key == key && !matches!(self.view.state(), QueryState::Idle);
        if unchanged {
            return;
        }
        self.key = key;
        self.refetch().await;
    }

    /// Run the fetch again for the current key.
    pub async fn refetch(&mut self) {
        let Some(key) = self.key.clone() else {
            *lock(&self.view.state) = QueryState::NoData;
            return;
        };

        *lock(&self.view.state) = QueryState::Loading;
        let outcome = (self.fetch)(key).await;
        *lock(&self.view.state) = match outcome {
            Ok(data) => QueryState::Ready(data),
            Err(e) => QueryState::Failed(e),
        };
    }

    pub fn state(&self) -> QueryState<T> {
        self.view.state()
    }

    pub fn data(&self) -> Option<T> {
        self.view.data()
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.view.error()
    }
}

#[derive(Debug)]
struct MutationState<T> {
    is_submitting: bool,
    data: Option<T>,
    error: Option<ApiError>,
}

/// One-shot command execution with the outcome of the last call recorded.
pub struct MutationHook<I, T> {
    execute: Arc<dyn Fn(I) -> BoxFuture<T> + Send + Sync>,
    state: Arc<Mutex<MutationState<T>>>,
}

impl<I, T> MutationHook<I, T>
where
    I: Send + 'static,
    T: Clone + Send + 'static,
{
    pub fn new<F, Fut>(execute: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        Self {
            execute: Arc::new(move |input| Box::pin(execute(input)) as BoxFuture<T>),
            state: Arc::new(Mutex::new(MutationState {
                is_submitting: false,
                data: None,
                error: None,
            })),
        }
    }

    pub async fn execute(&self, input: I) -> Result<T, ApiError> {
        {
            let mut state = lock(&self.state);
            state.is_submitting = true;
            state.error = None;
        }

        let outcome = (self.execute)(input).await;

        let mut state = lock(&self.state);
        state.is_submitting = false;
        match &outcome {
            Ok(data) => state.data = Some(data.clone()),
            Err(e) => state.error = Some(e.clone()),
        }
        outcome
    }

    pub fn is_submitting(&self) -> bool {
        lock(&self.state).is_submitting
    }

    pub fn data(&self) -> Option<T> {
        lock(&self.state).data.clone()
    }

    pub fn error(&self) -> Option<ApiError> {
        lock(&self.state).error.clone()
    }
}

/// Squad listing keyed by team.
pub fn team_players_query(client: ApiClient) -> QueryHook<TeamId, Vec<SquadPlayerDto>> {
    QueryHook::new(move |team_id| {
        let client = client.clone();
        async move { client.team_players(team_id).await }
    })
}

pub fn team_statistics_query(client: ApiClient) -> QueryHook<TeamId, TeamStatisticsDto> {
    QueryHook::new(move |team_id| {
        let client = client.clone();
        async move { client.team_statistics(team_id).await }
    })
}

pub fn add_player_mutation(
    client: ApiClient,
) -> MutationHook<(TeamId, AddPlayerToTeamInput), PlayerTeamDto> {
    MutationHook::new(move |(team_id, input): (TeamId, AddPlayerToTeamInput)| {
        let client = client.clone();
        async move { client.add_player_to_team(team_id, &input).await }
    })
}

#[cfg(test)]
mod tests;
