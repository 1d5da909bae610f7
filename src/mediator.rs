//! Command/query dispatch.
//!
//! Every command and query type implements [`Request`], which binds it to
//! exactly one handler body. [`Mediator::send`] runs the request through
//! authorization, validation and the handler, in that order, on the blocking
//! pool while holding the database lock.

use crate::domain::{Role, UserId};
use crate::error::{ClubError, Result};
use crate::storage::ClubDatabase;
use crate::validation::ValidationErrors;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

/// Identity of the caller, as established by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Option<UserId>,
    pub role: Role,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            role: Role::Member,
        }
    }

    pub fn with_role(role: Role) -> Self {
        Self {
            user_id: None,
            role,
        }
    }

    /// Fail with `Forbidden` unless the caller holds at least `minimum`.
    pub fn require(&self, minimum: Role) -> Result<()> {
        if self.role >= minimum {
            Ok(())
        } else {
            Err(ClubError::forbidden(format!(
                "{} role required for this operation",
                minimum
            )))
        }
    }
}

impl Default for Caller {
    fn default() -> Self {
        Self::anonymous()
    }
}

/// A command or query together with its handler.
pub trait Request: Send + 'static {
    type Response: Send + 'static;

    /// Name used in logs.
    const NAME: &'static str;

    fn authorize(&self, _caller: &Caller) -> Result<()> {
        Ok(())
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Ok(())
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<Self::Response>;
}

/// Run `request` synchronously against `db`.
pub fn dispatch<R: Request>(db: &mut ClubDatabase, caller: &Caller, request: R) -> Result<R::Response> {
    request.authorize(caller)?;
    request.validate()?;
    request.handle(db)
}

/// Shared entry point for the HTTP layer.
#[derive(Clone)]
pub struct Mediator {
    db: Arc<Mutex<ClubDatabase>>,
}

impl Mediator {
    pub fn new(db: ClubDatabase) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    pub async fn send<R: Request>(&self, caller: &Caller, request: R) -> Result<R::Response> {
        let started = Instant::now();
        let db = Arc::clone(&self.db);
        let caller = *caller;

        let result = tokio::task::spawn_blocking(move || {
            // A handler that panicked mid-transaction has already rolled back.
            let mut guard = db.lock().unwrap_or_else(PoisonError::into_inner);
            dispatch(&mut guard, &caller, request)
        })
        .await?;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::debug!(request = R::NAME, elapsed_ms, "request handled"),
            Err(
                e @ (ClubError::NotFound { .. }
                | ClubError::Validation(_)
                | ClubError::Forbidden { .. }
                | ClubError::Failure { .. }),
            ) => tracing::info!(request = R::NAME, elapsed_ms, error = %e, "request rejected"),
            Err(e) => tracing::error!(request = R::NAME, elapsed_ms, error = %e, "request failed"),
        }
        result
    }

    /// Run a closure directly against the database, outside any request.
    pub async fn with_database<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut ClubDatabase) -> Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let mut guard = db.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        })
        .await?
    }
}
