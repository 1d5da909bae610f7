//! Club Manager Library
//!
//! Backend for running a grassroots sports club: clubs, age groups, teams,
//! players, coaches, matches and kits, plus training drills and player
//! development records (plans, report cards and attribute evaluations).
//!
//! ## Architecture
//!
//! - **Requests**: every command and query is a type implementing
//!   [`mediator::Request`], bound statically to one handler body
//! - **Mediator**: authorizes, validates and runs requests against the
//!   shared SQLite database on the blocking pool
//! - **HTTP**: [`api`] maps routes onto requests and errors onto statuses
//! - **Client**: [`client`] wraps the HTTP API with typed calls and
//!   query/mutation hooks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use club_manager::handlers::clubs::{ClubInput, CreateClub};
//! use club_manager::{Caller, ClubDatabase, Mediator, Role};
//!
//! # async fn example() -> club_manager::Result<()> {
//! let mediator = Mediator::new(ClubDatabase::new_in_memory()?);
//! let club = mediator
//!     .send(
//!         &Caller::with_role(Role::Admin),
//!         CreateClub {
//!             input: ClubInput {
//!                 name: "Riverside FC".to_string(),
//!                 short_name: None,
//!                 founded_year: Some(1904),
//!                 primary_color: "#1A2B3C".to_string(),
//!                 secondary_color: "#FFFFFF".to_string(),
//!             },
//!         },
//!     )
//!     .await?;
//! println!("created {}", club.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the service at a specific database file:
//! ```bash
//! export CLUB_MANAGER_DATABASE=/var/lib/club-manager/club.db
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod mediator;
pub mod storage;
pub mod util;
pub mod validation;

// Re-export commonly used types
pub use domain::{
    AgeGroupId, ClubId, CoachId, DrillId, DrillTemplateId, KitId, MatchId, PlayerId, Role, Scope,
    TeamId, UserId,
};
pub use error::{ClubError, Result};
pub use mediator::{Caller, Mediator, Request};
pub use storage::ClubDatabase;

pub const CLUB_MANAGER_DATABASE: &str = "CLUB_MANAGER_DATABASE";
