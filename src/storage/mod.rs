//! Storage layer for the club management backend
//!
//! This module wraps the SQLite database, organized by aggregate:
//! - `models`: Row structures
//! - `schema`: Database connection and schema management
//! - `clubs`: Clubs, age groups and teams
//! - `squads`: Players, coaches and team memberships
//! - `fixtures`: Matches and kits
//! - `training`: Drills and drill templates (scope-aware listings)
//! - `development`: Development plans, report cards and evaluations
//! - `users`: User accounts
//! - `analysis`: Aggregate statistics recomputed from rows

pub mod analysis;
pub mod clubs;
pub mod development;
pub mod fixtures;
pub mod models;
pub mod schema;
pub mod squads;
pub mod training;
pub mod users;


// Re-export the main types and database struct for easy access
pub use analysis::ClubCounts;
pub use models::*;
pub use schema::ClubDatabase;
