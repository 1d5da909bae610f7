//! Command and query handlers, grouped by aggregate.
//!
//! Each file defines the request types for one area, their validation,
//! their [`Request`](crate::mediator::Request) handler bodies and the
//! response DTOs they produce. DTOs serialize with camelCase keys.

pub mod age_groups;
pub mod clubs;
pub mod coaches;
pub mod development_plans;
pub mod drills;
pub mod evaluations;
pub mod kits;
pub mod matches;
pub mod players;
pub mod reports;
pub mod squads;
pub mod teams;
pub mod users;

use crate::domain::{AgeGroupId, ClubId, CoachId, PlayerId, TeamId};
use crate::error::{ClubError, Result};
use crate::storage::{AgeGroup, Club, ClubDatabase, Coach, Player, Team};

pub(crate) fn require_club(db: &ClubDatabase, id: ClubId) -> Result<Club> {
    db.get_club(id)?.ok_or_else(|| ClubError::not_found("Club", id))
}

pub(crate) fn require_age_group(db: &ClubDatabase, id: AgeGroupId) -> Result<AgeGroup> {
    db.get_age_group(id)?
        .ok_or_else(|| ClubError::not_found("AgeGroup", id))
}

pub(crate) fn require_team(db: &ClubDatabase, id: TeamId) -> Result<Team> {
    db.get_team(id)?.ok_or_else(|| ClubError::not_found("Team", id))
}

pub(crate) fn require_player(db: &ClubDatabase, id: PlayerId) -> Result<Player> {
    db.get_player(id)?
        .ok_or_else(|| ClubError::not_found("Player", id))
}

pub(crate) fn require_coach(db: &ClubDatabase, id: CoachId) -> Result<Coach> {
    db.get_coach(id)?.ok_or_else(|| ClubError::not_found("Coach", id))
}

/// Reject writes under an archived parent.
pub(crate) fn ensure_active(is_archived: bool, entity: &str) -> Result<()> {
    if is_archived {
        Err(ClubError::failure(format!("{} is archived", entity)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures;

#[cfg(test)]
mod tests;
