//! Domain value types shared by storage, handlers and the HTTP surface.

pub mod codes;
pub mod ids;

pub use codes::{CoachRole, KitType, MatchOutcome, MatchStatus, Role, ScopeLevel};
pub use ids::*;

use serde::{Deserialize, Serialize};

/// Visibility scope of a drill or drill template.
///
/// A resource scoped to a club is visible to every age group and team in
/// that club; one scoped to an age group is visible to the teams in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub club_id: ClubId,
    pub age_group_id: Option<AgeGroupId>,
    pub team_id: Option<TeamId>,
}

impl Scope {
    pub fn club(club_id: ClubId) -> Self {
        Self {
            club_id,
            age_group_id: None,
            team_id: None,
        }
    }

    pub fn level(&self) -> ScopeLevel {
        match (self.age_group_id, self.team_id) {
            (_, Some(_)) => ScopeLevel::Team,
            (Some(_), None) => ScopeLevel::AgeGroup,
            (None, None) => ScopeLevel::Club,
        }
    }

    /// Whether a resource scoped at `resource` is visible from this scope.
    pub fn includes(&self, resource: &Scope) -> bool {
        if resource.club_id != self.club_id {
            return false;
        }
        match resource.level() {
            ScopeLevel::Club => true,
            ScopeLevel::AgeGroup => {
                resource.age_group_id.is_some() && resource.age_group_id == self.age_group_id
            }
            ScopeLevel::Team => resource.team_id.is_some() && resource.team_id == self.team_id,
        }
    }
}

#[cfg(test)]
mod tests;
