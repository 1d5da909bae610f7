//! Match commands and queries

use super::{ensure_active, require_team};
use crate::domain::{MatchId, MatchOutcome, MatchStatus, Role, TeamId};
use crate::error::{ClubError, Result};
use crate::mediator::{Caller, Request};
use crate::storage::{ClubDatabase, Match};
use crate::validation::{Validate, ValidationErrors, Validator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInput {
    pub opposition: String,
    pub kick_off: DateTime<Utc>,
    pub venue: Option<String>,
    pub is_home: bool,
    #[serde(default)]
    pub status: MatchStatus,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
    pub notes: Option<String>,
}

impl Validate for MatchInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let completed = self.status == MatchStatus::Completed;
        Validator::new()
            .required("opposition", &self.opposition)
            .length("opposition", &self.opposition, 2, 100)
            .max_length("venue", self.venue.as_deref(), 200)
            .max_length("notes", self.notes.as_deref(), 2000)
            .optional_range("goalsFor", self.goals_for, 0, 99)
            .optional_range("goalsAgainst", self.goals_against, 0, 99)
            .ensure(
                !completed || self.goals_for.is_some(),
                "goalsFor",
                "goalsFor is required for a completed match",
            )
            .ensure(
                !completed || self.goals_against.is_some(),
                "goalsAgainst",
                "goalsAgainst is required for a completed match",
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub id: MatchId,
    pub team_id: TeamId,
    pub opposition: String,
    pub kick_off: DateTime<Utc>,
    pub venue: Option<String>,
    pub is_home: bool,
    pub status: MatchStatus,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
    /// Set only for completed matches with a score
    pub result: Option<MatchOutcome>,
    pub notes: Option<String>,
}

impl From<Match> for MatchDto {
    fn from(fixture: Match) -> Self {
        let status = MatchStatus::from_code(fixture.status);
        let result = match (status, fixture.goals_for, fixture.goals_against) {
            (MatchStatus::Completed, Some(goals_for), Some(goals_against)) => {
                Some(MatchOutcome::from_score(goals_for, goals_against))
            }
            _ => None,
        };
        Self {
            id: fixture.id,
            team_id: fixture.team_id,
            opposition: fixture.opposition,
            kick_off: fixture.kick_off,
            venue: fixture.venue,
            is_home: fixture.is_home,
            status,
            goals_for: fixture.goals_for,
            goals_against: fixture.goals_against,
            result,
            notes: fixture.notes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMatch {
    pub team_id: TeamId,
    pub input: MatchInput,
}

impl Request for CreateMatch {
    type Response = MatchDto;
    const NAME: &'static str = "CreateMatch";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<MatchDto> {
        let team = require_team(db, self.team_id)?;
        ensure_active(team.is_archived, "Team")?;

        let input = self.input;
        let fixture = Match {
            id: MatchId::generate(),
            team_id: team.id,
            opposition: input.opposition.trim().to_string(),
            kick_off: input.kick_off,
            venue: input.venue,
            is_home: input.is_home,
            status: input.status.code(),
            goals_for: input.goals_for,
            goals_against: input.goals_against,
            notes: input.notes,
        };
        db.insert_match(&fixture)?;
        Ok(fixture.into())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateMatch {
    pub match_id: MatchId,
    pub input: MatchInput,
}

impl Request for UpdateMatch {
    type Response = MatchDto;
    const NAME: &'static str = "UpdateMatch";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<MatchDto> {
        let existing = db
            .get_match(self.match_id)?
            .ok_or_else(|| ClubError::not_found("Match", self.match_id))?;
        let input = self.input;
        let fixture = Match {
            opposition: input.opposition.trim().to_string(),
            kick_off: input.kick_off,
            venue: input.venue,
            is_home: input.is_home,
            status: input.status.code(),
            goals_for: input.goals_for,
            goals_against: input.goals_against,
            notes: input.notes,
            ..existing
        };
        db.update_match(&fixture)?;
        Ok(fixture.into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetMatchById {
    pub match_id: MatchId,
}

impl Request for GetMatchById {
    type Response = MatchDto;
    const NAME: &'static str = "GetMatchById";

    fn handle(self, db: &mut ClubDatabase) -> Result<MatchDto> {
        db.get_match(self.match_id)?
            .map(MatchDto::from)
            .ok_or_else(|| ClubError::not_found("Match", self.match_id))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetMatchesByTeamId {
    pub team_id: TeamId,
}

impl Request for GetMatchesByTeamId {
    type Response = Vec<MatchDto>;
    const NAME: &'static str = "GetMatchesByTeamId";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<MatchDto>> {
        require_team(db, self.team_id)?;
        Ok(db
            .list_matches_by_team(self.team_id)?
            .into_iter()
            .map(MatchDto::from)
            .collect())
    }
}
