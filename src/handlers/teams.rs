//! Team commands and queries

use super::{ensure_active, require_age_group, require_team};
use crate::domain::{AgeGroupId, ClubId, MatchOutcome, Role, TeamId};
use crate::error::Result;
use crate::mediator::{Caller, Request};
use crate::storage::{ClubDatabase, Team};
use crate::validation::{Validate, ValidationErrors, Validator};
use serde::{Deserialize, Serialize};

/// Number of recent results reported as form
const FORM_LENGTH: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInput {
    pub name: String,
    pub level: String,
    pub season: String,
    pub primary_color: String,
    pub secondary_color: Option<String>,
}

impl Validate for TeamInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .required("name", &self.name)
            .length("name", &self.name, 2, 100)
            .required("level", &self.level)
            .length("level", &self.level, 1, 30)
            .required("season", &self.season)
            .length("season", &self.season, 4, 20)
            .hex_color("primaryColor", &self.primary_color)
            .optional_hex_color("secondaryColor", self.secondary_color.as_deref())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub id: TeamId,
    pub club_id: ClubId,
    pub age_group_id: AgeGroupId,
    pub name: String,
    pub level: String,
    pub season: String,
    pub primary_color: String,
    pub secondary_color: Option<String>,
    pub is_archived: bool,
}

impl From<Team> for TeamDto {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            club_id: team.club_id,
            age_group_id: team.age_group_id,
            name: team.name,
            level: team.level,
            season: team.season,
            primary_color: team.primary_color,
            secondary_color: team.secondary_color,
            is_archived: team.is_archived,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTeam {
    pub age_group_id: AgeGroupId,
    pub input: TeamInput,
}

impl Request for CreateTeam {
    type Response = TeamDto;
    const NAME: &'static str = "CreateTeam";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<TeamDto> {
        let age_group = require_age_group(db, self.age_group_id)?;
        ensure_active(age_group.is_archived, "Age group")?;

        let input = self.input;
        let team = Team {
            id: TeamId::generate(),
            club_id: age_group.club_id,
            age_group_id: age_group.id,
            name: input.name.trim().to_string(),
            level: input.level.trim().to_string(),
            season: input.season.trim().to_string(),
            primary_color: input.primary_color,
            secondary_color: input.secondary_color,
            is_archived: false,
        };
        db.insert_team(&team)?;
        tracing::info!(team_id = %team.id, age_group_id = %age_group.id, "team created");
        Ok(team.into())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTeam {
    pub team_id: TeamId,
    pub input: TeamInput,
}

impl Request for UpdateTeam {
    type Response = TeamDto;
    const NAME: &'static str = "UpdateTeam";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<TeamDto> {
        let existing = require_team(db, self.team_id)?;
        let input = self.input;
        let team = Team {
            name: input.name.trim().to_string(),
            level: input.level.trim().to_string(),
            season: input.season.trim().to_string(),
            primary_color: input.primary_color,
            secondary_color: input.secondary_color,
            ..existing
        };
        db.update_team(&team)?;
        Ok(team.into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArchiveTeam {
    pub team_id: TeamId,
}

impl Request for ArchiveTeam {
    type Response = ();
    const NAME: &'static str = "ArchiveTeam";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        require_team(db, self.team_id)?;
        db.archive_team(self.team_id)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetTeamById {
    pub team_id: TeamId,
}

impl Request for GetTeamById {
    type Response = TeamDto;
    const NAME: &'static str = "GetTeamById";

    fn handle(self, db: &mut ClubDatabase) -> Result<TeamDto> {
        Ok(require_team(db, self.team_id)?.into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetTeamsByAgeGroupId {
    pub age_group_id: AgeGroupId,
}

impl Request for GetTeamsByAgeGroupId {
    type Response = Vec<TeamDto>;
    const NAME: &'static str = "GetTeamsByAgeGroupId";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<TeamDto>> {
        require_age_group(db, self.age_group_id)?;
        Ok(db
            .list_teams_by_age_group(self.age_group_id)?
            .into_iter()
            .map(TeamDto::from)
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatisticsDto {
    pub team_id: TeamId,
    pub team_name: String,
    pub squad_size: u32,
    pub coach_count: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub upcoming_matches: u32,
    /// Most recent first
    pub recent_form: Vec<MatchOutcome>,
}

#[derive(Debug, Clone, Copy)]
pub struct GetTeamStatistics {
    pub team_id: TeamId,
}

impl Request for GetTeamStatistics {
    type Response = TeamStatisticsDto;
    const NAME: &'static str = "GetTeamStatistics";

    fn handle(self, db: &mut ClubDatabase) -> Result<TeamStatisticsDto> {
        let team = require_team(db, self.team_id)?;
        let tally = db.team_match_tally(team.id)?;

        Ok(TeamStatisticsDto {
            team_id: team.id,
            team_name: team.name,
            squad_size: db.count_squad(team.id)?,
            coach_count: db.count_team_coaches(team.id)?,
            matches_played: tally.played,
            wins: tally.wins,
            draws: tally.draws,
            losses: tally.losses,
            win_rate: tally.win_rate(),
            goals_for: tally.goals_for,
            goals_against: tally.goals_against,
            goal_difference: tally.goal_difference(),
            upcoming_matches: db.count_upcoming_matches(team.id)?,
            recent_form: db.recent_form(team.id, FORM_LENGTH)?,
        })
    }
}
