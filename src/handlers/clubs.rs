//! Club commands and queries

use super::require_club;
use crate::domain::{ClubId, Role, TeamId};
use crate::error::Result;
use crate::mediator::{Caller, Request};
use crate::storage::{Club, ClubDatabase, MatchTally};
use crate::validation::{Validate, ValidationErrors, Validator};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Editable club fields, shared by create and update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubInput {
    pub name: String,
    pub short_name: Option<String>,
    pub founded_year: Option<i32>,
    pub primary_color: String,
    pub secondary_color: String,
}

impl Validate for ClubInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .required("name", &self.name)
            .length("name", &self.name, 2, 100)
            .max_length("shortName", self.short_name.as_deref(), 10)
            .optional_range("foundedYear", self.founded_year, 1800, Utc::now().year())
            .hex_color("primaryColor", &self.primary_color)
            .hex_color("secondaryColor", &self.secondary_color)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubDto {
    pub id: ClubId,
    pub name: String,
    pub short_name: Option<String>,
    pub founded_year: Option<i32>,
    pub primary_color: String,
    pub secondary_color: String,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Club> for ClubDto {
    fn from(club: Club) -> Self {
        Self {
            id: club.id,
            name: club.name,
            short_name: club.short_name,
            founded_year: club.founded_year,
            primary_color: club.primary_color,
            secondary_color: club.secondary_color,
            is_archived: club.is_archived,
            created_at: club.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateClub {
    pub input: ClubInput,
}

impl Request for CreateClub {
    type Response = ClubDto;
    const NAME: &'static str = "CreateClub";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<ClubDto> {
        let input = self.input;
        let club = Club {
            id: ClubId::generate(),
            name: input.name.trim().to_string(),
            short_name: input.short_name,
            founded_year: input.founded_year,
            primary_color: input.primary_color,
            secondary_color: input.secondary_color,
            is_archived: false,
            created_at: crate::util::now(),
        };
        db.insert_club(&club)?;
        tracing::info!(club_id = %club.id, "club created");
        Ok(club.into())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateClub {
    pub club_id: ClubId,
    pub input: ClubInput,
}

impl Request for UpdateClub {
    type Response = ClubDto;
    const NAME: &'static str = "UpdateClub";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<ClubDto> {
        let existing = require_club(db, self.club_id)?;
        let input = self.input;
        let club = Club {
            name: input.name.trim().to_string(),
            short_name: input.short_name,
            founded_year: input.founded_year,
            primary_color: input.primary_color,
            secondary_color: input.secondary_color,
            ..existing
        };
        db.update_club(&club)?;
        Ok(club.into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArchiveClub {
    pub club_id: ClubId,
}

impl Request for ArchiveClub {
    type Response = ();
    const NAME: &'static str = "ArchiveClub";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        require_club(db, self.club_id)?;
        db.archive_club(self.club_id)?;
        tracing::info!(club_id = %self.club_id, "club archived");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetClubById {
    pub club_id: ClubId,
}

impl Request for GetClubById {
    type Response = ClubDto;
    const NAME: &'static str = "GetClubById";

    fn handle(self, db: &mut ClubDatabase) -> Result<ClubDto> {
        Ok(require_club(db, self.club_id)?.into())
    }
}

/// Active clubs only
#[derive(Debug, Clone, Copy, Default)]
pub struct ListClubs;

impl Request for ListClubs {
    type Response = Vec<ClubDto>;
    const NAME: &'static str = "ListClubs";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<ClubDto>> {
        Ok(db
            .list_active_clubs()?
            .into_iter()
            .map(ClubDto::from)
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecordDto {
    pub team_id: TeamId,
    pub team_name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub goal_difference: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubStatisticsDto {
    pub club_id: ClubId,
    pub age_group_count: u32,
    pub team_count: u32,
    pub player_count: u32,
    pub coach_count: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub teams: Vec<TeamRecordDto>,
}

#[derive(Debug, Clone, Copy)]
pub struct GetClubStatistics {
    pub club_id: ClubId,
}

impl Request for GetClubStatistics {
    type Response = ClubStatisticsDto;
    const NAME: &'static str = "GetClubStatistics";

    fn handle(self, db: &mut ClubDatabase) -> Result<ClubStatisticsDto> {
        require_club(db, self.club_id)?;
        let counts = db.club_counts(self.club_id)?;

        let mut overall = MatchTally::default();
        let mut teams = Vec::new();
        for team in db.list_teams_by_club(self.club_id)? {
            let tally = db.team_match_tally(team.id)?;
            overall.merge(&tally);
            teams.push(TeamRecordDto {
                team_id: team.id,
                team_name: team.name,
                matches_played: tally.played,
                wins: tally.wins,
                draws: tally.draws,
                losses: tally.losses,
                win_rate: tally.win_rate(),
                goal_difference: tally.goal_difference(),
            });
        }

        Ok(ClubStatisticsDto {
            club_id: self.club_id,
            age_group_count: counts.age_groups,
            team_count: counts.teams,
            player_count: counts.players,
            coach_count: counts.coaches,
            matches_played: overall.played,
            wins: overall.wins,
            draws: overall.draws,
            losses: overall.losses,
            win_rate: overall.win_rate(),
            goals_for: overall.goals_for,
            goals_against: overall.goals_against,
            goal_difference: overall.goal_difference(),
            teams,
        })
    }
}
