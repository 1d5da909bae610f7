//! Team membership: players in a squad and coaches assigned to a team
//!
//! Squad numbers are unique within a team among active players. The check
//! runs before any write; assigning a player the number they already wear
//! is accepted as a no-op.

use super::{ensure_active, require_coach, require_player, require_team};
use crate::domain::{CoachId, CoachRole, PlayerId, Role, TeamId};
use crate::error::{ClubError, Result};
use crate::mediator::{Caller, Request};
use crate::storage::{ClubDatabase, PlayerTeam, SquadMember, TeamCoach};
use crate::util::parse_json_list;
use crate::validation::{ValidationErrors, Validator};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const MIN_SQUAD_NUMBER: u32 = 1;
const MAX_SQUAD_NUMBER: u32 = 99;

fn validate_squad_number(squad_number: Option<u32>) -> std::result::Result<(), ValidationErrors> {
    Validator::new()
        .optional_range(
            "squadNumber",
            squad_number,
            MIN_SQUAD_NUMBER,
            MAX_SQUAD_NUMBER,
        )
        .finish()
}

/// Fail when `squad_number` is worn by anyone other than `player_id`
fn ensure_squad_number_free(
    db: &ClubDatabase,
    team_id: TeamId,
    player_id: PlayerId,
    squad_number: Option<u32>,
) -> Result<()> {
    if let Some(number) = squad_number {
        if let Some(holder) = db.find_squad_number_holder(team_id, number)? {
            if holder != player_id {
                return Err(ClubError::failure(format!(
                    "Squad number {} is already assigned to another player in this team",
                    number
                )));
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTeamDto {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub squad_number: Option<u32>,
}

impl From<PlayerTeam> for PlayerTeamDto {
    fn from(membership: PlayerTeam) -> Self {
        Self {
            player_id: membership.player_id,
            team_id: membership.team_id,
            squad_number: membership.squad_number,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlayerToTeamInput {
    pub player_id: PlayerId,
    pub squad_number: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct AddPlayerToTeam {
    pub team_id: TeamId,
    pub input: AddPlayerToTeamInput,
}

impl Request for AddPlayerToTeam {
    type Response = PlayerTeamDto;
    const NAME: &'static str = "AddPlayerToTeam";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validate_squad_number(self.input.squad_number)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<PlayerTeamDto> {
        let team = require_team(db, self.team_id)?;
        let player = require_player(db, self.input.player_id)?;
        ensure_active(team.is_archived, "Team")?;
        ensure_active(player.is_archived, "Player")?;

        if player.club_id != team.club_id {
            return Err(ClubError::failure(
                "Player belongs to a different club than the team",
            ));
        }
        if db.get_membership(team.id, player.id)?.is_some() {
            return Err(ClubError::failure("Player is already a member of this team"));
        }
        ensure_squad_number_free(db, team.id, player.id, self.input.squad_number)?;

        let membership = PlayerTeam {
            player_id: player.id,
            team_id: team.id,
            squad_number: self.input.squad_number,
            joined_at: crate::util::now(),
        };
        db.insert_membership(&membership)?;
        tracing::info!(
            team_id = %team.id,
            player_id = %player.id,
            squad_number = ?membership.squad_number,
            "player added to team"
        );
        Ok(membership.into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSquadNumberInput {
    pub squad_number: Option<u32>,
}

#[derive(Debug, Clone, Copy)]
pub struct UpdateSquadNumber {
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub squad_number: Option<u32>,
}

impl Request for UpdateSquadNumber {
    type Response = PlayerTeamDto;
    const NAME: &'static str = "UpdateSquadNumber";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validate_squad_number(self.squad_number)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<PlayerTeamDto> {
        let membership = db
            .get_membership(self.team_id, self.player_id)?
            .ok_or_else(|| {
                ClubError::not_found("PlayerTeam", format!("{}/{}", self.team_id, self.player_id))
            })?;

        if membership.squad_number == self.squad_number {
            return Ok(membership.into());
        }

        ensure_squad_number_free(db, self.team_id, self.player_id, self.squad_number)?;
        db.update_squad_number(self.team_id, self.player_id, self.squad_number)?;

        Ok(PlayerTeamDto {
            player_id: self.player_id,
            team_id: self.team_id,
            squad_number: self.squad_number,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RemovePlayerFromTeam {
    pub team_id: TeamId,
    pub player_id: PlayerId,
}

impl Request for RemovePlayerFromTeam {
    type Response = ();
    const NAME: &'static str = "RemovePlayerFromTeam";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        if !db.remove_membership(self.team_id, self.player_id)? {
            return Err(ClubError::not_found(
                "PlayerTeam",
                format!("{}/{}", self.team_id, self.player_id),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadPlayerDto {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub preferred_positions: Vec<String>,
    pub squad_number: Option<u32>,
}

impl From<SquadMember> for SquadPlayerDto {
    fn from(member: SquadMember) -> Self {
        Self {
            player_id: member.player_id,
            team_id: member.team_id,
            first_name: member.first_name,
            last_name: member.last_name,
            date_of_birth: member.date_of_birth,
            preferred_positions: parse_json_list(Some(&member.preferred_positions)),
            squad_number: member.squad_number,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetPlayersByTeamId {
    pub team_id: TeamId,
}

impl Request for GetPlayersByTeamId {
    type Response = Vec<SquadPlayerDto>;
    const NAME: &'static str = "GetPlayersByTeamId";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<SquadPlayerDto>> {
        require_team(db, self.team_id)?;
        Ok(db
            .list_squad(self.team_id)?
            .into_iter()
            .map(SquadPlayerDto::from)
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCoachDto {
    pub team_id: TeamId,
    pub coach_id: CoachId,
    pub first_name: String,
    pub last_name: String,
    pub role: CoachRole,
}

impl From<TeamCoach> for TeamCoachDto {
    fn from(assignment: TeamCoach) -> Self {
        Self {
            team_id: assignment.team_id,
            coach_id: assignment.coach_id,
            first_name: assignment.first_name,
            last_name: assignment.last_name,
            role: CoachRole::from_code(assignment.role),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCoachInput {
    pub coach_id: CoachId,
    #[serde(default)]
    pub role: CoachRole,
}

#[derive(Debug, Clone)]
pub struct AssignCoachToTeam {
    pub team_id: TeamId,
    pub input: AssignCoachInput,
}

impl Request for AssignCoachToTeam {
    type Response = TeamCoachDto;
    const NAME: &'static str = "AssignCoachToTeam";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<TeamCoachDto> {
        let team = require_team(db, self.team_id)?;
        let coach = require_coach(db, self.input.coach_id)?;
        ensure_active(team.is_archived, "Team")?;
        ensure_active(coach.is_archived, "Coach")?;

        if coach.club_id != team.club_id {
            return Err(ClubError::failure(
                "Coach belongs to a different club than the team",
            ));
        }

        db.upsert_team_coach(team.id, coach.id, self.input.role.code())?;
        Ok(TeamCoachDto {
            team_id: team.id,
            coach_id: coach.id,
            first_name: coach.first_name,
            last_name: coach.last_name,
            role: self.input.role,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RemoveCoachFromTeam {
    pub team_id: TeamId,
    pub coach_id: CoachId,
}

impl Request for RemoveCoachFromTeam {
    type Response = ();
    const NAME: &'static str = "RemoveCoachFromTeam";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        if !db.remove_team_coach(self.team_id, self.coach_id)? {
            return Err(ClubError::not_found(
                "TeamCoach",
                format!("{}/{}", self.team_id, self.coach_id),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetCoachesByTeamId {
    pub team_id: TeamId,
}

impl Request for GetCoachesByTeamId {
    type Response = Vec<TeamCoachDto>;
    const NAME: &'static str = "GetCoachesByTeamId";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<TeamCoachDto>> {
        require_team(db, self.team_id)?;
        Ok(db
            .list_team_coaches(self.team_id)?
            .into_iter()
            .map(TeamCoachDto::from)
            .collect())
    }
}
