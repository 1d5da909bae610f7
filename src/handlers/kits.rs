//! Kit commands and queries. Kits are hard-deleted.

use super::{ensure_active, require_club, require_team};
use crate::domain::{ClubId, KitId, KitType, Role, TeamId};
use crate::error::{ClubError, Result};
use crate::mediator::{Caller, Request};
use crate::storage::{ClubDatabase, Kit};
use crate::validation::{Validate, ValidationErrors, Validator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitInput {
    pub name: String,
    #[serde(default)]
    pub kit_type: KitType,
    pub team_id: Option<TeamId>,
    pub shirt_color: String,
    pub shorts_color: String,
    pub socks_color: String,
    pub season: Option<String>,
}

impl Validate for KitInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .required("name", &self.name)
            .length("name", &self.name, 2, 100)
            .hex_color("shirtColor", &self.shirt_color)
            .hex_color("shortsColor", &self.shorts_color)
            .hex_color("socksColor", &self.socks_color)
            .max_length("season", self.season.as_deref(), 20)
            .finish()
    }
}

/// A team-specific kit must name a team of the same club
fn check_kit_team(db: &ClubDatabase, club_id: ClubId, team_id: Option<TeamId>) -> Result<()> {
    let Some(team_id) = team_id else {
        return Ok(());
    };
    match db.get_team(team_id)? {
        Some(team) if team.club_id == club_id => Ok(()),
        _ => Err(ClubError::invalid_field(
            "teamId",
            "teamId must reference a team of this club",
        )),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitDto {
    pub id: KitId,
    pub club_id: ClubId,
    pub team_id: Option<TeamId>,
    pub name: String,
    pub kit_type: KitType,
    pub shirt_color: String,
    pub shorts_color: String,
    pub socks_color: String,
    pub season: Option<String>,
}

impl From<Kit> for KitDto {
    fn from(kit: Kit) -> Self {
        Self {
            id: kit.id,
            club_id: kit.club_id,
            team_id: kit.team_id,
            name: kit.name,
            kit_type: KitType::from_code(kit.kit_type),
            shirt_color: kit.shirt_color,
            shorts_color: kit.shorts_color,
            socks_color: kit.socks_color,
            season: kit.season,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateKit {
    pub club_id: ClubId,
    pub input: KitInput,
}

impl Request for CreateKit {
    type Response = KitDto;
    const NAME: &'static str = "CreateKit";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<KitDto> {
        let club = require_club(db, self.club_id)?;
        ensure_active(club.is_archived, "Club")?;
        check_kit_team(db, club.id, self.input.team_id)?;

        let input = self.input;
        let kit = Kit {
            id: KitId::generate(),
            club_id: club.id,
            team_id: input.team_id,
            name: input.name.trim().to_string(),
            kit_type: input.kit_type.code(),
            shirt_color: input.shirt_color,
            shorts_color: input.shorts_color,
            socks_color: input.socks_color,
            season: input.season,
        };
        db.insert_kit(&kit)?;
        Ok(kit.into())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateKit {
    pub kit_id: KitId,
    pub input: KitInput,
}

impl Request for UpdateKit {
    type Response = KitDto;
    const NAME: &'static str = "UpdateKit";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<KitDto> {
        let existing = db
            .get_kit(self.kit_id)?
            .ok_or_else(|| ClubError::not_found("Kit", self.kit_id))?;
        check_kit_team(db, existing.club_id, self.input.team_id)?;

        let input = self.input;
        let kit = Kit {
            team_id: input.team_id,
            name: input.name.trim().to_string(),
            kit_type: input.kit_type.code(),
            shirt_color: input.shirt_color,
            shorts_color: input.shorts_color,
            socks_color: input.socks_color,
            season: input.season,
            ..existing
        };
        db.update_kit(&kit)?;
        Ok(kit.into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteKit {
    pub kit_id: KitId,
}

impl Request for DeleteKit {
    type Response = ();
    const NAME: &'static str = "DeleteKit";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        if db.get_kit(self.kit_id)?.is_none() {
            return Err(ClubError::not_found("Kit", self.kit_id));
        }
        db.delete_kit(self.kit_id)?;
        tracing::info!(kit_id = %self.kit_id, "kit deleted");
        Ok(())
    }
}

/// Kits of a club. With `team_id`, the club-wide kits plus that team's own.
#[derive(Debug, Clone, Copy)]
pub struct GetKitsByClubId {
    pub club_id: ClubId,
    pub team_id: Option<TeamId>,
}

impl Request for GetKitsByClubId {
    type Response = Vec<KitDto>;
    const NAME: &'static str = "GetKitsByClubId";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<KitDto>> {
        require_club(db, self.club_id)?;
        if let Some(team_id) = self.team_id {
            require_team(db, team_id)?;
        }
        Ok(db
            .list_kits(self.club_id, self.team_id)?
            .into_iter()
            .map(KitDto::from)
            .collect())
    }
}
