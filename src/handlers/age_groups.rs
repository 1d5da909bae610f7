//! Age group commands and queries

use super::{ensure_active, require_age_group, require_club};
use crate::domain::{AgeGroupId, ClubId, Role};
use crate::error::Result;
use crate::mediator::{Caller, Request};
use crate::storage::{AgeGroup, ClubDatabase};
use crate::util::{parse_json_list, to_json_list};
use crate::validation::{Validate, ValidationErrors, Validator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupInput {
    pub name: String,
    /// Short code such as "U12"
    pub code: String,
    #[serde(default)]
    pub seasons: Vec<String>,
    pub default_squad_size: u32,
}

impl Validate for AgeGroupInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator
            .required("name", &self.name)
            .length("name", &self.name, 2, 50)
            .required("code", &self.code)
            .length("code", &self.code, 2, 10)
            .range("defaultSquadSize", self.default_squad_size, 5, 40);
        for season in &self.seasons {
            validator.length("seasons", season, 4, 20);
        }
        validator.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupDto {
    pub id: AgeGroupId,
    pub club_id: ClubId,
    pub name: String,
    pub code: String,
    pub seasons: Vec<String>,
    pub default_squad_size: u32,
    pub is_archived: bool,
}

impl From<AgeGroup> for AgeGroupDto {
    fn from(age_group: AgeGroup) -> Self {
        Self {
            id: age_group.id,
            club_id: age_group.club_id,
            name: age_group.name,
            code: age_group.code,
            seasons: parse_json_list(Some(&age_group.seasons)),
            default_squad_size: age_group.default_squad_size,
            is_archived: age_group.is_archived,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAgeGroup {
    pub club_id: ClubId,
    pub input: AgeGroupInput,
}

impl Request for CreateAgeGroup {
    type Response = AgeGroupDto;
    const NAME: &'static str = "CreateAgeGroup";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<AgeGroupDto> {
        let club = require_club(db, self.club_id)?;
        ensure_active(club.is_archived, "Club")?;

        let age_group = AgeGroup {
            id: AgeGroupId::generate(),
            club_id: club.id,
            name: self.input.name.trim().to_string(),
            code: self.input.code.trim().to_uppercase(),
            seasons: to_json_list(&self.input.seasons),
            default_squad_size: self.input.default_squad_size,
            is_archived: false,
        };
        db.insert_age_group(&age_group)?;
        Ok(age_group.into())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateAgeGroup {
    pub age_group_id: AgeGroupId,
    pub input: AgeGroupInput,
}

impl Request for UpdateAgeGroup {
    type Response = AgeGroupDto;
    const NAME: &'static str = "UpdateAgeGroup";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<AgeGroupDto> {
        let existing = require_age_group(db, self.age_group_id)?;
        let age_group = AgeGroup {
            name: self.input.name.trim().to_string(),
            code: self.input.code.trim().to_uppercase(),
            seasons: to_json_list(&self.input.seasons),
            default_squad_size: self.input.default_squad_size,
            ..existing
        };
        db.update_age_group(&age_group)?;
        Ok(age_group.into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArchiveAgeGroup {
    pub age_group_id: AgeGroupId,
}

impl Request for ArchiveAgeGroup {
    type Response = ();
    const NAME: &'static str = "ArchiveAgeGroup";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        require_age_group(db, self.age_group_id)?;
        db.archive_age_group(self.age_group_id)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetAgeGroupsByClubId {
    pub club_id: ClubId,
}

impl Request for GetAgeGroupsByClubId {
    type Response = Vec<AgeGroupDto>;
    const NAME: &'static str = "GetAgeGroupsByClubId";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<AgeGroupDto>> {
        require_club(db, self.club_id)?;
        Ok(db
            .list_age_groups_by_club(self.club_id)?
            .into_iter()
            .map(AgeGroupDto::from)
            .collect())
    }
}
