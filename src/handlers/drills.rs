//! Drills and drill templates
//!
//! Both are scoped to a club, an age group or a single team. Listings for a
//! scope include everything inherited from broader levels; a team never
//! sees another team's drills. A drill's scope is fixed at creation.

use super::{require_age_group, require_club, require_team};
use crate::domain::{AgeGroupId, ClubId, DrillId, DrillTemplateId, Role, Scope, ScopeLevel, TeamId};
use crate::error::{ClubError, Result};
use crate::mediator::{Caller, Request};
use crate::storage::{ClubDatabase, Drill, DrillTemplate};
use crate::util::{join_csv, parse_json_list, split_csv, to_json_list};
use crate::validation::{Validate, ValidationErrors, Validator};
use serde::{Deserialize, Serialize};

const MAX_TEMPLATE_DRILLS: usize = 30;

/// Check that the scope's age group and team belong to its club and fill in
/// the age group of a team scope.
pub(crate) fn resolve_scope(db: &ClubDatabase, scope: Scope) -> Result<Scope> {
    let club = require_club(db, scope.club_id)?;

    if let Some(team_id) = scope.team_id {
        let team = require_team(db, team_id)?;
        if team.club_id != club.id {
            return Err(ClubError::invalid_field(
                "teamId",
                "teamId must reference a team of this club",
            ));
        }
        if scope.age_group_id.is_some_and(|id| id != team.age_group_id) {
            return Err(ClubError::invalid_field(
                "ageGroupId",
                "ageGroupId does not match the team's age group",
            ));
        }
        return Ok(Scope {
            club_id: club.id,
            age_group_id: Some(team.age_group_id),
            team_id: Some(team.id),
        });
    }

    if let Some(age_group_id) = scope.age_group_id {
        let age_group = require_age_group(db, age_group_id)?;
        if age_group.club_id != club.id {
            return Err(ClubError::invalid_field(
                "ageGroupId",
                "ageGroupId must reference an age group of this club",
            ));
        }
    }

    Ok(scope)
}

/// Request body carrying a scope alongside the resource fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoped<T> {
    #[serde(flatten)]
    pub scope: Scope,
    #[serde(flatten)]
    pub input: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeDto {
    pub level: ScopeLevel,
    pub club_id: ClubId,
    pub age_group_id: Option<AgeGroupId>,
    pub team_id: Option<TeamId>,
}

impl From<Scope> for ScopeDto {
    fn from(scope: Scope) -> Self {
        Self {
            level: scope.level(),
            club_id: scope.club_id,
            age_group_id: scope.age_group_id,
            team_id: scope.team_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillInput {
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Validate for DrillInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator
            .required("name", &self.name)
            .length("name", &self.name, 2, 100)
            .required("description", &self.description)
            .length("description", &self.description, 1, 2000)
            .range("durationMinutes", self.duration_minutes, 1, 180);
        for item in &self.equipment {
            validator.required("equipment", item);
        }
        for tag in &self.tags {
            validator.ensure(!tag.contains(','), "tags", "Tags cannot contain commas");
        }
        validator.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillDto {
    pub id: DrillId,
    pub scope: ScopeDto,
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    pub equipment: Vec<String>,
    pub tags: Vec<String>,
    /// Defined at a broader level than the scope it was listed for
    pub is_inherited: bool,
    pub is_archived: bool,
}

impl DrillDto {
    fn for_scope(drill: Drill, viewer: &Scope) -> Self {
        Self {
            id: drill.id,
            is_inherited: drill.scope.level() < viewer.level(),
            scope: drill.scope.into(),
            equipment: parse_json_list(Some(&drill.equipment)),
            tags: split_csv(Some(&drill.tags)),
            name: drill.name,
            description: drill.description,
            duration_minutes: drill.duration_minutes,
            is_archived: drill.is_archived,
        }
    }
}

impl From<Drill> for DrillDto {
    fn from(drill: Drill) -> Self {
        let scope = drill.scope;
        Self::for_scope(drill, &scope)
    }
}

#[derive(Debug, Clone)]
pub struct CreateDrill {
    pub scope: Scope,
    pub input: DrillInput,
}

impl Request for CreateDrill {
    type Response = DrillDto;
    const NAME: &'static str = "CreateDrill";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<DrillDto> {
        let scope = resolve_scope(db, self.scope)?;
        let input = self.input;
        let drill = Drill {
            id: DrillId::generate(),
            scope,
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
            duration_minutes: input.duration_minutes,
            equipment: to_json_list(&input.equipment),
            tags: join_csv(&input.tags),
            is_archived: false,
        };
        db.insert_drill(&drill)?;
        tracing::info!(drill_id = %drill.id, level = %scope.level(), "drill created");
        Ok(drill.into())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateDrill {
    pub drill_id: DrillId,
    pub input: DrillInput,
}

impl Request for UpdateDrill {
    type Response = DrillDto;
    const NAME: &'static str = "UpdateDrill";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<DrillDto> {
        let existing = db
            .get_drill(self.drill_id)?
            .ok_or_else(|| ClubError::not_found("Drill", self.drill_id))?;
        let input = self.input;
        let drill = Drill {
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
            duration_minutes: input.duration_minutes,
            equipment: to_json_list(&input.equipment),
            tags: join_csv(&input.tags),
            ..existing
        };
        db.update_drill(&drill)?;
        Ok(drill.into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArchiveDrill {
    pub drill_id: DrillId,
}

impl Request for ArchiveDrill {
    type Response = ();
    const NAME: &'static str = "ArchiveDrill";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        if !db.archive_drill(self.drill_id)? {
            return Err(ClubError::not_found("Drill", self.drill_id));
        }
        Ok(())
    }
}

/// Active drills visible from a scope, own and inherited
#[derive(Debug, Clone, Copy)]
pub struct GetDrillsByScope {
    pub scope: Scope,
}

impl Request for GetDrillsByScope {
    type Response = Vec<DrillDto>;
    const NAME: &'static str = "GetDrillsByScope";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<DrillDto>> {
        let scope = resolve_scope(db, self.scope)?;
        Ok(db
            .list_visible_drills(&scope)?
            .into_iter()
            .map(|drill| DrillDto::for_scope(drill, &scope))
            .collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillTemplateInput {
    pub name: String,
    pub description: Option<String>,
    /// Drills in session order; a drill may appear more than once
    pub drill_ids: Vec<DrillId>,
}

impl Validate for DrillTemplateInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .required("name", &self.name)
            .length("name", &self.name, 2, 100)
            .max_length("description", self.description.as_deref(), 2000)
            .ensure(
                !self.drill_ids.is_empty(),
                "drillIds",
                "A template needs at least one drill",
            )
            .ensure(
                self.drill_ids.len() <= MAX_TEMPLATE_DRILLS,
                "drillIds",
                "A template can hold at most 30 drills",
            )
            .finish()
    }
}

/// Every drill must exist, be active and be visible from the template's scope
fn check_template_drills(db: &ClubDatabase, scope: &Scope, drill_ids: &[DrillId]) -> Result<()> {
    let mut errors = ValidationErrors::new();
    for id in drill_ids {
        match db.get_drill(*id)? {
            Some(drill) if drill.is_archived => {
                errors.add("drillIds", format!("Drill {} is archived", id))
            }
            Some(drill) if !scope.includes(&drill.scope) => {
                errors.add("drillIds", format!("Drill {} is not available in this scope", id))
            }
            Some(_) => {}
            None => errors.add("drillIds", format!("Drill {} does not exist", id)),
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillTemplateDto {
    pub id: DrillTemplateId,
    pub scope: ScopeDto,
    pub name: String,
    pub description: Option<String>,
    pub drill_ids: Vec<DrillId>,
    pub drill_count: usize,
    /// Sum over the drills that still exist
    pub total_duration_minutes: u32,
    pub is_inherited: bool,
    pub is_archived: bool,
}

impl DrillTemplateDto {
    fn build(db: &ClubDatabase, template: DrillTemplate, viewer: &Scope) -> Result<Self> {
        let drill_ids: Vec<DrillId> = parse_json_list(Some(&template.drill_ids));
        let total_duration_minutes = db
            .get_drills(&drill_ids)?
            .iter()
            .map(|drill| drill.duration_minutes)
            .sum();

        Ok(Self {
            id: template.id,
            is_inherited: template.scope.level() < viewer.level(),
            scope: template.scope.into(),
            name: template.name,
            description: template.description,
            drill_count: drill_ids.len(),
            drill_ids,
            total_duration_minutes,
            is_archived: template.is_archived,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateDrillTemplate {
    pub scope: Scope,
    pub input: DrillTemplateInput,
}

impl Request for CreateDrillTemplate {
    type Response = DrillTemplateDto;
    const NAME: &'static str = "CreateDrillTemplate";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<DrillTemplateDto> {
        let scope = resolve_scope(db, self.scope)?;
        check_template_drills(db, &scope, &self.input.drill_ids)?;

        let input = self.input;
        let template = DrillTemplate {
            id: DrillTemplateId::generate(),
            scope,
            name: input.name.trim().to_string(),
            description: input.description,
            drill_ids: to_json_list(&input.drill_ids),
            is_archived: false,
        };
        db.insert_drill_template(&template)?;
        DrillTemplateDto::build(db, template, &scope)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateDrillTemplate {
    pub template_id: DrillTemplateId,
    pub input: DrillTemplateInput,
}

impl Request for UpdateDrillTemplate {
    type Response = DrillTemplateDto;
    const NAME: &'static str = "UpdateDrillTemplate";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<DrillTemplateDto> {
        let existing = db
            .get_drill_template(self.template_id)?
            .ok_or_else(|| ClubError::not_found("DrillTemplate", self.template_id))?;
        check_template_drills(db, &existing.scope, &self.input.drill_ids)?;

        let input = self.input;
        let template = DrillTemplate {
            name: input.name.trim().to_string(),
            description: input.description,
            drill_ids: to_json_list(&input.drill_ids),
            ..existing
        };
        db.update_drill_template(&template)?;
        let scope = template.scope;
        DrillTemplateDto::build(db, template, &scope)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetDrillTemplateById {
    pub template_id: DrillTemplateId,
}

impl Request for GetDrillTemplateById {
    type Response = DrillTemplateDto;
    const NAME: &'static str = "GetDrillTemplateById";

    fn handle(self, db: &mut ClubDatabase) -> Result<DrillTemplateDto> {
        let template = db
            .get_drill_template(self.template_id)?
            .ok_or_else(|| ClubError::not_found("DrillTemplate", self.template_id))?;
        let scope = template.scope;
        DrillTemplateDto::build(db, template, &scope)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetDrillTemplatesByScope {
    pub scope: Scope,
}

impl Request for GetDrillTemplatesByScope {
    type Response = Vec<DrillTemplateDto>;
    const NAME: &'static str = "GetDrillTemplatesByScope";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<DrillTemplateDto>> {
        let scope = resolve_scope(db, self.scope)?;
        db.list_visible_drill_templates(&scope)?
            .into_iter()
            .map(|template| DrillTemplateDto::build(db, template, &scope))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArchiveDrillTemplate {
    pub template_id: DrillTemplateId,
}

impl Request for ArchiveDrillTemplate {
    type Response = ();
    const NAME: &'static str = "ArchiveDrillTemplate";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        if !db.archive_drill_template(self.template_id)? {
            return Err(ClubError::not_found("DrillTemplate", self.template_id));
        }
        Ok(())
    }
}
