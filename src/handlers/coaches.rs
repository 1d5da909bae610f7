//! Coach commands and queries

use super::{ensure_active, require_club, require_coach};
use crate::domain::{ClubId, CoachId, Role};
use crate::error::Result;
use crate::mediator::{Caller, Request};
use crate::storage::{ClubDatabase, Coach};
use crate::util::{join_csv, split_csv};
use crate::validation::{Validate, ValidationErrors, Validator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

impl Validate for CoachInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator
            .required("firstName", &self.first_name)
            .length("firstName", &self.first_name, 1, 100)
            .required("lastName", &self.last_name)
            .length("lastName", &self.last_name, 1, 100)
            .email("email", &self.email)
            .max_length("phone", self.phone.as_deref(), 30);
        for certification in &self.certifications {
            validator.ensure(
                !certification.contains(','),
                "certifications",
                "Certification names cannot contain commas",
            );
        }
        validator.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachDto {
    pub id: CoachId,
    pub club_id: ClubId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub certifications: Vec<String>,
    pub is_archived: bool,
}

impl From<Coach> for CoachDto {
    fn from(coach: Coach) -> Self {
        Self {
            id: coach.id,
            club_id: coach.club_id,
            certifications: split_csv(Some(&coach.certifications)),
            first_name: coach.first_name,
            last_name: coach.last_name,
            email: coach.email,
            phone: coach.phone,
            is_archived: coach.is_archived,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCoach {
    pub club_id: ClubId,
    pub input: CoachInput,
}

impl Request for CreateCoach {
    type Response = CoachDto;
    const NAME: &'static str = "CreateCoach";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<CoachDto> {
        let club = require_club(db, self.club_id)?;
        ensure_active(club.is_archived, "Club")?;

        let input = self.input;
        let coach = Coach {
            id: CoachId::generate(),
            club_id: club.id,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            phone: input.phone,
            certifications: join_csv(&input.certifications),
            is_archived: false,
        };
        db.insert_coach(&coach)?;
        Ok(coach.into())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCoach {
    pub coach_id: CoachId,
    pub input: CoachInput,
}

impl Request for UpdateCoach {
    type Response = CoachDto;
    const NAME: &'static str = "UpdateCoach";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<CoachDto> {
        let existing = require_coach(db, self.coach_id)?;
        let input = self.input;
        let coach = Coach {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            phone: input.phone,
            certifications: join_csv(&input.certifications),
            ..existing
        };
        db.update_coach(&coach)?;
        Ok(coach.into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArchiveCoach {
    pub coach_id: CoachId,
}

impl Request for ArchiveCoach {
    type Response = ();
    const NAME: &'static str = "ArchiveCoach";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        require_coach(db, self.coach_id)?;
        db.archive_coach(self.coach_id)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetCoachById {
    pub coach_id: CoachId,
}

impl Request for GetCoachById {
    type Response = CoachDto;
    const NAME: &'static str = "GetCoachById";

    fn handle(self, db: &mut ClubDatabase) -> Result<CoachDto> {
        Ok(require_coach(db, self.coach_id)?.into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetCoachesByClubId {
    pub club_id: ClubId,
}

impl Request for GetCoachesByClubId {
    type Response = Vec<CoachDto>;
    const NAME: &'static str = "GetCoachesByClubId";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<CoachDto>> {
        require_club(db, self.club_id)?;
        Ok(db
            .list_coaches_by_club(self.club_id)?
            .into_iter()
            .map(CoachDto::from)
            .collect())
    }
}
