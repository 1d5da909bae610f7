//! Player commands and queries

use super::{ensure_active, require_club, require_player};
use crate::domain::{ClubId, EmergencyContactId, PlayerId, Role};
use crate::error::Result;
use crate::mediator::{Caller, Request};
use crate::storage::{ClubDatabase, EmergencyContact, Player};
use crate::util::{parse_json_list, to_json_list};
use crate::validation::{Validate, ValidationErrors, Validator};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const MAX_PREFERRED_POSITIONS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContactInput {
    pub name: String,
    pub phone: String,
    pub relationship: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInput {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub preferred_positions: Vec<String>,
    pub medical_notes: Option<String>,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContactInput>,
}

impl Validate for PlayerInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator
            .required("firstName", &self.first_name)
            .length("firstName", &self.first_name, 1, 100)
            .required("lastName", &self.last_name)
            .length("lastName", &self.last_name, 1, 100)
            .ensure(
                self.date_of_birth <= Utc::now().date_naive(),
                "dateOfBirth",
                "dateOfBirth cannot be in the future",
            )
            .ensure(
                self.preferred_positions.len() <= MAX_PREFERRED_POSITIONS,
                "preferredPositions",
                "At most 5 preferred positions can be listed",
            )
            .max_length("medicalNotes", self.medical_notes.as_deref(), 2000);

        for position in &self.preferred_positions {
            validator.length("preferredPositions", position, 1, 10);
        }

        for (i, contact) in self.emergency_contacts.iter().enumerate() {
            validator
                .required(&format!("emergencyContacts[{}].name", i), &contact.name)
                .required(&format!("emergencyContacts[{}].phone", i), &contact.phone)
                .length(&format!("emergencyContacts[{}].phone", i), &contact.phone, 6, 30)
                .required(
                    &format!("emergencyContacts[{}].relationship", i),
                    &contact.relationship,
                );
        }

        let primary_contacts = self
            .emergency_contacts
            .iter()
            .filter(|c| c.is_primary)
            .count();
        validator.ensure(
            primary_contacts <= 1,
            "emergencyContacts",
            "Only one emergency contact can be marked as primary",
        );

        validator.finish()
    }
}

impl PlayerInput {
    fn contacts_for(&self, player_id: PlayerId) -> Vec<EmergencyContact> {
        self.emergency_contacts
            .iter()
            .map(|c| EmergencyContact {
                id: EmergencyContactId::generate(),
                player_id,
                name: c.name.trim().to_string(),
                phone: c.phone.trim().to_string(),
                relationship: c.relationship.trim().to_string(),
                is_primary: c.is_primary,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContactDto {
    pub id: EmergencyContactId,
    pub name: String,
    pub phone: String,
    pub relationship: String,
    pub is_primary: bool,
}

impl From<EmergencyContact> for EmergencyContactDto {
    fn from(contact: EmergencyContact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            phone: contact.phone,
            relationship: contact.relationship,
            is_primary: contact.is_primary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub id: PlayerId,
    pub club_id: ClubId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub preferred_positions: Vec<String>,
    pub medical_notes: Option<String>,
    pub emergency_contacts: Vec<EmergencyContactDto>,
    pub is_archived: bool,
}

impl PlayerDto {
    fn from_parts(player: Player, contacts: Vec<EmergencyContact>) -> Self {
        Self {
            id: player.id,
            club_id: player.club_id,
            preferred_positions: parse_json_list(Some(&player.preferred_positions)),
            first_name: player.first_name,
            last_name: player.last_name,
            date_of_birth: player.date_of_birth,
            medical_notes: player.medical_notes,
            emergency_contacts: contacts.into_iter().map(Into::into).collect(),
            is_archived: player.is_archived,
        }
    }
}

/// Listing shape: no contact or medical details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummaryDto {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub preferred_positions: Vec<String>,
}

impl From<Player> for PlayerSummaryDto {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            preferred_positions: parse_json_list(Some(&player.preferred_positions)),
            first_name: player.first_name,
            last_name: player.last_name,
            date_of_birth: player.date_of_birth,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePlayer {
    pub club_id: ClubId,
    pub input: PlayerInput,
}

impl Request for CreatePlayer {
    type Response = PlayerDto;
    const NAME: &'static str = "CreatePlayer";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<PlayerDto> {
        let club = require_club(db, self.club_id)?;
        ensure_active(club.is_archived, "Club")?;

        let id = PlayerId::generate();
        let contacts = self.input.contacts_for(id);
        let input = self.input;
        let player = Player {
            id,
            club_id: club.id,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            date_of_birth: input.date_of_birth,
            preferred_positions: to_json_list(&input.preferred_positions),
            medical_notes: input.medical_notes,
            is_archived: false,
        };
        db.insert_player(&player, &contacts)?;
        tracing::info!(player_id = %player.id, club_id = %club.id, "player created");
        Ok(PlayerDto::from_parts(player, contacts))
    }
}

#[derive(Debug, Clone)]
pub struct UpdatePlayer {
    pub player_id: PlayerId,
    pub input: PlayerInput,
}

impl Request for UpdatePlayer {
    type Response = PlayerDto;
    const NAME: &'static str = "UpdatePlayer";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<PlayerDto> {
        let existing = require_player(db, self.player_id)?;
        let contacts = self.input.contacts_for(existing.id);
        let input = self.input;
        let player = Player {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            date_of_birth: input.date_of_birth,
            preferred_positions: to_json_list(&input.preferred_positions),
            medical_notes: input.medical_notes,
            ..existing
        };
        db.update_player(&player, &contacts)?;
        Ok(PlayerDto::from_parts(player, contacts))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArchivePlayer {
    pub player_id: PlayerId,
}

impl Request for ArchivePlayer {
    type Response = ();
    const NAME: &'static str = "ArchivePlayer";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        require_player(db, self.player_id)?;
        db.archive_player(self.player_id)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetPlayerById {
    pub player_id: PlayerId,
}

impl Request for GetPlayerById {
    type Response = PlayerDto;
    const NAME: &'static str = "GetPlayerById";

    fn handle(self, db: &mut ClubDatabase) -> Result<PlayerDto> {
        let player = require_player(db, self.player_id)?;
        let contacts = db.list_emergency_contacts(player.id)?;
        Ok(PlayerDto::from_parts(player, contacts))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetPlayersByClubId {
    pub club_id: ClubId,
}

impl Request for GetPlayersByClubId {
    type Response = Vec<PlayerSummaryDto>;
    const NAME: &'static str = "GetPlayersByClubId";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<PlayerSummaryDto>> {
        require_club(db, self.club_id)?;
        Ok(db
            .list_players_by_club(self.club_id)?
            .into_iter()
            .map(PlayerSummaryDto::from)
            .collect())
    }
}
