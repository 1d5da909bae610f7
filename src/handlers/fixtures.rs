//! Seed data shared by handler tests

use super::age_groups::{AgeGroupDto, AgeGroupInput, CreateAgeGroup};
use super::clubs::{ClubDto, ClubInput, CreateClub};
use super::coaches::{CoachDto, CoachInput, CreateCoach};
use super::drills::DrillInput;
use super::matches::{CreateMatch, MatchDto, MatchInput};
use super::players::{CreatePlayer, EmergencyContactInput, PlayerDto, PlayerInput};
use super::teams::{CreateTeam, TeamDto, TeamInput};
use crate::domain::{AgeGroupId, ClubId, MatchStatus, Role, TeamId};
use crate::error::Result;
use crate::mediator::{dispatch, Caller, Request};
use crate::storage::ClubDatabase;
use chrono::{NaiveDate, TimeZone, Utc};

pub(crate) fn admin() -> Caller {
    Caller::with_role(Role::Admin)
}

pub(crate) fn coach() -> Caller {
    Caller::with_role(Role::Coach)
}

/// Dispatch as an admin
pub(crate) fn run<R: Request>(db: &mut ClubDatabase, request: R) -> Result<R::Response> {
    dispatch(db, &admin(), request)
}

pub(crate) fn club_input(name: &str) -> ClubInput {
    ClubInput {
        name: name.to_string(),
        short_name: None,
        founded_year: Some(1904),
        primary_color: "#1A2B3C".to_string(),
        secondary_color: "#FFF".to_string(),
    }
}

pub(crate) fn seed_club(db: &mut ClubDatabase) -> ClubDto {
    run(db, CreateClub { input: club_input("Riverside FC") }).unwrap()
}

pub(crate) fn age_group_input(code: &str) -> AgeGroupInput {
    AgeGroupInput {
        name: format!("{} squad", code),
        code: code.to_string(),
        seasons: vec!["2025/26".to_string()],
        default_squad_size: 16,
    }
}

pub(crate) fn seed_age_group(db: &mut ClubDatabase, club_id: ClubId, code: &str) -> AgeGroupDto {
    run(
        db,
        CreateAgeGroup {
            club_id,
            input: age_group_input(code),
        },
    )
    .unwrap()
}

pub(crate) fn team_input(name: &str) -> TeamInput {
    TeamInput {
        name: name.to_string(),
        level: "A".to_string(),
        season: "2025/26".to_string(),
        primary_color: "#CC0000".to_string(),
        secondary_color: None,
    }
}

pub(crate) fn seed_team(db: &mut ClubDatabase, age_group_id: AgeGroupId, name: &str) -> TeamDto {
    run(
        db,
        CreateTeam {
            age_group_id,
            input: team_input(name),
        },
    )
    .unwrap()
}

pub(crate) fn contact(name: &str, is_primary: bool) -> EmergencyContactInput {
    EmergencyContactInput {
        name: name.to_string(),
        phone: "07700 900123".to_string(),
        relationship: "Parent".to_string(),
        is_primary,
    }
}

pub(crate) fn player_input(first_name: &str) -> PlayerInput {
    PlayerInput {
        first_name: first_name.to_string(),
        last_name: "Walker".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2013, 4, 18).unwrap(),
        preferred_positions: vec!["CM".to_string(), "RW".to_string()],
        medical_notes: None,
        emergency_contacts: vec![contact("Sam Walker", true)],
    }
}

pub(crate) fn seed_player(db: &mut ClubDatabase, club_id: ClubId, first_name: &str) -> PlayerDto {
    run(
        db,
        CreatePlayer {
            club_id,
            input: player_input(first_name),
        },
    )
    .unwrap()
}

pub(crate) fn seed_coach(db: &mut ClubDatabase, club_id: ClubId) -> CoachDto {
    run(
        db,
        CreateCoach {
            club_id,
            input: CoachInput {
                first_name: "Alex".to_string(),
                last_name: "Morgan".to_string(),
                email: "alex.morgan@example.com".to_string(),
                phone: None,
                certifications: vec!["UEFA B".to_string()],
            },
        },
    )
    .unwrap()
}

pub(crate) fn match_input(
    status: MatchStatus,
    goals_for: Option<u32>,
    goals_against: Option<u32>,
) -> MatchInput {
    MatchInput {
        opposition: "Hillside Rovers".to_string(),
        kick_off: Utc.with_ymd_and_hms(2025, 9, 13, 10, 0, 0).unwrap(),
        venue: Some("Riverside Park".to_string()),
        is_home: true,
        status,
        goals_for,
        goals_against,
        notes: None,
    }
}

pub(crate) fn seed_result(
    db: &mut ClubDatabase,
    team_id: TeamId,
    goals_for: u32,
    goals_against: u32,
) -> MatchDto {
    run(
        db,
        CreateMatch {
            team_id,
            input: match_input(MatchStatus::Completed, Some(goals_for), Some(goals_against)),
        },
    )
    .unwrap()
}

pub(crate) fn drill_input(name: &str, duration_minutes: u32) -> DrillInput {
    DrillInput {
        name: name.to_string(),
        description: "Small-sided passing exercise".to_string(),
        duration_minutes,
        equipment: vec!["cones".to_string(), "bibs".to_string()],
        tags: vec!["passing".to_string()],
    }
}
