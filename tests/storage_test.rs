//! Storage tests against a file-backed database

use chrono::{NaiveDate, TimeZone, Utc};
use club_manager::storage::*;
use club_manager::{AgeGroupId, ClubId, KitId, PlayerId, TeamId};
use tempfile::TempDir;

fn club(id: ClubId) -> Club {
    Club {
        id,
        name: "Riverside FC".to_string(),
        short_name: Some("RFC".to_string()),
        founded_year: Some(1904),
        primary_color: "#1A2B3C".to_string(),
        secondary_color: "#FFFFFF".to_string(),
        is_archived: false,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
    }
}

fn seed(db: &mut ClubDatabase) -> (ClubId, TeamId) {
    let club_id = ClubId::generate();
    db.insert_club(&club(club_id)).unwrap();

    let age_group_id = AgeGroupId::generate();
    db.insert_age_group(&AgeGroup {
        id: age_group_id,
        club_id,
        name: "Under 12s".to_string(),
        code: "U12".to_string(),
        seasons: r#"["2025/26"]"#.to_string(),
        default_squad_size: 14,
        is_archived: false,
    })
    .unwrap();

    let team_id = TeamId::generate();
    db.insert_team(&Team {
        id: team_id,
        club_id,
        age_group_id,
        name: "U12 Reds".to_string(),
        level: "A".to_string(),
        season: "2025/26".to_string(),
        primary_color: "#CC0000".to_string(),
        secondary_color: None,
        is_archived: false,
    })
    .unwrap();

    (club_id, team_id)
}

fn player(club_id: ClubId, first_name: &str) -> Player {
    Player {
        id: PlayerId::generate(),
        club_id,
        first_name: first_name.to_string(),
        last_name: "Walker".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2013, 4, 18).unwrap(),
        preferred_positions: r#"["CM"]"#.to_string(),
        medical_notes: None,
        is_archived: false,
    }
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("club.db");

    let (club_id, team_id) = {
        let mut db = ClubDatabase::open(&path).unwrap();
        seed(&mut db)
    };

    let db = ClubDatabase::open(&path).unwrap();
    let stored = db.get_club(club_id).unwrap().unwrap();
    assert_eq!(stored, club(club_id));
    assert_eq!(db.get_team(team_id).unwrap().unwrap().name, "U12 Reds");
}

#[test]
fn test_membership_lifecycle() {
    let mut db = ClubDatabase::new_in_memory().unwrap();
    let (club_id, team_id) = seed(&mut db);
    let ava = player(club_id, "Ava");
    db.insert_player(&ava, &[]).unwrap();

    db.insert_membership(&PlayerTeam {
        player_id: ava.id,
        team_id,
        squad_number: Some(7),
        joined_at: Utc::now(),
    })
    .unwrap();
    assert_eq!(db.find_squad_number_holder(team_id, 7).unwrap(), Some(ava.id));

    let squad = db.list_squad(team_id).unwrap();
    assert_eq!(squad.len(), 1);
    assert_eq!(squad[0].squad_number, Some(7));

    assert!(db.remove_membership(team_id, ava.id).unwrap());
    assert!(!db.remove_membership(team_id, ava.id).unwrap());
    assert!(db.list_squad(team_id).unwrap().is_empty());
}

#[test]
fn test_kit_round_trip_keeps_raw_type_code() {
    let mut db = ClubDatabase::new_in_memory().unwrap();
    let (club_id, team_id) = seed(&mut db);

    let kit = Kit {
        id: KitId::generate(),
        club_id,
        team_id: Some(team_id),
        name: "Training top".to_string(),
        kit_type: 9,
        shirt_color: "#00FF00".to_string(),
        shorts_color: "#000000".to_string(),
        socks_color: "#000000".to_string(),
        season: None,
    };
    db.insert_kit(&kit).unwrap();

    assert_eq!(db.get_kit(kit.id).unwrap().unwrap(), kit);
    assert_eq!(db.list_kits(club_id, None).unwrap().len(), 1);
}

#[test]
fn test_default_path_is_under_data_dir() {
    if let Ok(path) = ClubDatabase::default_path() {
        assert!(path.ends_with("club-manager/club.db"));
    }
}
