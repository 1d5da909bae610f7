//! Unit tests for domain value types

use super::*;

#[test]
fn test_kit_type_codes_map_to_labels() {
    let labels: Vec<&str> = (0..=4).map(|c| KitType::from_code(c).label()).collect();
    assert_eq!(labels, vec!["home", "away", "third", "goalkeeper", "training"]);
}

#[test]
fn test_unknown_kit_type_code_falls_back_to_home() {
    for code in [-1, 5, 42, i64::MAX] {
        assert_eq!(KitType::from_code(code), KitType::Home);
    }
}

#[test]
fn test_kit_type_code_round_trip() {
    for kit in [
        KitType::Home,
        KitType::Away,
        KitType::Third,
        KitType::Goalkeeper,
        KitType::Training,
    ] {
        assert_eq!(KitType::from_code(kit.code()), kit);
    }
}

#[test]
fn test_coach_role_fallback_is_head() {
    assert_eq!(CoachRole::from_code(1), CoachRole::Assistant);
    assert_eq!(CoachRole::from_code(99), CoachRole::Head);
}

#[test]
fn test_match_status_fallback_is_scheduled() {
    assert_eq!(MatchStatus::from_code(1), MatchStatus::Completed);
    assert_eq!(MatchStatus::from_code(-3), MatchStatus::Scheduled);
}

#[test]
fn test_from_label_is_case_insensitive() {
    assert_eq!(Role::from_label("Admin"), Some(Role::Admin));
    assert_eq!(Role::from_label(" coach "), Some(Role::Coach));
    assert_eq!(Role::from_label("owner"), None);
}

#[test]
fn test_role_ordering_follows_privilege() {
    assert!(Role::Member < Role::Coach);
    assert!(Role::Coach < Role::Admin);
}

#[test]
fn test_kit_type_serializes_lowercase() {
    let json = serde_json::to_string(&KitType::Goalkeeper).unwrap();
    assert_eq!(json, "\"goalkeeper\"");

    let parsed: KitType = serde_json::from_str("\"away\"").unwrap();
    assert_eq!(parsed, KitType::Away);
}

#[test]
fn test_match_outcome_from_score() {
    assert_eq!(MatchOutcome::from_score(3, 1), MatchOutcome::Win);
    assert_eq!(MatchOutcome::from_score(2, 2), MatchOutcome::Draw);
    assert_eq!(MatchOutcome::from_score(0, 1), MatchOutcome::Loss);
    assert_eq!(serde_json::to_string(&MatchOutcome::Draw).unwrap(), "\"D\"");
}

#[test]
fn test_scope_level() {
    let club_id = ClubId::generate();
    let mut scope = Scope::club(club_id);
    assert_eq!(scope.level(), ScopeLevel::Club);

    scope.age_group_id = Some(AgeGroupId::generate());
    assert_eq!(scope.level(), ScopeLevel::AgeGroup);

    scope.team_id = Some(TeamId::generate());
    assert_eq!(scope.level(), ScopeLevel::Team);
    assert_eq!(ScopeLevel::AgeGroup.to_string(), "agegroup");
}

#[test]
fn test_id_parsing() {
    let id = TeamId::generate();
    let parsed: TeamId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);

    let err = "not-a-uuid".parse::<TeamId>().unwrap_err();
    assert!(err.to_string().contains("not-a-uuid"));
}

#[test]
fn test_id_serializes_as_plain_string() {
    let id = PlayerId::generate();
    let json = serde_json::to_value(id).unwrap();
    assert_eq!(json, serde_json::Value::String(id.to_string()));
}

#[test]
fn test_scope_includes_broader_levels_only() {
    let club_id = ClubId::generate();
    let age_group_id = AgeGroupId::generate();
    let team_id = TeamId::generate();
    let team_scope = Scope {
        club_id,
        age_group_id: Some(age_group_id),
        team_id: Some(team_id),
    };
    let age_group_scope = Scope {
        club_id,
        age_group_id: Some(age_group_id),
        team_id: None,
    };
    let other_team = Scope {
        team_id: Some(TeamId::generate()),
        ..team_scope
    };

    assert!(team_scope.includes(&Scope::club(club_id)));
    assert!(team_scope.includes(&age_group_scope));
    assert!(team_scope.includes(&team_scope));
    assert!(!team_scope.includes(&other_team));

    assert!(!Scope::club(club_id).includes(&age_group_scope));
    assert!(!Scope::club(ClubId::generate()).includes(&Scope::club(club_id)));
}
