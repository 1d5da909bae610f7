//! Client and hooks against a live server on an ephemeral port

use club_manager::api::{self, AppState};
use club_manager::client::hooks::{add_player_mutation, team_players_query, team_statistics_query};
use club_manager::client::{ApiClient, QueryState};
use club_manager::config::ServerConfig;
use club_manager::handlers::age_groups::{AgeGroupDto, AgeGroupInput};
use club_manager::handlers::clubs::{ClubDto, ClubInput};
use club_manager::handlers::drills::{DrillDto, DrillInput, Scoped};
use club_manager::handlers::kits::{KitDto, KitInput};
use club_manager::handlers::players::{PlayerDto, PlayerInput};
use club_manager::handlers::squads::AddPlayerToTeamInput;
use club_manager::handlers::teams::{TeamDto, TeamInput};
use club_manager::domain::KitType;
use club_manager::{Caller, ClubDatabase, Mediator, Role, Scope, TeamId};
use chrono::NaiveDate;
use tokio::net::TcpListener;

async fn spawn_server() -> String {
    let db = ClubDatabase::new_in_memory().unwrap();
    let app = api::router(AppState::new(Mediator::new(db)), &ServerConfig::default());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn seed_team(admin: &ApiClient) -> (ClubDto, TeamDto) {
    let club: ClubDto = admin
        .post(
            "clubs",
            &ClubInput {
                name: "Riverside FC".to_string(),
                short_name: None,
                founded_year: None,
                primary_color: "#1A2B3C".to_string(),
                secondary_color: "#FFFFFF".to_string(),
            },
        )
        .await
        .unwrap();

    let age_group: AgeGroupDto = admin
        .post(
            &format!("clubs/{}/age-groups", club.id),
            &AgeGroupInput {
                name: "Under 12s".to_string(),
                code: "U12".to_string(),
                seasons: vec!["2025/26".to_string()],
                default_squad_size: 14,
            },
        )
        .await
        .unwrap();

    let team: TeamDto = admin
        .post(
            &format!("age-groups/{}/teams", age_group.id),
            &TeamInput {
                name: "U12 Reds".to_string(),
                level: "A".to_string(),
                season: "2025/26".to_string(),
                primary_color: "#CC0000".to_string(),
                secondary_color: None,
            },
        )
        .await
        .unwrap();

    (club, team)
}

async fn seed_player(coach: &ApiClient, club: &ClubDto, first_name: &str) -> PlayerDto {
    coach
        .post(
            &format!("clubs/{}/players", club.id),
            &PlayerInput {
                first_name: first_name.to_string(),
                last_name: "Walker".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(2013, 4, 18).unwrap(),
                preferred_positions: vec![],
                medical_notes: None,
                emergency_contacts: vec![],
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_client_round_trip_and_errors() {
    let base_url = spawn_server().await;
    let admin = ApiClient::new(&base_url)
        .unwrap()
        .with_caller(Caller::with_role(Role::Admin));
    let anonymous = ApiClient::new(&base_url).unwrap();

    let (club, _) = seed_team(&admin).await;
    assert_eq!(anonymous.club(club.id).await.unwrap(), club);
    assert_eq!(anonymous.clubs().await.unwrap().len(), 1);

    let err = anonymous.archive(&format!("clubs/{}/archive", club.id)).await.unwrap_err();
    assert_eq!(err.status_code, Some(403));

    let err = admin
        .post::<_, ClubDto>(
            "clubs",
            &serde_json::json!({ "name": "", "primaryColor": "#000", "secondaryColor": "#FFF" }),
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code, Some(400));
    assert!(err.validation_errors.unwrap().contains_key("name"));

    let missing = TeamId::generate();
    let err = anonymous.team_statistics(missing).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.message.contains(&missing.to_string()));
}

#[tokio::test]
async fn test_client_update_query_and_delete() {
    let base_url = spawn_server().await;
    let admin = ApiClient::new(&base_url)
        .unwrap()
        .with_caller(Caller::with_role(Role::Admin));
    let coach = ApiClient::new(&base_url)
        .unwrap()
        .with_caller(Caller::with_role(Role::Coach));

    let (club, team) = seed_team(&admin).await;

    let renamed: ClubDto = admin
        .put(
            &format!("clubs/{}", club.id),
            &ClubInput {
                name: "Riverside Athletic".to_string(),
                short_name: Some("RAFC".to_string()),
                founded_year: Some(1921),
                primary_color: club.primary_color.clone(),
                secondary_color: club.secondary_color.clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.id, club.id);
    assert_eq!(admin.club(club.id).await.unwrap().name, "Riverside Athletic");

    let _: DrillDto = coach
        .post(
            "drills",
            &Scoped {
                scope: Scope::club(club.id),
                input: DrillInput {
                    name: "Rondo".to_string(),
                    description: "Keep-ball in a grid".to_string(),
                    duration_minutes: 15,
                    equipment: vec!["cones".to_string()],
                    tags: vec![],
                },
            },
        )
        .await
        .unwrap();
    let drills: Vec<DrillDto> = coach
        .get_with_query(
            "drills",
            &[
                ("clubId", club.id.to_string()),
                ("teamId", team.id.to_string()),
            ],
        )
        .await
        .unwrap();
    assert_eq!(drills.len(), 1);
    assert!(drills[0].is_inherited);

    let err = coach
        .get_with_query::<Vec<DrillDto>, _>("drills", &[("teamId", team.id.to_string())])
        .await
        .unwrap_err();
    assert_eq!(err.status_code, Some(400));
    assert!(err.message.contains("clubId"));

    let kit: KitDto = admin
        .post(
            &format!("clubs/{}/kits", club.id),
            &KitInput {
                name: "Away strip".to_string(),
                kit_type: KitType::Away,
                team_id: None,
                shirt_color: "#FFFFFF".to_string(),
                shorts_color: "#000000".to_string(),
                socks_color: "#FFFFFF".to_string(),
                season: None,
            },
        )
        .await
        .unwrap();
    let kits_path = format!("clubs/{}/kits", club.id);
    assert_eq!(admin.get::<Vec<KitDto>>(&kits_path).await.unwrap().len(), 1);

    let err = coach.delete(&format!("kits/{}", kit.id)).await.unwrap_err();
    assert_eq!(err.status_code, Some(403));
    admin.delete(&format!("kits/{}", kit.id)).await.unwrap();
    assert!(admin.get::<Vec<KitDto>>(&kits_path).await.unwrap().is_empty());

    let err = admin.delete(&format!("kits/{}", kit.id)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_hooks_track_squad_changes() {
    let base_url = spawn_server().await;
    let admin = ApiClient::new(&base_url)
        .unwrap()
        .with_caller(Caller::with_role(Role::Admin));
    let coach = ApiClient::new(&base_url)
        .unwrap()
        .with_caller(Caller::with_role(Role::Coach));

    let (club, team) = seed_team(&admin).await;
    let ava = seed_player(&coach, &club, "Ava").await;
    let ben = seed_player(&coach, &club, "Ben").await;

    let mut squad = team_players_query(coach.clone());
    squad.set_key(None).await;
    assert_eq!(squad.state(), QueryState::NoData);

    squad.set_key(Some(team.id)).await;
    assert_eq!(squad.data().unwrap().len(), 0);

    let add = add_player_mutation(coach.clone());
    let membership = add
        .execute((
            team.id,
            AddPlayerToTeamInput {
                player_id: ava.id,
                squad_number: Some(7),
            },
        ))
        .await
        .unwrap();
    assert_eq!(membership.squad_number, Some(7));

    // Same key does not refetch; an explicit refetch does
    squad.set_key(Some(team.id)).await;
    assert_eq!(squad.data().unwrap().len(), 0);
    squad.refetch().await;
    let players = squad.data().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].squad_number, Some(7));

    let err = add
        .execute((
            team.id,
            AddPlayerToTeamInput {
                player_id: ben.id,
                squad_number: Some(7),
            },
        ))
        .await
        .unwrap_err();
    assert_eq!(err.status_code, Some(409));
    assert_eq!(add.error().unwrap(), err);

    let mut stats = team_statistics_query(coach);
    stats.set_key(Some(TeamId::generate())).await;
    assert!(stats.error().unwrap().is_not_found());
    stats.set_key(Some(team.id)).await;
    assert_eq!(stats.data().unwrap().squad_size, 1);
}
