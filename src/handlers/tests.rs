//! Handler behaviour tests, run through `dispatch` against an in-memory database

use super::age_groups::*;
use super::clubs::*;
use super::development_plans::*;
use super::drills::*;
use super::evaluations::*;
use super::fixtures::*;
use super::kits::*;
use super::matches::*;
use super::players::*;
use super::reports::*;
use super::squads::*;
use super::teams::*;
use super::users::*;
use crate::domain::*;
use crate::error::ClubError;
use crate::mediator::{dispatch, Caller};
use crate::storage::ClubDatabase;
use chrono::NaiveDate;

fn db() -> ClubDatabase {
    ClubDatabase::new_in_memory().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod authorization {
    use super::*;

    #[test]
    fn test_member_cannot_create_club() {
        let mut db = db();
        let result = dispatch(
            &mut db,
            &Caller::anonymous(),
            CreateClub {
                input: club_input("Riverside FC"),
            },
        );
        assert!(matches!(result, Err(ClubError::Forbidden { .. })));
        assert!(run(&mut db, ListClubs).unwrap().is_empty());
    }

    #[test]
    fn test_coach_can_create_player_but_not_team() {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "U12");

        let player = dispatch(
            &mut db,
            &coach(),
            CreatePlayer {
                club_id: club.id,
                input: player_input("Jamie"),
            },
        );
        assert!(player.is_ok());

        let team = dispatch(
            &mut db,
            &coach(),
            CreateTeam {
                age_group_id: age_group.id,
                input: team_input("Blues"),
            },
        );
        assert!(matches!(team, Err(ClubError::Forbidden { .. })));
    }

    #[test]
    fn test_reads_are_open_to_members() {
        let mut db = db();
        let club = seed_club(&mut db);
        let fetched = dispatch(&mut db, &Caller::anonymous(), GetClubById { club_id: club.id });
        assert_eq!(fetched.unwrap().name, "Riverside FC");
    }
}

mod updates {
    use super::*;

    #[test]
    fn test_update_unknown_club_is_not_found() {
        let mut db = db();
        let result = run(
            &mut db,
            UpdateClub {
                club_id: ClubId::generate(),
                input: club_input("Ghost FC"),
            },
        );
        match result {
            Err(ClubError::NotFound { entity, .. }) => assert_eq!(entity, "Club"),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(run(&mut db, ListClubs).unwrap().is_empty());
    }

    #[test]
    fn test_update_unknown_player_writes_nothing() {
        let mut db = db();
        let club = seed_club(&mut db);
        let result = run(
            &mut db,
            UpdatePlayer {
                player_id: PlayerId::generate(),
                input: player_input("Nobody"),
            },
        );
        assert!(matches!(result, Err(ClubError::NotFound { .. })));
        assert!(run(&mut db, GetPlayersByClubId { club_id: club.id })
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_update_unknown_match_and_kit() {
        let mut db = db();
        let result = run(
            &mut db,
            UpdateMatch {
                match_id: MatchId::generate(),
                input: match_input(MatchStatus::Scheduled, None, None),
            },
        );
        assert!(matches!(result, Err(ClubError::NotFound { entity: "Match", .. })));

        let result = run(&mut db, DeleteKit { kit_id: KitId::generate() });
        assert!(matches!(result, Err(ClubError::NotFound { entity: "Kit", .. })));
    }

    #[test]
    fn test_update_club_replaces_fields() {
        let mut db = db();
        let club = seed_club(&mut db);
        let mut input = club_input("Riverside Athletic");
        input.short_name = Some("RA".to_string());

        let updated = run(
            &mut db,
            UpdateClub {
                club_id: club.id,
                input,
            },
        )
        .unwrap();
        assert_eq!(updated.name, "Riverside Athletic");
        assert_eq!(updated.created_at, club.created_at);

        let fetched = run(&mut db, GetClubById { club_id: club.id }).unwrap();
        assert_eq!(fetched, updated);
    }

    #[test]
    fn test_update_player_replaces_contacts() {
        let mut db = db();
        let club = seed_club(&mut db);
        let player = seed_player(&mut db, club.id, "Jamie");

        let mut input = player_input("Jamie");
        input.emergency_contacts = vec![contact("Chris Walker", false), contact("Pat Walker", true)];
        run(
            &mut db,
            UpdatePlayer {
                player_id: player.id,
                input,
            },
        )
        .unwrap();

        let fetched = run(&mut db, GetPlayerById { player_id: player.id }).unwrap();
        let names: Vec<&str> = fetched
            .emergency_contacts
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Pat Walker"));
        assert!(!names.contains(&"Sam Walker"));
    }
}

mod validation {
    use super::*;

    #[test]
    fn test_more_than_one_primary_contact_is_rejected() {
        let mut db = db();
        let club = seed_club(&mut db);
        let mut input = player_input("Jamie");
        input.emergency_contacts = vec![contact("Sam", true), contact("Chris", true)];

        let result = run(
            &mut db,
            CreatePlayer {
                club_id: club.id,
                input,
            },
        );
        match result {
            Err(ClubError::Validation(errors)) => {
                assert_eq!(
                    errors.messages("emergencyContacts"),
                    ["Only one emergency contact can be marked as primary"]
                );
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_all_club_violations_are_reported() {
        let mut db = db();
        let mut input = club_input("");
        input.primary_color = "red".to_string();
        input.secondary_color = "#12345".to_string();

        let Err(ClubError::Validation(errors)) = run(&mut db, CreateClub { input }) else {
            panic!("expected validation failure");
        };
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["name", "primaryColor", "secondaryColor"]);
    }

    #[test]
    fn test_completed_match_requires_score() {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "U12");
        let team = seed_team(&mut db, age_group.id, "Blues");

        let Err(ClubError::Validation(errors)) = run(
            &mut db,
            CreateMatch {
                team_id: team.id,
                input: match_input(MatchStatus::Completed, Some(2), None),
            },
        ) else {
            panic!("expected validation failure");
        };
        assert!(errors.messages("goalsFor").is_empty());
        assert_eq!(errors.messages("goalsAgainst").len(), 1);
    }

    #[test]
    fn test_kit_team_must_belong_to_club() {
        let mut db = db();
        let club = seed_club(&mut db);
        let other = run(&mut db, CreateClub { input: club_input("Hillside") }).unwrap();
        let other_age_group = seed_age_group(&mut db, other.id, "U14");
        let other_team = seed_team(&mut db, other_age_group.id, "Reds");

        let input = KitInput {
            name: "Home kit".to_string(),
            kit_type: KitType::Home,
            team_id: Some(other_team.id),
            shirt_color: "#FF0000".to_string(),
            shorts_color: "#FFFFFF".to_string(),
            socks_color: "#FF0000".to_string(),
            season: None,
        };
        let Err(ClubError::Validation(errors)) = run(
            &mut db,
            CreateKit {
                club_id: club.id,
                input,
            },
        ) else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.messages("teamId").len(), 1);
    }
}

mod squads {
    use super::*;

    struct Squad {
        db: ClubDatabase,
        team: TeamDto,
        first: PlayerDto,
        second: PlayerDto,
    }

    fn squad() -> Squad {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "U12");
        let team = seed_team(&mut db, age_group.id, "Blues");
        let first = seed_player(&mut db, club.id, "Jamie");
        let second = seed_player(&mut db, club.id, "Riley");
        Squad {
            db,
            team,
            first,
            second,
        }
    }

    fn add(squad: &mut Squad, player_id: PlayerId, number: Option<u32>) -> crate::error::Result<PlayerTeamDto> {
        run(
            &mut squad.db,
            AddPlayerToTeam {
                team_id: squad.team.id,
                input: AddPlayerToTeamInput {
                    player_id,
                    squad_number: number,
                },
            },
        )
    }

    #[test]
    fn test_add_player_with_free_number() {
        let mut squad = squad();
        let player_id = squad.first.id;
        let added = add(&mut squad, player_id, Some(7)).unwrap();
        assert_eq!(
            added,
            PlayerTeamDto {
                player_id,
                team_id: squad.team.id,
                squad_number: Some(7),
            }
        );

        let players = run(&mut squad.db, GetPlayersByTeamId { team_id: squad.team.id }).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].player_id, player_id);
        assert_eq!(players[0].squad_number, Some(7));
    }

    #[test]
    fn test_taken_number_is_rejected_without_changes() {
        let mut squad = squad();
        let (first, second) = (squad.first.id, squad.second.id);
        add(&mut squad, first, Some(7)).unwrap();
        add(&mut squad, second, Some(8)).unwrap();

        let result = run(
            &mut squad.db,
            UpdateSquadNumber {
                team_id: squad.team.id,
                player_id: second,
                squad_number: Some(7),
            },
        );
        match result {
            Err(ClubError::Failure { message }) => assert_eq!(
                message,
                "Squad number 7 is already assigned to another player in this team"
            ),
            other => panic!("expected Failure, got {:?}", other),
        }

        let membership = squad.db.get_membership(squad.team.id, second).unwrap().unwrap();
        assert_eq!(membership.squad_number, Some(8));

        let duplicate = add(&mut squad, first, Some(9));
        assert!(matches!(duplicate, Err(ClubError::Failure { .. })));
    }

    #[test]
    fn test_reassigning_same_number_is_a_no_op() {
        let mut squad = squad();
        let first = squad.first.id;
        add(&mut squad, first, Some(10)).unwrap();

        let result = run(
            &mut squad.db,
            UpdateSquadNumber {
                team_id: squad.team.id,
                player_id: first,
                squad_number: Some(10),
            },
        )
        .unwrap();
        assert_eq!(result.squad_number, Some(10));
    }

    #[test]
    fn test_squad_number_out_of_range() {
        let mut squad = squad();
        let first = squad.first.id;
        let result = add(&mut squad, first, Some(100));
        assert!(matches!(result, Err(ClubError::Validation(_))));
    }

    #[test]
    fn test_unknown_membership_is_not_found() {
        let mut squad = squad();
        let result = run(
            &mut squad.db,
            UpdateSquadNumber {
                team_id: squad.team.id,
                player_id: squad.first.id,
                squad_number: Some(3),
            },
        );
        assert!(matches!(result, Err(ClubError::NotFound { entity: "PlayerTeam", .. })));

        let removed = run(
            &mut squad.db,
            RemovePlayerFromTeam {
                team_id: squad.team.id,
                player_id: squad.first.id,
            },
        );
        assert!(matches!(removed, Err(ClubError::NotFound { .. })));
    }

    #[test]
    fn test_coach_assignment_upserts_role() {
        let mut squad = squad();
        let club_id = squad.team.club_id;
        let coach = seed_coach(&mut squad.db, club_id);

        for role in [CoachRole::Assistant, CoachRole::Head] {
            run(
                &mut squad.db,
                AssignCoachToTeam {
                    team_id: squad.team.id,
                    input: AssignCoachInput {
                        coach_id: coach.id,
                        role,
                    },
                },
            )
            .unwrap();
        }

        let coaches = run(&mut squad.db, GetCoachesByTeamId { team_id: squad.team.id }).unwrap();
        assert_eq!(coaches.len(), 1);
        assert_eq!(coaches[0].role, CoachRole::Head);
    }
}

mod statistics {
    use super::*;

    #[test]
    fn test_team_statistics_from_completed_matches() {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "U12");
        let team = seed_team(&mut db, age_group.id, "Blues");

        seed_result(&mut db, team.id, 3, 1);
        seed_result(&mut db, team.id, 2, 2);
        seed_result(&mut db, team.id, 0, 1);
        run(
            &mut db,
            CreateMatch {
                team_id: team.id,
                input: match_input(MatchStatus::Scheduled, None, None),
            },
        )
        .unwrap();

        let stats = run(&mut db, GetTeamStatistics { team_id: team.id }).unwrap();
        assert_eq!(stats.matches_played, 3);
        assert_eq!((stats.wins, stats.draws, stats.losses), (1, 1, 1));
        assert_eq!(stats.win_rate, 33.3);
        assert_eq!(stats.goals_for, 5);
        assert_eq!(stats.goals_against, 4);
        assert_eq!(stats.goal_difference, 1);
        assert_eq!(stats.upcoming_matches, 1);
        assert_eq!(stats.recent_form.len(), 3);
    }

    #[test]
    fn test_win_rate_is_zero_without_matches() {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "U12");
        let team = seed_team(&mut db, age_group.id, "Blues");

        let stats = run(&mut db, GetTeamStatistics { team_id: team.id }).unwrap();
        assert_eq!(stats.matches_played, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert!(stats.recent_form.is_empty());
    }

    #[test]
    fn test_club_statistics_merge_teams() {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "U12");
        let blues = seed_team(&mut db, age_group.id, "Blues");
        let whites = seed_team(&mut db, age_group.id, "Whites");
        seed_player(&mut db, club.id, "Jamie");
        seed_coach(&mut db, club.id);

        seed_result(&mut db, blues.id, 2, 0);
        seed_result(&mut db, whites.id, 1, 1);

        let stats = run(&mut db, GetClubStatistics { club_id: club.id }).unwrap();
        assert_eq!(stats.age_group_count, 1);
        assert_eq!(stats.team_count, 2);
        assert_eq!(stats.player_count, 1);
        assert_eq!(stats.coach_count, 1);
        assert_eq!(stats.matches_played, 2);
        assert_eq!(stats.win_rate, 50.0);
        assert_eq!(stats.teams.len(), 2);
    }

    #[test]
    fn test_match_result_is_derived() {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "U12");
        let team = seed_team(&mut db, age_group.id, "Blues");

        let played = seed_result(&mut db, team.id, 1, 4);
        assert_eq!(played.result, Some(MatchOutcome::Loss));

        let pending = run(
            &mut db,
            CreateMatch {
                team_id: team.id,
                input: match_input(MatchStatus::Postponed, None, None),
            },
        )
        .unwrap();
        assert_eq!(pending.result, None);
    }
}

mod archiving {
    use super::*;

    #[test]
    fn test_archived_team_is_hidden_from_listing() {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "U12");
        let blues = seed_team(&mut db, age_group.id, "Blues");
        let whites = seed_team(&mut db, age_group.id, "Whites");

        run(&mut db, ArchiveTeam { team_id: blues.id }).unwrap();

        let listed = run(&mut db, GetTeamsByAgeGroupId { age_group_id: age_group.id }).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, whites.id);

        let archived = run(&mut db, GetTeamById { team_id: blues.id }).unwrap();
        assert!(archived.is_archived);
    }

    #[test]
    fn test_cannot_add_team_to_archived_age_group() {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "U12");
        run(&mut db, ArchiveAgeGroup { age_group_id: age_group.id }).unwrap();

        let result = run(
            &mut db,
            CreateTeam {
                age_group_id: age_group.id,
                input: team_input("Blues"),
            },
        );
        assert!(matches!(result, Err(ClubError::Failure { .. })));
    }

    #[test]
    fn test_archived_player_hidden_from_club_listing() {
        let mut db = db();
        let club = seed_club(&mut db);
        let player = seed_player(&mut db, club.id, "Jamie");
        seed_player(&mut db, club.id, "Riley");

        run(&mut db, ArchivePlayer { player_id: player.id }).unwrap();

        let listed = run(&mut db, GetPlayersByClubId { club_id: club.id }).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].first_name, "Riley");
    }
}

mod age_groups {
    use super::*;

    #[test]
    fn test_code_is_uppercased_and_seasons_round_trip() {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "u12");
        assert_eq!(age_group.code, "U12");
        assert_eq!(age_group.seasons, vec!["2025/26".to_string()]);
    }

    #[test]
    fn test_malformed_seasons_column_reads_as_empty() {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "U12");
        db.conn
            .execute(
                "UPDATE age_groups SET seasons = '[bad' WHERE id = ?",
                rusqlite::params![age_group.id],
            )
            .unwrap();

        let listed = run(&mut db, GetAgeGroupsByClubId { club_id: club.id }).unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].seasons.is_empty());
    }
}

mod training {
    use super::*;

    struct Setup {
        db: ClubDatabase,
        club_id: ClubId,
        age_group_id: AgeGroupId,
        team: TeamDto,
        other_team: TeamDto,
    }

    fn setup() -> Setup {
        let mut db = db();
        let club = seed_club(&mut db);
        let age_group = seed_age_group(&mut db, club.id, "U12");
        let team = seed_team(&mut db, age_group.id, "Blues");
        let other_team = seed_team(&mut db, age_group.id, "Whites");
        Setup {
            db,
            club_id: club.id,
            age_group_id: age_group.id,
            team,
            other_team,
        }
    }

    fn create(setup: &mut Setup, scope: Scope, name: &str) -> DrillDto {
        dispatch(
            &mut setup.db,
            &coach(),
            CreateDrill {
                scope,
                input: drill_input(name, 15),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_team_listing_inherits_broader_scopes() {
        let mut setup = setup();
        let club_scope = Scope::club(setup.club_id);
        let age_group_scope = Scope {
            age_group_id: Some(setup.age_group_id),
            ..club_scope
        };
        let team_scope = Scope {
            team_id: Some(setup.team.id),
            ..club_scope
        };
        let other_scope = Scope {
            team_id: Some(setup.other_team.id),
            ..club_scope
        };

        create(&mut setup, club_scope, "Rondo");
        create(&mut setup, age_group_scope, "Overlap");
        let own = create(&mut setup, team_scope, "Pressing");
        create(&mut setup, other_scope, "Finishing");

        // Team scopes pick up the team's age group
        assert_eq!(own.scope.age_group_id, Some(setup.age_group_id));
        assert_eq!(own.scope.level, ScopeLevel::Team);

        let listed = run(&mut setup.db, GetDrillsByScope { scope: team_scope }).unwrap();
        let names: Vec<&str> = listed.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Overlap", "Pressing", "Rondo"]);

        let inherited: Vec<bool> = listed.iter().map(|d| d.is_inherited).collect();
        assert_eq!(inherited, vec![true, false, true]);

        let club_listing = run(&mut setup.db, GetDrillsByScope { scope: club_scope }).unwrap();
        assert_eq!(club_listing.len(), 1);
        assert_eq!(club_listing[0].name, "Rondo");
    }

    #[test]
    fn test_drill_lists_are_decoded() {
        let mut setup = setup();
        let scope = Scope::club(setup.club_id);
        let drill = create(&mut setup, scope, "Rondo");
        assert_eq!(drill.equipment, vec!["cones", "bibs"]);
        assert_eq!(drill.tags, vec!["passing"]);
    }

    #[test]
    fn test_team_from_another_club_is_rejected() {
        let mut setup = setup();
        let other = run(&mut setup.db, CreateClub { input: club_input("Hillside") }).unwrap();
        let scope = Scope {
            club_id: other.id,
            age_group_id: None,
            team_id: Some(setup.team.id),
        };
        let result = dispatch(
            &mut setup.db,
            &coach(),
            CreateDrill {
                scope,
                input: drill_input("Rondo", 10),
            },
        );
        assert!(matches!(result, Err(ClubError::Validation(_))));
    }

    #[test]
    fn test_template_totals_and_drill_checks() {
        let mut setup = setup();
        let club_scope = Scope::club(setup.club_id);
        let team_scope = Scope {
            team_id: Some(setup.team.id),
            ..club_scope
        };
        let other_scope = Scope {
            team_id: Some(setup.other_team.id),
            ..club_scope
        };
        let warm_up = create(&mut setup, club_scope, "Warm up");
        let pressing = create(&mut setup, team_scope, "Pressing");
        let foreign = create(&mut setup, other_scope, "Finishing");

        let template = run(
            &mut setup.db,
            CreateDrillTemplate {
                scope: team_scope,
                input: DrillTemplateInput {
                    name: "Tuesday session".to_string(),
                    description: None,
                    drill_ids: vec![warm_up.id, pressing.id, warm_up.id],
                },
            },
        )
        .unwrap();
        assert_eq!(template.drill_count, 3);
        assert_eq!(template.total_duration_minutes, 45);
        assert_eq!(template.drill_ids, vec![warm_up.id, pressing.id, warm_up.id]);

        let Err(ClubError::Validation(errors)) = run(
            &mut setup.db,
            UpdateDrillTemplate {
                template_id: template.id,
                input: DrillTemplateInput {
                    name: "Tuesday session".to_string(),
                    description: None,
                    drill_ids: vec![foreign.id],
                },
            },
        ) else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.messages("drillIds").len(), 1);

        run(&mut setup.db, ArchiveDrill { drill_id: pressing.id }).unwrap();
        let result = run(
            &mut setup.db,
            CreateDrillTemplate {
                scope: team_scope,
                input: DrillTemplateInput {
                    name: "Thursday session".to_string(),
                    description: None,
                    drill_ids: vec![pressing.id],
                },
            },
        );
        assert!(matches!(result, Err(ClubError::Validation(_))));
    }

    #[test]
    fn test_template_with_malformed_drill_list() {
        let mut setup = setup();
        let club_scope = Scope::club(setup.club_id);
        let warm_up = create(&mut setup, club_scope, "Warm up");
        let template = run(
            &mut setup.db,
            CreateDrillTemplate {
                scope: club_scope,
                input: DrillTemplateInput {
                    name: "Session".to_string(),
                    description: None,
                    drill_ids: vec![warm_up.id],
                },
            },
        )
        .unwrap();

        setup
            .db
            .conn
            .execute(
                "UPDATE drill_templates SET drill_ids = 'not json' WHERE id = ?",
                rusqlite::params![template.id],
            )
            .unwrap();

        let fetched = run(&mut setup.db, GetDrillTemplateById { template_id: template.id }).unwrap();
        assert!(fetched.drill_ids.is_empty());
        assert_eq!(fetched.total_duration_minutes, 0);
    }
}

mod development {
    use super::*;

    fn seeded() -> (ClubDatabase, PlayerDto) {
        let mut db = db();
        let club = seed_club(&mut db);
        let player = seed_player(&mut db, club.id, "Jamie");
        (db, player)
    }

    fn goal(title: &str, progress: u32, completed: bool) -> GoalInput {
        GoalInput {
            title: title.to_string(),
            description: None,
            target_date: None,
            progress,
            completed,
        }
    }

    #[test]
    fn test_plan_progress_and_goal_replacement() {
        let (mut db, player) = seeded();
        let input = DevelopmentPlanInput {
            title: "Autumn block".to_string(),
            period_start: date(2025, 9, 1),
            period_end: Some(date(2025, 12, 20)),
            coach_notes: None,
            goals: vec![goal("Weak foot", 40, false), goal("Scanning", 10, true)],
        };
        let plan = run(
            &mut db,
            CreateDevelopmentPlan {
                player_id: player.id,
                input: input.clone(),
            },
        )
        .unwrap();
        assert_eq!(plan.completed_goals, 1);
        assert_eq!(plan.overall_progress, 70);

        let mut revised = input;
        revised.goals = vec![goal("Heading", 25, false)];
        run(
            &mut db,
            UpdateDevelopmentPlan {
                plan_id: plan.id,
                input: revised,
            },
        )
        .unwrap();

        let fetched = run(&mut db, GetDevelopmentPlanById { plan_id: plan.id }).unwrap();
        assert_eq!(fetched.goals.len(), 1);
        assert_eq!(fetched.goals[0].title, "Heading");
        assert_eq!(fetched.overall_progress, 25);
    }

    #[test]
    fn test_plan_period_must_be_ordered() {
        let (mut db, player) = seeded();
        let result = run(
            &mut db,
            CreateDevelopmentPlan {
                player_id: player.id,
                input: DevelopmentPlanInput {
                    title: "Backwards".to_string(),
                    period_start: date(2025, 9, 1),
                    period_end: Some(date(2025, 8, 1)),
                    coach_notes: None,
                    goals: Vec::new(),
                },
            },
        );
        assert!(matches!(result, Err(ClubError::Validation(_))));
    }

    #[test]
    fn test_report_lists_round_trip() {
        let (mut db, player) = seeded();
        let input = ReportInput {
            coach_id: None,
            period_start: date(2025, 9, 1),
            period_end: date(2025, 12, 1),
            overall_rating: 7.25,
            strengths: vec!["Passing".to_string(), " Vision ".to_string()],
            areas_for_improvement: vec!["Heading".to_string()],
            coach_comments: Some("Great term".to_string()),
            development_actions: vec![DevelopmentActionDto {
                goal: "Weak foot".to_string(),
                actions: vec!["Wall passes".to_string(), "Finishing".to_string()],
                target_date: None,
                completed: false,
            }],
            similar_professionals: vec![SimilarProfessionalDto {
                name: "A. Player".to_string(),
                team: "City".to_string(),
                position: "CM".to_string(),
                reason: "Tempo".to_string(),
            }],
        };
        let created = run(
            &mut db,
            CreateReport {
                player_id: player.id,
                input,
            },
        )
        .unwrap();

        let fetched = run(&mut db, GetReportById { report_id: created.id }).unwrap();
        assert_eq!(fetched.strengths, vec!["Passing", "Vision"]);
        assert_eq!(fetched.overall_rating, 7.3);
        assert_eq!(fetched.development_actions[0].actions.len(), 2);
        assert_eq!(fetched.similar_professionals[0].position, "CM");
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_report_rating_out_of_range() {
        let (mut db, player) = seeded();
        let result = run(
            &mut db,
            CreateReport {
                player_id: player.id,
                input: ReportInput {
                    coach_id: None,
                    period_start: date(2025, 9, 1),
                    period_end: date(2025, 12, 1),
                    overall_rating: 11.0,
                    strengths: Vec::new(),
                    areas_for_improvement: Vec::new(),
                    coach_comments: None,
                    development_actions: Vec::new(),
                    similar_professionals: Vec::new(),
                },
            },
        );
        assert!(matches!(result, Err(ClubError::Validation(_))));
    }

    #[test]
    fn test_evaluation_overall_and_delete() {
        let (mut db, player) = seeded();
        let rating = |name: &str, rating| AttributeRatingDto {
            name: name.to_string(),
            rating,
            notes: None,
        };
        let evaluation = run(
            &mut db,
            CreateEvaluation {
                player_id: player.id,
                input: EvaluationInput {
                    coach_id: None,
                    evaluated_at: None,
                    notes: None,
                    attributes: vec![rating("Passing", 8), rating("Pace", 6), rating("Vision", 7)],
                },
            },
        )
        .unwrap();
        assert_eq!(evaluation.overall_rating, Some(7));

        run(&mut db, DeleteEvaluation { evaluation_id: evaluation.id }).unwrap();
        assert!(run(&mut db, GetEvaluationsByPlayerId { player_id: player.id })
            .unwrap()
            .is_empty());
        assert!(db.list_evaluation_attributes(evaluation.id).unwrap().is_empty());

        let again = run(&mut db, DeleteEvaluation { evaluation_id: evaluation.id });
        assert!(matches!(again, Err(ClubError::NotFound { .. })));
    }

    #[test]
    fn test_duplicate_attribute_names_are_rejected() {
        let (mut db, player) = seeded();
        let attribute = AttributeRatingDto {
            name: "Pace".to_string(),
            rating: 5,
            notes: None,
        };
        let result = run(
            &mut db,
            CreateEvaluation {
                player_id: player.id,
                input: EvaluationInput {
                    coach_id: None,
                    evaluated_at: None,
                    notes: None,
                    attributes: vec![attribute.clone(), attribute],
                },
            },
        );
        assert!(matches!(result, Err(ClubError::Validation(_))));
    }
}

mod users {
    use super::*;

    #[test]
    fn test_duplicate_email_is_a_failure() {
        let mut db = db();
        let created = run(
            &mut db,
            CreateUser {
                email: "Coach@Example.com".to_string(),
                display_name: "Coach Carter".to_string(),
                role: Role::Coach,
            },
        )
        .unwrap();
        assert_eq!(created.email, "coach@example.com");
        assert_eq!(created.role, Role::Coach);

        let duplicate = run(
            &mut db,
            CreateUser {
                email: "coach@example.com".to_string(),
                display_name: "Someone Else".to_string(),
                role: Role::Member,
            },
        );
        assert!(matches!(duplicate, Err(ClubError::Failure { .. })));

        let fetched = run(&mut db, GetUserById { user_id: created.id }).unwrap();
        assert_eq!(fetched, created);
    }
}
