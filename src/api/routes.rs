//! Route table and thin HTTP adapters over the mediator.
//!
//! Each adapter extracts path, query and body, builds the matching request
//! type and sends it. Creates answer 201, archives and deletes answer 204.

use super::caller::{ApiJson, ApiPath, ApiQuery};
use super::AppState;
use crate::domain::{
    AgeGroupId, ClubId, CoachId, DevelopmentPlanId, DrillId, DrillTemplateId, EvaluationId, KitId,
    MatchId, PlayerId, ReportId, Scope, TeamId, UserId,
};
use crate::error::ClubError;
use crate::handlers::age_groups::*;
use crate::handlers::clubs::*;
use crate::handlers::coaches::*;
use crate::handlers::development_plans::*;
use crate::handlers::drills::*;
use crate::handlers::evaluations::*;
use crate::handlers::kits::*;
use crate::handlers::matches::*;
use crate::handlers::players::*;
use crate::handlers::reports::*;
use crate::handlers::squads::*;
use crate::handlers::teams::*;
use crate::handlers::users::*;
use crate::mediator::{Caller, Request};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

type ApiResult<T> = Result<Json<T>, ClubError>;
type Created<T> = Result<(StatusCode, Json<T>), ClubError>;
type NoContent = Result<StatusCode, ClubError>;

async fn send<R>(state: &AppState, caller: &Caller, request: R) -> ApiResult<R::Response>
where
    R: Request,
    R::Response: Serialize,
{
    state.mediator.send(caller, request).await.map(Json)
}

async fn create<R>(state: &AppState, caller: &Caller, request: R) -> Created<R::Response>
where
    R: Request,
    R::Response: Serialize,
{
    let body = state.mediator.send(caller, request).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

async fn no_content<R>(state: &AppState, caller: &Caller, request: R) -> NoContent
where
    R: Request<Response = ()>,
{
    state.mediator.send(caller, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/clubs", get(list_clubs).post(create_club))
        .route("/clubs/{club_id}", get(get_club).put(update_club))
        .route("/clubs/{club_id}/archive", post(archive_club))
        .route("/clubs/{club_id}/statistics", get(club_statistics))
        .route(
            "/clubs/{club_id}/age-groups",
            get(club_age_groups).post(create_age_group),
        )
        .route(
            "/clubs/{club_id}/players",
            get(club_players).post(create_player),
        )
        .route(
            "/clubs/{club_id}/coaches",
            get(club_coaches).post(create_coach),
        )
        .route("/clubs/{club_id}/kits", get(club_kits).post(create_kit))
        .route("/age-groups/{age_group_id}", put(update_age_group))
        .route("/age-groups/{age_group_id}/archive", post(archive_age_group))
        .route(
            "/age-groups/{age_group_id}/teams",
            get(age_group_teams).post(create_team),
        )
        .route("/teams/{team_id}", get(get_team).put(update_team))
        .route("/teams/{team_id}/archive", post(archive_team))
        .route("/teams/{team_id}/statistics", get(team_statistics))
        .route(
            "/teams/{team_id}/players",
            get(team_players).post(add_player_to_team),
        )
        .route(
            "/teams/{team_id}/players/{player_id}",
            put(update_squad_number).delete(remove_player_from_team),
        )
        .route(
            "/teams/{team_id}/coaches",
            get(team_coaches).post(assign_coach),
        )
        .route(
            "/teams/{team_id}/coaches/{coach_id}",
            axum::routing::delete(remove_coach),
        )
        .route(
            "/teams/{team_id}/matches",
            get(team_matches).post(create_match),
        )
        .route("/matches/{match_id}", get(get_match).put(update_match))
        .route("/players/{player_id}", get(get_player).put(update_player))
        .route("/players/{player_id}/archive", post(archive_player))
        .route(
            "/players/{player_id}/development-plans",
            get(player_plans).post(create_plan),
        )
        .route(
            "/players/{player_id}/reports",
            get(player_reports).post(create_report),
        )
        .route(
            "/players/{player_id}/evaluations",
            get(player_evaluations).post(create_evaluation),
        )
        .route("/coaches/{coach_id}", get(get_coach).put(update_coach))
        .route("/coaches/{coach_id}/archive", post(archive_coach))
        .route("/kits/{kit_id}", put(update_kit).delete(delete_kit))
        .route("/drills", get(scope_drills).post(create_drill))
        .route("/drills/{drill_id}", put(update_drill))
        .route("/drills/{drill_id}/archive", post(archive_drill))
        .route(
            "/drill-templates",
            get(scope_templates).post(create_template),
        )
        .route(
            "/drill-templates/{template_id}",
            get(get_template).put(update_template),
        )
        .route(
            "/drill-templates/{template_id}/archive",
            post(archive_template),
        )
        .route(
            "/development-plans/{plan_id}",
            get(get_plan).put(update_plan),
        )
        .route("/development-plans/{plan_id}/archive", post(archive_plan))
        .route("/reports/{report_id}", get(get_report).put(update_report))
        .route("/reports/{report_id}/archive", post(archive_report))
        .route(
            "/evaluations/{evaluation_id}",
            axum::routing::delete(delete_evaluation),
        )
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user))
}

// Clubs

async fn list_clubs(State(state): State<AppState>, caller: Caller) -> ApiResult<Vec<ClubDto>> {
    send(&state, &caller, ListClubs).await
}

async fn create_club(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(input): ApiJson<ClubInput>,
) -> Created<ClubDto> {
    create(&state, &caller, CreateClub { input }).await
}

async fn get_club(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    caller: Caller,
) -> ApiResult<ClubDto> {
    send(&state, &caller, GetClubById { club_id }).await
}

async fn update_club(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    caller: Caller,
    ApiJson(input): ApiJson<ClubInput>,
) -> ApiResult<ClubDto> {
    send(&state, &caller, UpdateClub { club_id, input }).await
}

async fn archive_club(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, ArchiveClub { club_id }).await
}

async fn club_statistics(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    caller: Caller,
) -> ApiResult<ClubStatisticsDto> {
    send(&state, &caller, GetClubStatistics { club_id }).await
}

// Age groups

async fn club_age_groups(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    caller: Caller,
) -> ApiResult<Vec<AgeGroupDto>> {
    send(&state, &caller, GetAgeGroupsByClubId { club_id }).await
}

async fn create_age_group(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    caller: Caller,
    ApiJson(input): ApiJson<AgeGroupInput>,
) -> Created<AgeGroupDto> {
    create(&state, &caller, CreateAgeGroup { club_id, input }).await
}

async fn update_age_group(
    State(state): State<AppState>,
    ApiPath(age_group_id): ApiPath<AgeGroupId>,
    caller: Caller,
    ApiJson(input): ApiJson<AgeGroupInput>,
) -> ApiResult<AgeGroupDto> {
    send(&state, &caller, UpdateAgeGroup { age_group_id, input }).await
}

async fn archive_age_group(
    State(state): State<AppState>,
    ApiPath(age_group_id): ApiPath<AgeGroupId>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, ArchiveAgeGroup { age_group_id }).await
}

// Teams

async fn age_group_teams(
    State(state): State<AppState>,
    ApiPath(age_group_id): ApiPath<AgeGroupId>,
    caller: Caller,
) -> ApiResult<Vec<TeamDto>> {
    send(&state, &caller, GetTeamsByAgeGroupId { age_group_id }).await
}

async fn create_team(
    State(state): State<AppState>,
    ApiPath(age_group_id): ApiPath<AgeGroupId>,
    caller: Caller,
    ApiJson(input): ApiJson<TeamInput>,
) -> Created<TeamDto> {
    create(&state, &caller, CreateTeam { age_group_id, input }).await
}

async fn get_team(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<TeamId>,
    caller: Caller,
) -> ApiResult<TeamDto> {
    send(&state, &caller, GetTeamById { team_id }).await
}

async fn update_team(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<TeamId>,
    caller: Caller,
    ApiJson(input): ApiJson<TeamInput>,
) -> ApiResult<TeamDto> {
    send(&state, &caller, UpdateTeam { team_id, input }).await
}

async fn archive_team(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<TeamId>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, ArchiveTeam { team_id }).await
}

async fn team_statistics(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<TeamId>,
    caller: Caller,
) -> ApiResult<TeamStatisticsDto> {
    send(&state, &caller, GetTeamStatistics { team_id }).await
}

// Squads and team staff

async fn team_players(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<TeamId>,
    caller: Caller,
) -> ApiResult<Vec<SquadPlayerDto>> {
    send(&state, &caller, GetPlayersByTeamId { team_id }).await
}

async fn add_player_to_team(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<TeamId>,
    caller: Caller,
    ApiJson(input): ApiJson<AddPlayerToTeamInput>,
) -> Created<PlayerTeamDto> {
    create(&state, &caller, AddPlayerToTeam { team_id, input }).await
}

async fn update_squad_number(
    State(state): State<AppState>,
    ApiPath((team_id, player_id)): ApiPath<(TeamId, PlayerId)>,
    caller: Caller,
    ApiJson(input): ApiJson<UpdateSquadNumberInput>,
) -> ApiResult<PlayerTeamDto> {
    let request = UpdateSquadNumber {
        team_id,
        player_id,
        squad_number: input.squad_number,
    };
    send(&state, &caller, request).await
}

async fn remove_player_from_team(
    State(state): State<AppState>,
    ApiPath((team_id, player_id)): ApiPath<(TeamId, PlayerId)>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, RemovePlayerFromTeam { team_id, player_id }).await
}

async fn team_coaches(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<TeamId>,
    caller: Caller,
) -> ApiResult<Vec<TeamCoachDto>> {
    send(&state, &caller, GetCoachesByTeamId { team_id }).await
}

async fn assign_coach(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<TeamId>,
    caller: Caller,
    ApiJson(input): ApiJson<AssignCoachInput>,
) -> Created<TeamCoachDto> {
    create(&state, &caller, AssignCoachToTeam { team_id, input }).await
}

async fn remove_coach(
    State(state): State<AppState>,
    ApiPath((team_id, coach_id)): ApiPath<(TeamId, CoachId)>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, RemoveCoachFromTeam { team_id, coach_id }).await
}

// Matches

async fn team_matches(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<TeamId>,
    caller: Caller,
) -> ApiResult<Vec<MatchDto>> {
    send(&state, &caller, GetMatchesByTeamId { team_id }).await
}

async fn create_match(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<TeamId>,
    caller: Caller,
    ApiJson(input): ApiJson<MatchInput>,
) -> Created<MatchDto> {
    create(&state, &caller, CreateMatch { team_id, input }).await
}

async fn get_match(
    State(state): State<AppState>,
    ApiPath(match_id): ApiPath<MatchId>,
    caller: Caller,
) -> ApiResult<MatchDto> {
    send(&state, &caller, GetMatchById { match_id }).await
}

async fn update_match(
    State(state): State<AppState>,
    ApiPath(match_id): ApiPath<MatchId>,
    caller: Caller,
    ApiJson(input): ApiJson<MatchInput>,
) -> ApiResult<MatchDto> {
    send(&state, &caller, UpdateMatch { match_id, input }).await
}

// Players

async fn club_players(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    caller: Caller,
) -> ApiResult<Vec<PlayerSummaryDto>> {
    send(&state, &caller, GetPlayersByClubId { club_id }).await
}

async fn create_player(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    caller: Caller,
    ApiJson(input): ApiJson<PlayerInput>,
) -> Created<PlayerDto> {
    create(&state, &caller, CreatePlayer { club_id, input }).await
}

async fn get_player(
    State(state): State<AppState>,
    ApiPath(player_id): ApiPath<PlayerId>,
    caller: Caller,
) -> ApiResult<PlayerDto> {
    send(&state, &caller, GetPlayerById { player_id }).await
}

async fn update_player(
    State(state): State<AppState>,
    ApiPath(player_id): ApiPath<PlayerId>,
    caller: Caller,
    ApiJson(input): ApiJson<PlayerInput>,
) -> ApiResult<PlayerDto> {
    send(&state, &caller, UpdatePlayer { player_id, input }).await
}

async fn archive_player(
    State(state): State<AppState>,
    ApiPath(player_id): ApiPath<PlayerId>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, ArchivePlayer { player_id }).await
}

// Coaches

async fn club_coaches(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    caller: Caller,
) -> ApiResult<Vec<CoachDto>> {
    send(&state, &caller, GetCoachesByClubId { club_id }).await
}

async fn create_coach(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    caller: Caller,
    ApiJson(input): ApiJson<CoachInput>,
) -> Created<CoachDto> {
    create(&state, &caller, CreateCoach { club_id, input }).await
}

async fn get_coach(
    State(state): State<AppState>,
    ApiPath(coach_id): ApiPath<CoachId>,
    caller: Caller,
) -> ApiResult<CoachDto> {
    send(&state, &caller, GetCoachById { coach_id }).await
}

async fn update_coach(
    State(state): State<AppState>,
    ApiPath(coach_id): ApiPath<CoachId>,
    caller: Caller,
    ApiJson(input): ApiJson<CoachInput>,
) -> ApiResult<CoachDto> {
    send(&state, &caller, UpdateCoach { coach_id, input }).await
}

async fn archive_coach(
    State(state): State<AppState>,
    ApiPath(coach_id): ApiPath<CoachId>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, ArchiveCoach { coach_id }).await
}

// Kits

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KitFilter {
    team_id: Option<TeamId>,
}

async fn club_kits(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    ApiQuery(filter): ApiQuery<KitFilter>,
    caller: Caller,
) -> ApiResult<Vec<KitDto>> {
    let request = GetKitsByClubId {
        club_id,
        team_id: filter.team_id,
    };
    send(&state, &caller, request).await
}

async fn create_kit(
    State(state): State<AppState>,
    ApiPath(club_id): ApiPath<ClubId>,
    caller: Caller,
    ApiJson(input): ApiJson<KitInput>,
) -> Created<KitDto> {
    create(&state, &caller, CreateKit { club_id, input }).await
}

async fn update_kit(
    State(state): State<AppState>,
    ApiPath(kit_id): ApiPath<KitId>,
    caller: Caller,
    ApiJson(input): ApiJson<KitInput>,
) -> ApiResult<KitDto> {
    send(&state, &caller, UpdateKit { kit_id, input }).await
}

async fn delete_kit(
    State(state): State<AppState>,
    ApiPath(kit_id): ApiPath<KitId>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, DeleteKit { kit_id }).await
}

// Drills and templates

async fn scope_drills(
    State(state): State<AppState>,
    ApiQuery(scope): ApiQuery<Scope>,
    caller: Caller,
) -> ApiResult<Vec<DrillDto>> {
    send(&state, &caller, GetDrillsByScope { scope }).await
}

async fn create_drill(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(body): ApiJson<Scoped<DrillInput>>,
) -> Created<DrillDto> {
    let request = CreateDrill {
        scope: body.scope,
        input: body.input,
    };
    create(&state, &caller, request).await
}

async fn update_drill(
    State(state): State<AppState>,
    ApiPath(drill_id): ApiPath<DrillId>,
    caller: Caller,
    ApiJson(input): ApiJson<DrillInput>,
) -> ApiResult<DrillDto> {
    send(&state, &caller, UpdateDrill { drill_id, input }).await
}

async fn archive_drill(
    State(state): State<AppState>,
    ApiPath(drill_id): ApiPath<DrillId>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, ArchiveDrill { drill_id }).await
}

async fn scope_templates(
    State(state): State<AppState>,
    ApiQuery(scope): ApiQuery<Scope>,
    caller: Caller,
) -> ApiResult<Vec<DrillTemplateDto>> {
    send(&state, &caller, GetDrillTemplatesByScope { scope }).await
}

async fn create_template(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(body): ApiJson<Scoped<DrillTemplateInput>>,
) -> Created<DrillTemplateDto> {
    let request = CreateDrillTemplate {
        scope: body.scope,
        input: body.input,
    };
    create(&state, &caller, request).await
}

async fn get_template(
    State(state): State<AppState>,
    ApiPath(template_id): ApiPath<DrillTemplateId>,
    caller: Caller,
) -> ApiResult<DrillTemplateDto> {
    send(&state, &caller, GetDrillTemplateById { template_id }).await
}

async fn update_template(
    State(state): State<AppState>,
    ApiPath(template_id): ApiPath<DrillTemplateId>,
    caller: Caller,
    ApiJson(input): ApiJson<DrillTemplateInput>,
) -> ApiResult<DrillTemplateDto> {
    send(&state, &caller, UpdateDrillTemplate { template_id, input }).await
}

async fn archive_template(
    State(state): State<AppState>,
    ApiPath(template_id): ApiPath<DrillTemplateId>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, ArchiveDrillTemplate { template_id }).await
}

// Development plans

async fn player_plans(
    State(state): State<AppState>,
    ApiPath(player_id): ApiPath<PlayerId>,
    caller: Caller,
) -> ApiResult<Vec<DevelopmentPlanDto>> {
    send(&state, &caller, GetDevelopmentPlansByPlayerId { player_id }).await
}

async fn create_plan(
    State(state): State<AppState>,
    ApiPath(player_id): ApiPath<PlayerId>,
    caller: Caller,
    ApiJson(input): ApiJson<DevelopmentPlanInput>,
) -> Created<DevelopmentPlanDto> {
    create(&state, &caller, CreateDevelopmentPlan { player_id, input }).await
}

async fn get_plan(
    State(state): State<AppState>,
    ApiPath(plan_id): ApiPath<DevelopmentPlanId>,
    caller: Caller,
) -> ApiResult<DevelopmentPlanDto> {
    send(&state, &caller, GetDevelopmentPlanById { plan_id }).await
}

async fn update_plan(
    State(state): State<AppState>,
    ApiPath(plan_id): ApiPath<DevelopmentPlanId>,
    caller: Caller,
    ApiJson(input): ApiJson<DevelopmentPlanInput>,
) -> ApiResult<DevelopmentPlanDto> {
    send(&state, &caller, UpdateDevelopmentPlan { plan_id, input }).await
}

async fn archive_plan(
    State(state): State<AppState>,
    ApiPath(plan_id): ApiPath<DevelopmentPlanId>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, ArchiveDevelopmentPlan { plan_id }).await
}

// Report cards

async fn player_reports(
    State(state): State<AppState>,
    ApiPath(player_id): ApiPath<PlayerId>,
    caller: Caller,
) -> ApiResult<Vec<ReportDto>> {
    send(&state, &caller, GetReportsByPlayerId { player_id }).await
}

async fn create_report(
    State(state): State<AppState>,
    ApiPath(player_id): ApiPath<PlayerId>,
    caller: Caller,
    ApiJson(input): ApiJson<ReportInput>,
) -> Created<ReportDto> {
    create(&state, &caller, CreateReport { player_id, input }).await
}

async fn get_report(
    State(state): State<AppState>,
    ApiPath(report_id): ApiPath<ReportId>,
    caller: Caller,
) -> ApiResult<ReportDto> {
    send(&state, &caller, GetReportById { report_id }).await
}

async fn update_report(
    State(state): State<AppState>,
    ApiPath(report_id): ApiPath<ReportId>,
    caller: Caller,
    ApiJson(input): ApiJson<ReportInput>,
) -> ApiResult<ReportDto> {
    send(&state, &caller, UpdateReport { report_id, input }).await
}

async fn archive_report(
    State(state): State<AppState>,
    ApiPath(report_id): ApiPath<ReportId>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, ArchiveReport { report_id }).await
}

// Evaluations

async fn player_evaluations(
    State(state): State<AppState>,
    ApiPath(player_id): ApiPath<PlayerId>,
    caller: Caller,
) -> ApiResult<Vec<EvaluationDto>> {
    send(&state, &caller, GetEvaluationsByPlayerId { player_id }).await
}

async fn create_evaluation(
    State(state): State<AppState>,
    ApiPath(player_id): ApiPath<PlayerId>,
    caller: Caller,
    ApiJson(input): ApiJson<EvaluationInput>,
) -> Created<EvaluationDto> {
    create(&state, &caller, CreateEvaluation { player_id, input }).await
}

async fn delete_evaluation(
    State(state): State<AppState>,
    ApiPath(evaluation_id): ApiPath<EvaluationId>,
    caller: Caller,
) -> NoContent {
    no_content(&state, &caller, DeleteEvaluation { evaluation_id }).await
}

// Users

async fn create_user(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(request): ApiJson<CreateUser>,
) -> Created<UserDto> {
    create(&state, &caller, request).await
}

async fn get_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<UserId>,
    caller: Caller,
) -> ApiResult<UserDto> {
    send(&state, &caller, GetUserById { user_id }).await
}
