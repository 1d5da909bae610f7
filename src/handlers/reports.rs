//! Player report cards
//!
//! A report carries its ordered development actions and the professionals
//! the player is compared with. Both lists are replaced with the report on
//! update.

use super::{ensure_active, require_coach, require_player};
use crate::domain::{CoachId, PlayerId, ReportId, Role};
use crate::error::{ClubError, Result};
use crate::mediator::{Caller, Request};
use crate::storage::{ClubDatabase, DevelopmentAction, Report, SimilarProfessional};
use crate::util::{join_csv, round1, split_csv};
use crate::validation::{Validate, ValidationErrors, Validator};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentActionDto {
    pub goal: String,
    #[serde(default)]
    pub actions: Vec<String>,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
}

impl From<DevelopmentAction> for DevelopmentActionDto {
    fn from(action: DevelopmentAction) -> Self {
        Self {
            actions: split_csv(Some(&action.actions)),
            goal: action.goal,
            target_date: action.target_date,
            completed: action.completed,
        }
    }
}

impl From<&DevelopmentActionDto> for DevelopmentAction {
    fn from(action: &DevelopmentActionDto) -> Self {
        Self {
            goal: action.goal.trim().to_string(),
            actions: join_csv(&action.actions),
            target_date: action.target_date,
            completed: action.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarProfessionalDto {
    pub name: String,
    pub team: String,
    pub position: String,
    pub reason: String,
}

impl From<SimilarProfessional> for SimilarProfessionalDto {
    fn from(professional: SimilarProfessional) -> Self {
        Self {
            name: professional.name,
            team: professional.team,
            position: professional.position,
            reason: professional.reason,
        }
    }
}

impl From<&SimilarProfessionalDto> for SimilarProfessional {
    fn from(professional: &SimilarProfessionalDto) -> Self {
        Self {
            name: professional.name.trim().to_string(),
            team: professional.team.trim().to_string(),
            position: professional.position.trim().to_string(),
            reason: professional.reason.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    pub coach_id: Option<CoachId>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub overall_rating: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    pub coach_comments: Option<String>,
    #[serde(default)]
    pub development_actions: Vec<DevelopmentActionDto>,
    #[serde(default)]
    pub similar_professionals: Vec<SimilarProfessionalDto>,
}

impl Validate for ReportInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator
            .ensure(
                self.period_end >= self.period_start,
                "periodEnd",
                "periodEnd must not be before periodStart",
            )
            .range("overallRating", self.overall_rating, 1.0, 10.0)
            .max_length("coachComments", self.coach_comments.as_deref(), 4000);

        for item in &self.strengths {
            validator.ensure(
                !item.contains(','),
                "strengths",
                "Entries cannot contain commas",
            );
        }
        for item in &self.areas_for_improvement {
            validator.ensure(
                !item.contains(','),
                "areasForImprovement",
                "Entries cannot contain commas",
            );
        }
        for (i, action) in self.development_actions.iter().enumerate() {
            validator.required(&format!("developmentActions[{}].goal", i), &action.goal);
            for step in &action.actions {
                validator.ensure(
                    !step.contains(','),
                    &format!("developmentActions[{}].actions", i),
                    "Entries cannot contain commas",
                );
            }
        }
        for (i, professional) in self.similar_professionals.iter().enumerate() {
            validator
                .required(&format!("similarProfessionals[{}].name", i), &professional.name)
                .required(&format!("similarProfessionals[{}].team", i), &professional.team)
                .required(
                    &format!("similarProfessionals[{}].position", i),
                    &professional.position,
                );
        }
        validator.finish()
    }
}

impl ReportInput {
    fn children(&self) -> (Vec<DevelopmentAction>, Vec<SimilarProfessional>) {
        (
            self.development_actions.iter().map(Into::into).collect(),
            self.similar_professionals.iter().map(Into::into).collect(),
        )
    }
}

fn check_report_coach(db: &ClubDatabase, coach_id: Option<CoachId>) -> Result<()> {
    if let Some(coach_id) = coach_id {
        require_coach(db, coach_id)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDto {
    pub id: ReportId,
    pub player_id: PlayerId,
    pub coach_id: Option<CoachId>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub overall_rating: f64,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub coach_comments: Option<String>,
    pub development_actions: Vec<DevelopmentActionDto>,
    pub similar_professionals: Vec<SimilarProfessionalDto>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl ReportDto {
    fn from_parts(
        report: Report,
        actions: Vec<DevelopmentAction>,
        professionals: Vec<SimilarProfessional>,
    ) -> Self {
        Self {
            id: report.id,
            player_id: report.player_id,
            coach_id: report.coach_id,
            period_start: report.period_start,
            period_end: report.period_end,
            overall_rating: report.overall_rating,
            strengths: split_csv(Some(&report.strengths)),
            areas_for_improvement: split_csv(Some(&report.areas_for_improvement)),
            coach_comments: report.coach_comments,
            development_actions: actions.into_iter().map(Into::into).collect(),
            similar_professionals: professionals.into_iter().map(Into::into).collect(),
            is_archived: report.is_archived,
            created_at: report.created_at,
        }
    }

    fn load(db: &ClubDatabase, report: Report) -> Result<Self> {
        let actions = db.list_development_actions(report.id)?;
        let professionals = db.list_similar_professionals(report.id)?;
        Ok(Self::from_parts(report, actions, professionals))
    }
}

fn require_report(db: &ClubDatabase, id: ReportId) -> Result<Report> {
    db.get_report(id)?
        .ok_or_else(|| ClubError::not_found("Report", id))
}

#[derive(Debug, Clone)]
pub struct CreateReport {
    pub player_id: PlayerId,
    pub input: ReportInput,
}

impl Request for CreateReport {
    type Response = ReportDto;
    const NAME: &'static str = "CreateReport";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<ReportDto> {
        let player = require_player(db, self.player_id)?;
        ensure_active(player.is_archived, "Player")?;
        check_report_coach(db, self.input.coach_id)?;

        let (actions, professionals) = self.input.children();
        let input = self.input;
        let report = Report {
            id: ReportId::generate(),
            player_id: player.id,
            coach_id: input.coach_id,
            period_start: input.period_start,
            period_end: input.period_end,
            overall_rating: round1(input.overall_rating),
            strengths: join_csv(&input.strengths),
            areas_for_improvement: join_csv(&input.areas_for_improvement),
            coach_comments: input.coach_comments,
            is_archived: false,
            created_at: crate::util::now(),
        };
        db.insert_report(&report, &actions, &professionals)?;
        tracing::info!(report_id = %report.id, player_id = %player.id, "report created");
        Ok(ReportDto::from_parts(report, actions, professionals))
    }
}

#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub report_id: ReportId,
    pub input: ReportInput,
}

impl Request for UpdateReport {
    type Response = ReportDto;
    const NAME: &'static str = "UpdateReport";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<ReportDto> {
        let existing = require_report(db, self.report_id)?;
        check_report_coach(db, self.input.coach_id)?;

        let (actions, professionals) = self.input.children();
        let input = self.input;
        let report = Report {
            coach_id: input.coach_id,
            period_start: input.period_start,
            period_end: input.period_end,
            overall_rating: round1(input.overall_rating),
            strengths: join_csv(&input.strengths),
            areas_for_improvement: join_csv(&input.areas_for_improvement),
            coach_comments: input.coach_comments,
            ..existing
        };
        db.update_report(&report, &actions, &professionals)?;
        Ok(ReportDto::from_parts(report, actions, professionals))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArchiveReport {
    pub report_id: ReportId,
}

impl Request for ArchiveReport {
    type Response = ();
    const NAME: &'static str = "ArchiveReport";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        require_report(db, self.report_id)?;
        db.archive_report(self.report_id)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetReportById {
    pub report_id: ReportId,
}

impl Request for GetReportById {
    type Response = ReportDto;
    const NAME: &'static str = "GetReportById";

    fn handle(self, db: &mut ClubDatabase) -> Result<ReportDto> {
        let report = require_report(db, self.report_id)?;
        ReportDto::load(db, report)
    }
}

/// Active reports, most recent period first
#[derive(Debug, Clone, Copy)]
pub struct GetReportsByPlayerId {
    pub player_id: PlayerId,
}

impl Request for GetReportsByPlayerId {
    type Response = Vec<ReportDto>;
    const NAME: &'static str = "GetReportsByPlayerId";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<ReportDto>> {
        require_player(db, self.player_id)?;
        db.list_reports_by_player(self.player_id)?
            .into_iter()
            .map(|report| ReportDto::load(db, report))
            .collect()
    }
}
