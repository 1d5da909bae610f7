//! Development plans and their goals

use super::{ensure_active, require_player};
use crate::domain::{DevelopmentPlanId, GoalId, PlayerId, Role};
use crate::error::{ClubError, Result};
use crate::mediator::{Caller, Request};
use crate::storage::{ClubDatabase, DevelopmentGoal, DevelopmentPlan};
use crate::validation::{Validate, ValidationErrors, Validator};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalInput {
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentPlanInput {
    pub title: String,
    pub period_start: NaiveDate,
    pub period_end: Option<NaiveDate>,
    pub coach_notes: Option<String>,
    #[serde(default)]
    pub goals: Vec<GoalInput>,
}

impl Validate for DevelopmentPlanInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator
            .required("title", &self.title)
            .length("title", &self.title, 2, 200)
            .ensure(
                self.period_end.map_or(true, |end| end >= self.period_start),
                "periodEnd",
                "periodEnd must not be before periodStart",
            )
            .max_length("coachNotes", self.coach_notes.as_deref(), 4000);

        for (i, goal) in self.goals.iter().enumerate() {
            validator
                .required(&format!("goals[{}].title", i), &goal.title)
                .length(&format!("goals[{}].title", i), &goal.title, 1, 200)
                .range(&format!("goals[{}].progress", i), goal.progress, 0, 100);
        }
        validator.finish()
    }
}

impl DevelopmentPlanInput {
    fn goals_for(&self, plan_id: DevelopmentPlanId) -> Vec<DevelopmentGoal> {
        self.goals
            .iter()
            .map(|goal| DevelopmentGoal {
                id: GoalId::generate(),
                plan_id,
                title: goal.title.trim().to_string(),
                description: goal.description.clone(),
                target_date: goal.target_date,
                // A completed goal is always at 100%
                progress: if goal.completed { 100 } else { goal.progress },
                completed: goal.completed,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDto {
    pub id: GoalId,
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub progress: u32,
    pub completed: bool,
}

impl From<DevelopmentGoal> for GoalDto {
    fn from(goal: DevelopmentGoal) -> Self {
        Self {
            id: goal.id,
            title: goal.title,
            description: goal.description,
            target_date: goal.target_date,
            progress: goal.progress,
            completed: goal.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentPlanDto {
    pub id: DevelopmentPlanId,
    pub player_id: PlayerId,
    pub title: String,
    pub period_start: NaiveDate,
    pub period_end: Option<NaiveDate>,
    pub coach_notes: Option<String>,
    pub goals: Vec<GoalDto>,
    /// Mean goal progress, 0 without goals
    pub overall_progress: u32,
    pub completed_goals: usize,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl DevelopmentPlanDto {
    pub(crate) fn from_parts(plan: DevelopmentPlan, goals: Vec<DevelopmentGoal>) -> Self {
        let completed_goals = goals.iter().filter(|g| g.completed).count();
        let overall_progress = if goals.is_empty() {
            0
        } else {
            let total: u32 = goals.iter().map(|g| g.progress).sum();
            (f64::from(total) / goals.len() as f64).round() as u32
        };

        Self {
            id: plan.id,
            player_id: plan.player_id,
            title: plan.title,
            period_start: plan.period_start,
            period_end: plan.period_end,
            coach_notes: plan.coach_notes,
            goals: goals.into_iter().map(GoalDto::from).collect(),
            overall_progress,
            completed_goals,
            is_archived: plan.is_archived,
            created_at: plan.created_at,
        }
    }
}

fn require_plan(db: &ClubDatabase, id: DevelopmentPlanId) -> Result<DevelopmentPlan> {
    db.get_development_plan(id)?
        .ok_or_else(|| ClubError::not_found("DevelopmentPlan", id))
}

#[derive(Debug, Clone)]
pub struct CreateDevelopmentPlan {
    pub player_id: PlayerId,
    pub input: DevelopmentPlanInput,
}

impl Request for CreateDevelopmentPlan {
    type Response = DevelopmentPlanDto;
    const NAME: &'static str = "CreateDevelopmentPlan";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<DevelopmentPlanDto> {
        let player = require_player(db, self.player_id)?;
        ensure_active(player.is_archived, "Player")?;

        let id = DevelopmentPlanId::generate();
        let goals = self.input.goals_for(id);
        let input = self.input;
        let plan = DevelopmentPlan {
            id,
            player_id: player.id,
            title: input.title.trim().to_string(),
            period_start: input.period_start,
            period_end: input.period_end,
            coach_notes: input.coach_notes,
            is_archived: false,
            created_at: crate::util::now(),
        };
        db.insert_development_plan(&plan, &goals)?;
        tracing::info!(plan_id = %plan.id, player_id = %player.id, goals = goals.len(), "development plan created");
        Ok(DevelopmentPlanDto::from_parts(plan, goals))
    }
}

#[derive(Debug, Clone)]
pub struct UpdateDevelopmentPlan {
    pub plan_id: DevelopmentPlanId,
    pub input: DevelopmentPlanInput,
}

impl Request for UpdateDevelopmentPlan {
    type Response = DevelopmentPlanDto;
    const NAME: &'static str = "UpdateDevelopmentPlan";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<DevelopmentPlanDto> {
        let existing = require_plan(db, self.plan_id)?;
        let goals = self.input.goals_for(existing.id);
        let input = self.input;
        let plan = DevelopmentPlan {
            title: input.title.trim().to_string(),
            period_start: input.period_start,
            period_end: input.period_end,
            coach_notes: input.coach_notes,
            ..existing
        };
        db.update_development_plan(&plan, &goals)?;
        Ok(DevelopmentPlanDto::from_parts(plan, goals))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetDevelopmentPlanById {
    pub plan_id: DevelopmentPlanId,
}

impl Request for GetDevelopmentPlanById {
    type Response = DevelopmentPlanDto;
    const NAME: &'static str = "GetDevelopmentPlanById";

    fn handle(self, db: &mut ClubDatabase) -> Result<DevelopmentPlanDto> {
        let plan = require_plan(db, self.plan_id)?;
        let goals = db.list_development_goals(plan.id)?;
        Ok(DevelopmentPlanDto::from_parts(plan, goals))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetDevelopmentPlansByPlayerId {
    pub player_id: PlayerId,
}

impl Request for GetDevelopmentPlansByPlayerId {
    type Response = Vec<DevelopmentPlanDto>;
    const NAME: &'static str = "GetDevelopmentPlansByPlayerId";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<DevelopmentPlanDto>> {
        require_player(db, self.player_id)?;
        let mut plans = Vec::new();
        for plan in db.list_development_plans_by_player(self.player_id)? {
            let goals = db.list_development_goals(plan.id)?;
            plans.push(DevelopmentPlanDto::from_parts(plan, goals));
        }
        Ok(plans)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArchiveDevelopmentPlan {
    pub plan_id: DevelopmentPlanId,
}

impl Request for ArchiveDevelopmentPlan {
    type Response = ();
    const NAME: &'static str = "ArchiveDevelopmentPlan";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        if !db.archive_development_plan(self.plan_id)? {
            return Err(ClubError::not_found("DevelopmentPlan", self.plan_id));
        }
        Ok(())
    }
}
