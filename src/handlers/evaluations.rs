//! Attribute evaluations
//!
//! An evaluation rates a player on named attributes. The overall rating is
//! the rounded mean of the attribute ratings. Evaluations are hard-deleted
//! together with their attribute rows.

use super::{require_coach, require_player};
use crate::domain::{CoachId, EvaluationId, PlayerId, Role};
use crate::error::{ClubError, Result};
use crate::mediator::{Caller, Request};
use crate::storage::{ClubDatabase, Evaluation, EvaluationAttribute};
use crate::validation::{Validate, ValidationErrors, Validator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRatingDto {
    pub name: String,
    pub rating: u32,
    pub notes: Option<String>,
}

impl From<EvaluationAttribute> for AttributeRatingDto {
    fn from(attribute: EvaluationAttribute) -> Self {
        Self {
            name: attribute.name,
            rating: attribute.rating,
            notes: attribute.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationInput {
    pub coach_id: Option<CoachId>,
    /// Defaults to the time the evaluation is recorded
    pub evaluated_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub attributes: Vec<AttributeRatingDto>,
}

impl Validate for EvaluationInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator
            .ensure(
                !self.attributes.is_empty(),
                "attributes",
                "At least one attribute must be rated",
            )
            .max_length("notes", self.notes.as_deref(), 4000);

        let mut seen = HashSet::new();
        for (i, attribute) in self.attributes.iter().enumerate() {
            let name = attribute.name.trim().to_lowercase();
            validator
                .required(&format!("attributes[{}].name", i), &attribute.name)
                .range(&format!("attributes[{}].rating", i), attribute.rating, 1, 10)
                .ensure(
                    name.is_empty() || seen.insert(name),
                    "attributes",
                    "Attribute names must be unique",
                );
        }
        validator.finish()
    }
}

fn overall_rating(attributes: &[EvaluationAttribute]) -> Option<u32> {
    if attributes.is_empty() {
        return None;
    }
    let total: u32 = attributes.iter().map(|a| a.rating).sum();
    Some((f64::from(total) / attributes.len() as f64).round() as u32)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDto {
    pub id: EvaluationId,
    pub player_id: PlayerId,
    pub coach_id: Option<CoachId>,
    pub evaluated_at: DateTime<Utc>,
    pub overall_rating: Option<u32>,
    pub notes: Option<String>,
    pub attributes: Vec<AttributeRatingDto>,
}

impl EvaluationDto {
    fn from_parts(evaluation: Evaluation, attributes: Vec<EvaluationAttribute>) -> Self {
        Self {
            id: evaluation.id,
            player_id: evaluation.player_id,
            coach_id: evaluation.coach_id,
            evaluated_at: evaluation.evaluated_at,
            overall_rating: evaluation.overall_rating,
            notes: evaluation.notes,
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateEvaluation {
    pub player_id: PlayerId,
    pub input: EvaluationInput,
}

impl Request for CreateEvaluation {
    type Response = EvaluationDto;
    const NAME: &'static str = "CreateEvaluation";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.input.validate()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<EvaluationDto> {
        let player = require_player(db, self.player_id)?;
        if let Some(coach_id) = self.input.coach_id {
            require_coach(db, coach_id)?;
        }

        let input = self.input;
        let mut attributes: Vec<EvaluationAttribute> = input
            .attributes
            .into_iter()
            .map(|a| EvaluationAttribute {
                name: a.name.trim().to_string(),
                rating: a.rating,
                notes: a.notes,
            })
            .collect();
        attributes.sort_by(|a, b| a.name.cmp(&b.name));

        let evaluation = Evaluation {
            id: EvaluationId::generate(),
            player_id: player.id,
            coach_id: input.coach_id,
            evaluated_at: input.evaluated_at.unwrap_or_else(crate::util::now),
            overall_rating: overall_rating(&attributes),
            notes: input.notes,
        };
        db.insert_evaluation(&evaluation, &attributes)?;
        Ok(EvaluationDto::from_parts(evaluation, attributes))
    }
}

/// Evaluations of a player, most recent first
#[derive(Debug, Clone, Copy)]
pub struct GetEvaluationsByPlayerId {
    pub player_id: PlayerId,
}

impl Request for GetEvaluationsByPlayerId {
    type Response = Vec<EvaluationDto>;
    const NAME: &'static str = "GetEvaluationsByPlayerId";

    fn handle(self, db: &mut ClubDatabase) -> Result<Vec<EvaluationDto>> {
        require_player(db, self.player_id)?;
        let mut evaluations = Vec::new();
        for evaluation in db.list_evaluations_by_player(self.player_id)? {
            let attributes = db.list_evaluation_attributes(evaluation.id)?;
            evaluations.push(EvaluationDto::from_parts(evaluation, attributes));
        }
        Ok(evaluations)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteEvaluation {
    pub evaluation_id: EvaluationId,
}

impl Request for DeleteEvaluation {
    type Response = ();
    const NAME: &'static str = "DeleteEvaluation";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Coach)
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<()> {
        if db.get_evaluation(self.evaluation_id)?.is_none() {
            return Err(ClubError::not_found("AttributeEvaluation", self.evaluation_id));
        }
        let attributes_removed = db.delete_evaluation(self.evaluation_id)?;
        tracing::info!(
            evaluation_id = %self.evaluation_id,
            attributes_removed,
            "evaluation deleted"
        );
        Ok(())
    }
}
