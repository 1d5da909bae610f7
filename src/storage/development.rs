//! Development plan, report card and attribute evaluation queries
//!
//! Each of these aggregates owns child rows. Writes that touch parent and
//! children run in a single transaction so a failure part-way leaves the
//! previous state intact.

use super::{models::*, schema::ClubDatabase};
use crate::domain::{DevelopmentPlanId, EvaluationId, PlayerId, ReportId};
use crate::error::Result;
use rusqlite::{params, OptionalExtension, Row, Transaction};

const PLAN_COLUMNS: &str = "id, player_id, title, period_start, period_end, coach_notes,
                            is_archived, created_at";

const REPORT_COLUMNS: &str = "id, player_id, coach_id, period_start, period_end, overall_rating,
                              strengths, areas_for_improvement, coach_comments, is_archived,
                              created_at";

const EVALUATION_COLUMNS: &str = "id, player_id, coach_id, evaluated_at, overall_rating, notes";

impl ClubDatabase {
    pub fn insert_development_plan(
        &mut self,
        plan: &DevelopmentPlan,
        goals: &[DevelopmentGoal],
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO development_plans (id, player_id, title, period_start, period_end,
                                            coach_notes, is_archived, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                plan.id,
                plan.player_id,
                plan.title,
                plan.period_start,
                plan.period_end,
                plan.coach_notes,
                plan.is_archived,
                plan.created_at
            ],
        )?;
        insert_goals(&tx, goals)?;
        tx.commit()?;
        Ok(())
    }

    /// Replace a plan and its goals. Returns false when the plan does not exist.
    pub fn update_development_plan(
        &mut self,
        plan: &DevelopmentPlan,
        goals: &[DevelopmentGoal],
    ) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let rows_affected = tx.execute(
            "UPDATE development_plans
             SET title = ?, period_start = ?, period_end = ?, coach_notes = ?
             WHERE id = ?",
            params![
                plan.title,
                plan.period_start,
                plan.period_end,
                plan.coach_notes,
                plan.id
            ],
        )?;
        if rows_affected == 0 {
            return Ok(false);
        }

        tx.execute(
            "DELETE FROM development_goals WHERE plan_id = ?",
            params![plan.id],
        )?;
        insert_goals(&tx, goals)?;
        tx.commit()?;
        Ok(true)
    }

    pub fn get_development_plan(&self, id: DevelopmentPlanId) -> Result<Option<DevelopmentPlan>> {
        let plan = self
            .conn
            .query_row(
                &format!("SELECT {} FROM development_plans WHERE id = ?", PLAN_COLUMNS),
                params![id],
                plan_from_row,
            )
            .optional()?;
        Ok(plan)
    }

    pub fn list_development_plans_by_player(&self, player_id: PlayerId) -> Result<Vec<DevelopmentPlan>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM development_plans
             WHERE player_id = ? AND is_archived = 0
             ORDER BY period_start DESC",
            PLAN_COLUMNS
        ))?;
        let rows = stmt.query_map(params![player_id], plan_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn list_development_goals(&self, plan_id: DevelopmentPlanId) -> Result<Vec<DevelopmentGoal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, plan_id, title, description, target_date, progress, completed
             FROM development_goals
             WHERE plan_id = ?
             ORDER BY position",
        )?;
        let rows = stmt.query_map(params![plan_id], |row| {
            Ok(DevelopmentGoal {
                id: row.get("id")?,
                plan_id: row.get("plan_id")?,
                title: row.get("title")?,
                description: row.get("description")?,
                target_date: row.get("target_date")?,
                progress: row.get("progress")?,
                completed: row.get("completed")?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn archive_development_plan(&mut self, id: DevelopmentPlanId) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE development_plans SET is_archived = 1 WHERE id = ?",
            params![id],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn insert_report(
        &mut self,
        report: &Report,
        actions: &[DevelopmentAction],
        professionals: &[SimilarProfessional],
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO reports (id, player_id, coach_id, period_start, period_end,
                                  overall_rating, strengths, areas_for_improvement,
                                  coach_comments, is_archived, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                report.id,
                report.player_id,
                report.coach_id,
                report.period_start,
                report.period_end,
                report.overall_rating,
                report.strengths,
                report.areas_for_improvement,
                report.coach_comments,
                report.is_archived,
                report.created_at
            ],
        )?;
        insert_report_children(&tx, report.id, actions, professionals)?;
        tx.commit()?;
        Ok(())
    }

    /// Replace a report and its child rows. Returns false when the report does not exist.
    pub fn update_report(
        &mut self,
        report: &Report,
        actions: &[DevelopmentAction],
        professionals: &[SimilarProfessional],
    ) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let rows_affected = tx.execute(
            "UPDATE reports
             SET coach_id = ?, period_start = ?, period_end = ?, overall_rating = ?,
                 strengths = ?, areas_for_improvement = ?, coach_comments = ?
             WHERE id = ?",
            params![
                report.coach_id,
                report.period_start,
                report.period_end,
                report.overall_rating,
                report.strengths,
                report.areas_for_improvement,
                report.coach_comments,
                report.id
            ],
        )?;
        if rows_affected == 0 {
            return Ok(false);
        }

        tx.execute(
            "DELETE FROM report_development_actions WHERE report_id = ?",
            params![report.id],
        )?;
        tx.execute(
            "DELETE FROM report_similar_professionals WHERE report_id = ?",
            params![report.id],
        )?;
        insert_report_children(&tx, report.id, actions, professionals)?;
        tx.commit()?;
        Ok(true)
    }

    pub fn get_report(&self, id: ReportId) -> Result<Option<Report>> {
        let report = self
            .conn
            .query_row(
                &format!("SELECT {} FROM reports WHERE id = ?", REPORT_COLUMNS),
                params![id],
                report_from_row,
            )
            .optional()?;
        Ok(report)
    }

    pub fn list_reports_by_player(&self, player_id: PlayerId) -> Result<Vec<Report>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM reports
             WHERE player_id = ? AND is_archived = 0
             ORDER BY period_end DESC, created_at DESC",
            REPORT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![player_id], report_from_row)?;

        let mut reports = Vec::new();
        for row in rows {
            reports.push(row?);
        }
        Ok(reports)
    }

    pub fn list_development_actions(&self, report_id: ReportId) -> Result<Vec<DevelopmentAction>> {
        let mut stmt = self.conn.prepare(
            "SELECT goal, actions, target_date, completed
             FROM report_development_actions
             WHERE report_id = ?
             ORDER BY position",
        )?;
        let rows = stmt.query_map(params![report_id], |row| {
            Ok(DevelopmentAction {
                goal: row.get(0)?,
                actions: row.get(1)?,
                target_date: row.get(2)?,
                completed: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn list_similar_professionals(&self, report_id: ReportId) -> Result<Vec<SimilarProfessional>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, team, playing_position, reason
             FROM report_similar_professionals
             WHERE report_id = ?
             ORDER BY position",
        )?;
        let rows = stmt.query_map(params![report_id], |row| {
            Ok(SimilarProfessional {
                name: row.get(0)?,
                team: row.get(1)?,
                position: row.get(2)?,
                reason: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn archive_report(&mut self, id: ReportId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("UPDATE reports SET is_archived = 1 WHERE id = ?", params![id])?;
        Ok(rows_affected > 0)
    }

    pub fn insert_evaluation(
        &mut self,
        evaluation: &Evaluation,
        attributes: &[EvaluationAttribute],
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO attribute_evaluations (id, player_id, coach_id, evaluated_at,
                                                overall_rating, notes)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                evaluation.id,
                evaluation.player_id,
                evaluation.coach_id,
                evaluation.evaluated_at,
                evaluation.overall_rating,
                evaluation.notes
            ],
        )?;
        for attribute in attributes {
            tx.execute(
                "INSERT INTO evaluation_attributes (evaluation_id, attribute_name, rating, notes)
                 VALUES (?, ?, ?, ?)",
                params![evaluation.id, attribute.name, attribute.rating, attribute.notes],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn get_evaluation(&self, id: EvaluationId) -> Result<Option<Evaluation>> {
        let evaluation = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM attribute_evaluations WHERE id = ?",
                    EVALUATION_COLUMNS
                ),
                params![id],
                evaluation_from_row,
            )
            .optional()?;
        Ok(evaluation)
    }

    pub fn list_evaluations_by_player(&self, player_id: PlayerId) -> Result<Vec<Evaluation>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM attribute_evaluations WHERE player_id = ? ORDER BY evaluated_at DESC",
            EVALUATION_COLUMNS
        ))?;
        let rows = stmt.query_map(params![player_id], evaluation_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn list_evaluation_attributes(&self, id: EvaluationId) -> Result<Vec<EvaluationAttribute>> {
        let mut stmt = self.conn.prepare(
            "SELECT attribute_name, rating, notes
             FROM evaluation_attributes
             WHERE evaluation_id = ?
             ORDER BY attribute_name",
        )?;
        let rows = stmt.query_map(params![id], |row| {
            Ok(EvaluationAttribute {
                name: row.get(0)?,
                rating: row.get(1)?,
                notes: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Delete an evaluation and its attribute rows as one unit.
    ///
    /// Returns the number of attribute rows removed. Any failure rolls the
    /// transaction back, leaving both tables untouched.
    pub fn delete_evaluation(&mut self, id: EvaluationId) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let attributes_removed = tx.execute(
            "DELETE FROM evaluation_attributes WHERE evaluation_id = ?",
            params![id],
        )?;
        tx.execute(
            "DELETE FROM attribute_evaluations WHERE id = ?",
            params![id],
        )?;
        tx.commit()?;
        Ok(attributes_removed)
    }
}

fn insert_goals(tx: &Transaction<'_>, goals: &[DevelopmentGoal]) -> Result<()> {
    for (position, goal) in goals.iter().enumerate() {
        tx.execute(
            "INSERT INTO development_goals (id, plan_id, position, title, description,
                                            target_date, progress, completed)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                goal.id,
                goal.plan_id,
                position as i64,
                goal.title,
                goal.description,
                goal.target_date,
                goal.progress,
                goal.completed
            ],
        )?;
    }
    Ok(())
}

fn insert_report_children(
    tx: &Transaction<'_>,
    report_id: ReportId,
    actions: &[DevelopmentAction],
    professionals: &[SimilarProfessional],
) -> Result<()> {
    for (position, action) in actions.iter().enumerate() {
        tx.execute(
            "INSERT INTO report_development_actions (report_id, position, goal, actions,
                                                     target_date, completed)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                report_id,
                position as i64,
                action.goal,
                action.actions,
                action.target_date,
                action.completed
            ],
        )?;
    }
    for (position, professional) in professionals.iter().enumerate() {
        tx.execute(
            "INSERT INTO report_similar_professionals (report_id, position, name, team,
                                                       playing_position, reason)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                report_id,
                position as i64,
                professional.name,
                professional.team,
                professional.position,
                professional.reason
            ],
        )?;
    }
    Ok(())
}

fn plan_from_row(row: &Row) -> rusqlite::Result<DevelopmentPlan> {
    Ok(DevelopmentPlan {
        id: row.get("id")?,
        player_id: row.get("player_id")?,
        title: row.get("title")?,
        period_start: row.get("period_start")?,
        period_end: row.get("period_end")?,
        coach_notes: row.get("coach_notes")?,
        is_archived: row.get("is_archived")?,
        created_at: row.get("created_at")?,
    })
}

fn report_from_row(row: &Row) -> rusqlite::Result<Report> {
    Ok(Report {
        id: row.get("id")?,
        player_id: row.get("player_id")?,
        coach_id: row.get("coach_id")?,
        period_start: row.get("period_start")?,
        period_end: row.get("period_end")?,
        overall_rating: row.get("overall_rating")?,
        strengths: row.get("strengths")?,
        areas_for_improvement: row.get("areas_for_improvement")?,
        coach_comments: row.get("coach_comments")?,
        is_archived: row.get("is_archived")?,
        created_at: row.get("created_at")?,
    })
}

fn evaluation_from_row(row: &Row) -> rusqlite::Result<Evaluation> {
    Ok(Evaluation {
        id: row.get("id")?,
        player_id: row.get("player_id")?,
        coach_id: row.get("coach_id")?,
        evaluated_at: row.get("evaluated_at")?,
        overall_rating: row.get("overall_rating")?,
        notes: row.get("notes")?,
    })
}
