//! Drill and drill template queries
//!
//! Both tables carry the same scope columns. A listing for a scope returns
//! resources defined at that level plus everything inherited from broader
//! levels: club-wide rows always, the age group's rows when the scope names
//! an age group, and the team's own rows when it names a team.

use super::{models::*, schema::ClubDatabase};
use crate::domain::{DrillId, DrillTemplateId, Scope};
use crate::error::Result;
use rusqlite::{params, OptionalExtension, Row, ToSql};

const DRILL_COLUMNS: &str = "id, club_id, age_group_id, team_id, name, description,
                             duration_minutes, equipment, tags, is_archived";

const TEMPLATE_COLUMNS: &str = "id, club_id, age_group_id, team_id, name, description, drill_ids,
                                is_archived";

/// WHERE fragment selecting rows visible from `scope`, with its parameters
fn visibility_filter(scope: &Scope) -> (String, Vec<Box<dyn ToSql>>) {
    let mut clause = String::from(
        "club_id = ? AND is_archived = 0 AND ((age_group_id IS NULL AND team_id IS NULL)",
    );
    let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(scope.club_id)];

    if let Some(age_group_id) = scope.age_group_id {
        clause.push_str(" OR (age_group_id = ? AND team_id IS NULL)");
        params.push(Box::new(age_group_id));
    }

    if let Some(team_id) = scope.team_id {
        clause.push_str(" OR team_id = ?");
        params.push(Box::new(team_id));
    }

    clause.push(')');
    (clause, params)
}

impl ClubDatabase {
    pub fn insert_drill(&mut self, drill: &Drill) -> Result<()> {
        self.conn.execute(
            "INSERT INTO drills (id, club_id, age_group_id, team_id, name, description,
                                 duration_minutes, equipment, tags, is_archived)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                drill.id,
                drill.scope.club_id,
                drill.scope.age_group_id,
                drill.scope.team_id,
                drill.name,
                drill.description,
                drill.duration_minutes,
                drill.equipment,
                drill.tags,
                drill.is_archived
            ],
        )?;
        Ok(())
    }

    /// Replace a drill's content. Scope is fixed at creation.
    pub fn update_drill(&mut self, drill: &Drill) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE drills
             SET name = ?, description = ?, duration_minutes = ?, equipment = ?, tags = ?
             WHERE id = ?",
            params![
                drill.name,
                drill.description,
                drill.duration_minutes,
                drill.equipment,
                drill.tags,
                drill.id
            ],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn get_drill(&self, id: DrillId) -> Result<Option<Drill>> {
        let drill = self
            .conn
            .query_row(
                &format!("SELECT {} FROM drills WHERE id = ?", DRILL_COLUMNS),
                params![id],
                drill_from_row,
            )
            .optional()?;
        Ok(drill)
    }

    /// Drills with the given ids, in no particular order; missing ids are skipped
    pub fn get_drills(&self, ids: &[DrillId]) -> Result<Vec<Drill>> {
        let mut drills = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(drill) = self.get_drill(*id)? {
                drills.push(drill);
            }
        }
        Ok(drills)
    }

    pub fn list_visible_drills(&self, scope: &Scope) -> Result<Vec<Drill>> {
        let (filter, params) = visibility_filter(scope);
        let query = format!(
            "SELECT {} FROM drills WHERE {} ORDER BY name",
            DRILL_COLUMNS, filter
        );

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
            drill_from_row,
        )?;

        let mut drills = Vec::new();
        for row in rows {
            drills.push(row?);
        }
        Ok(drills)
    }

    pub fn archive_drill(&mut self, id: DrillId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("UPDATE drills SET is_archived = 1 WHERE id = ?", params![id])?;
        Ok(rows_affected > 0)
    }

    pub fn insert_drill_template(&mut self, template: &DrillTemplate) -> Result<()> {
        self.conn.execute(
            "INSERT INTO drill_templates (id, club_id, age_group_id, team_id, name, description,
                                          drill_ids, is_archived)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                template.id,
                template.scope.club_id,
                template.scope.age_group_id,
                template.scope.team_id,
                template.name,
                template.description,
                template.drill_ids,
                template.is_archived
            ],
        )?;
        Ok(())
    }

    pub fn update_drill_template(&mut self, template: &DrillTemplate) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE drill_templates SET name = ?, description = ?, drill_ids = ? WHERE id = ?",
            params![
                template.name,
                template.description,
                template.drill_ids,
                template.id
            ],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn get_drill_template(&self, id: DrillTemplateId) -> Result<Option<DrillTemplate>> {
        let template = self
            .conn
            .query_row(
                &format!("SELECT {} FROM drill_templates WHERE id = ?", TEMPLATE_COLUMNS),
                params![id],
                template_from_row,
            )
            .optional()?;
        Ok(template)
    }

    pub fn list_visible_drill_templates(&self, scope: &Scope) -> Result<Vec<DrillTemplate>> {
        let (filter, params) = visibility_filter(scope);
        let query = format!(
            "SELECT {} FROM drill_templates WHERE {} ORDER BY name",
            TEMPLATE_COLUMNS, filter
        );

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
            template_from_row,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn archive_drill_template(&mut self, id: DrillTemplateId) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE drill_templates SET is_archived = 1 WHERE id = ?",
            params![id],
        )?;
        Ok(rows_affected > 0)
    }
}

fn scope_from_row(row: &Row) -> rusqlite::Result<Scope> {
    Ok(Scope {
        club_id: row.get("club_id")?,
        age_group_id: row.get("age_group_id")?,
        team_id: row.get("team_id")?,
    })
}

fn drill_from_row(row: &Row) -> rusqlite::Result<Drill> {
    Ok(Drill {
        id: row.get("id")?,
        scope: scope_from_row(row)?,
        name: row.get("name")?,
        description: row.get("description")?,
        duration_minutes: row.get("duration_minutes")?,
        equipment: row.get("equipment")?,
        tags: row.get("tags")?,
        is_archived: row.get("is_archived")?,
    })
}

fn template_from_row(row: &Row) -> rusqlite::Result<DrillTemplate> {
    Ok(DrillTemplate {
        id: row.get("id")?,
        scope: scope_from_row(row)?,
        name: row.get("name")?,
        description: row.get("description")?,
        drill_ids: row.get("drill_ids")?,
        is_archived: row.get("is_archived")?,
    })
}
