//! Club, age group and team queries

use super::{models::*, schema::ClubDatabase};
use crate::domain::{AgeGroupId, ClubId, TeamId};
use crate::error::Result;
use rusqlite::{params, OptionalExtension, Row};

const CLUB_COLUMNS: &str = "id, name, short_name, founded_year, primary_color, secondary_color,
                            is_archived, created_at";

const AGE_GROUP_COLUMNS: &str = "id, club_id, name, code, seasons, default_squad_size, is_archived";

const TEAM_COLUMNS: &str = "id, club_id, age_group_id, name, level, season, primary_color,
                            secondary_color, is_archived";

impl ClubDatabase {
    pub fn insert_club(&mut self, club: &Club) -> Result<()> {
        self.conn.execute(
            "INSERT INTO clubs (id, name, short_name, founded_year, primary_color,
                                secondary_color, is_archived, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                club.id,
                club.name,
                club.short_name,
                club.founded_year,
                club.primary_color,
                club.secondary_color,
                club.is_archived,
                club.created_at
            ],
        )?;
        Ok(())
    }

    /// Replace a club's editable fields. Returns false when no row matched.
    pub fn update_club(&mut self, club: &Club) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE clubs
             SET name = ?, short_name = ?, founded_year = ?, primary_color = ?, secondary_color = ?
             WHERE id = ?",
            params![
                club.name,
                club.short_name,
                club.founded_year,
                club.primary_color,
                club.secondary_color,
                club.id
            ],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn get_club(&self, id: ClubId) -> Result<Option<Club>> {
        let club = self
            .conn
            .query_row(
                &format!("SELECT {} FROM clubs WHERE id = ?", CLUB_COLUMNS),
                params![id],
                club_from_row,
            )
            .optional()?;
        Ok(club)
    }

    /// All clubs that are not archived, by name
    pub fn list_active_clubs(&self) -> Result<Vec<Club>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM clubs WHERE is_archived = 0 ORDER BY name",
            CLUB_COLUMNS
        ))?;
        let rows = stmt.query_map([], club_from_row)?;

        let mut clubs = Vec::new();
        for row in rows {
            clubs.push(row?);
        }
        Ok(clubs)
    }

    pub fn archive_club(&mut self, id: ClubId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("UPDATE clubs SET is_archived = 1 WHERE id = ?", params![id])?;
        Ok(rows_affected > 0)
    }

    pub fn insert_age_group(&mut self, age_group: &AgeGroup) -> Result<()> {
        self.conn.execute(
            "INSERT INTO age_groups (id, club_id, name, code, seasons, default_squad_size, is_archived)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                age_group.id,
                age_group.club_id,
                age_group.name,
                age_group.code,
                age_group.seasons,
                age_group.default_squad_size,
                age_group.is_archived
            ],
        )?;
        Ok(())
    }

    pub fn update_age_group(&mut self, age_group: &AgeGroup) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE age_groups
             SET name = ?, code = ?, seasons = ?, default_squad_size = ?
             WHERE id = ?",
            params![
                age_group.name,
                age_group.code,
                age_group.seasons,
                age_group.default_squad_size,
                age_group.id
            ],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn get_age_group(&self, id: AgeGroupId) -> Result<Option<AgeGroup>> {
        let age_group = self
            .conn
            .query_row(
                &format!("SELECT {} FROM age_groups WHERE id = ?", AGE_GROUP_COLUMNS),
                params![id],
                age_group_from_row,
            )
            .optional()?;
        Ok(age_group)
    }

    pub fn list_age_groups_by_club(&self, club_id: ClubId) -> Result<Vec<AgeGroup>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM age_groups
             WHERE club_id = ? AND is_archived = 0
             ORDER BY code, name",
            AGE_GROUP_COLUMNS
        ))?;
        let rows = stmt.query_map(params![club_id], age_group_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn archive_age_group(&mut self, id: AgeGroupId) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE age_groups SET is_archived = 1 WHERE id = ?",
            params![id],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn insert_team(&mut self, team: &Team) -> Result<()> {
        self.conn.execute(
            "INSERT INTO teams (id, club_id, age_group_id, name, level, season, primary_color,
                                secondary_color, is_archived)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                team.id,
                team.club_id,
                team.age_group_id,
                team.name,
                team.level,
                team.season,
                team.primary_color,
                team.secondary_color,
                team.is_archived
            ],
        )?;
        Ok(())
    }

    pub fn update_team(&mut self, team: &Team) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE teams
             SET name = ?, level = ?, season = ?, primary_color = ?, secondary_color = ?
             WHERE id = ?",
            params![
                team.name,
                team.level,
                team.season,
                team.primary_color,
                team.secondary_color,
                team.id
            ],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn get_team(&self, id: TeamId) -> Result<Option<Team>> {
        let team = self
            .conn
            .query_row(
                &format!("SELECT {} FROM teams WHERE id = ?", TEAM_COLUMNS),
                params![id],
                team_from_row,
            )
            .optional()?;
        Ok(team)
    }

    pub fn list_teams_by_age_group(&self, age_group_id: AgeGroupId) -> Result<Vec<Team>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM teams WHERE age_group_id = ? AND is_archived = 0 ORDER BY name",
            TEAM_COLUMNS
        ))?;
        let rows = stmt.query_map(params![age_group_id], team_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn list_teams_by_club(&self, club_id: ClubId) -> Result<Vec<Team>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM teams WHERE club_id = ? AND is_archived = 0 ORDER BY name",
            TEAM_COLUMNS
        ))?;
        let rows = stmt.query_map(params![club_id], team_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn archive_team(&mut self, id: TeamId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("UPDATE teams SET is_archived = 1 WHERE id = ?", params![id])?;
        Ok(rows_affected > 0)
    }
}

fn club_from_row(row: &Row) -> rusqlite::Result<Club> {
    Ok(Club {
        id: row.get("id")?,
        name: row.get("name")?,
        short_name: row.get("short_name")?,
        founded_year: row.get("founded_year")?,
        primary_color: row.get("primary_color")?,
        secondary_color: row.get("secondary_color")?,
        is_archived: row.get("is_archived")?,
        created_at: row.get("created_at")?,
    })
}

fn age_group_from_row(row: &Row) -> rusqlite::Result<AgeGroup> {
    Ok(AgeGroup {
        id: row.get("id")?,
        club_id: row.get("club_id")?,
        name: row.get("name")?,
        code: row.get("code")?,
        seasons: row.get("seasons")?,
        default_squad_size: row.get("default_squad_size")?,
        is_archived: row.get("is_archived")?,
    })
}

pub(crate) fn team_from_row(row: &Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get("id")?,
        club_id: row.get("club_id")?,
        age_group_id: row.get("age_group_id")?,
        name: row.get("name")?,
        level: row.get("level")?,
        season: row.get("season")?,
        primary_color: row.get("primary_color")?,
        secondary_color: row.get("secondary_color")?,
        is_archived: row.get("is_archived")?,
    })
}
