//! Match and kit queries

use super::{models::*, schema::ClubDatabase};
use crate::domain::{ClubId, KitId, MatchId, TeamId};
use crate::error::Result;
use rusqlite::{params, OptionalExtension, Row};

const MATCH_COLUMNS: &str = "id, team_id, opposition, kick_off, venue, is_home, status, goals_for,
                             goals_against, notes";

const KIT_COLUMNS: &str = "id, club_id, team_id, name, kit_type, shirt_color, shorts_color,
                           socks_color, season";

impl ClubDatabase {
    pub fn insert_match(&mut self, fixture: &Match) -> Result<()> {
        self.conn.execute(
            "INSERT INTO matches (id, team_id, opposition, kick_off, venue, is_home, status,
                                  goals_for, goals_against, notes)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                fixture.id,
                fixture.team_id,
                fixture.opposition,
                fixture.kick_off,
                fixture.venue,
                fixture.is_home,
                fixture.status,
                fixture.goals_for,
                fixture.goals_against,
                fixture.notes
            ],
        )?;
        Ok(())
    }

    pub fn update_match(&mut self, fixture: &Match) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE matches
             SET opposition = ?, kick_off = ?, venue = ?, is_home = ?, status = ?,
                 goals_for = ?, goals_against = ?, notes = ?
             WHERE id = ?",
            params![
                fixture.opposition,
                fixture.kick_off,
                fixture.venue,
                fixture.is_home,
                fixture.status,
                fixture.goals_for,
                fixture.goals_against,
                fixture.notes,
                fixture.id
            ],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn get_match(&self, id: MatchId) -> Result<Option<Match>> {
        let fixture = self
            .conn
            .query_row(
                &format!("SELECT {} FROM matches WHERE id = ?", MATCH_COLUMNS),
                params![id],
                match_from_row,
            )
            .optional()?;
        Ok(fixture)
    }

    /// Matches for a team in kick-off order
    pub fn list_matches_by_team(&self, team_id: TeamId) -> Result<Vec<Match>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM matches WHERE team_id = ? ORDER BY kick_off",
            MATCH_COLUMNS
        ))?;
        let rows = stmt.query_map(params![team_id], match_from_row)?;

        let mut matches = Vec::new();
        for row in rows {
            matches.push(row?);
        }
        Ok(matches)
    }

    pub fn insert_kit(&mut self, kit: &Kit) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kits (id, club_id, team_id, name, kit_type, shirt_color, shorts_color,
                               socks_color, season)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                kit.id,
                kit.club_id,
                kit.team_id,
                kit.name,
                kit.kit_type,
                kit.shirt_color,
                kit.shorts_color,
                kit.socks_color,
                kit.season
            ],
        )?;
        Ok(())
    }

    pub fn update_kit(&mut self, kit: &Kit) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE kits
             SET team_id = ?, name = ?, kit_type = ?, shirt_color = ?, shorts_color = ?,
                 socks_color = ?, season = ?
             WHERE id = ?",
            params![
                kit.team_id,
                kit.name,
                kit.kit_type,
                kit.shirt_color,
                kit.shorts_color,
                kit.socks_color,
                kit.season,
                kit.id
            ],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn get_kit(&self, id: KitId) -> Result<Option<Kit>> {
        let kit = self
            .conn
            .query_row(
                &format!("SELECT {} FROM kits WHERE id = ?", KIT_COLUMNS),
                params![id],
                kit_from_row,
            )
            .optional()?;
        Ok(kit)
    }

    /// Kits for a club, optionally narrowed to one team's kits plus the
    /// club-wide ones
    pub fn list_kits(&self, club_id: ClubId, team_id: Option<TeamId>) -> Result<Vec<Kit>> {
        let mut query = format!("SELECT {} FROM kits WHERE club_id = ?", KIT_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(club_id)];

        if let Some(team_id) = team_id {
            query.push_str(" AND (team_id IS NULL OR team_id = ?)");
            params.push(Box::new(team_id));
        }

        query.push_str(" ORDER BY kit_type, name");

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
            kit_from_row,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn delete_kit(&mut self, id: KitId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM kits WHERE id = ?", params![id])?;
        Ok(rows_affected > 0)
    }
}

fn match_from_row(row: &Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get("id")?,
        team_id: row.get("team_id")?,
        opposition: row.get("opposition")?,
        kick_off: row.get("kick_off")?,
        venue: row.get("venue")?,
        is_home: row.get("is_home")?,
        status: row.get("status")?,
        goals_for: row.get("goals_for")?,
        goals_against: row.get("goals_against")?,
        notes: row.get("notes")?,
    })
}

fn kit_from_row(row: &Row) -> rusqlite::Result<Kit> {
    Ok(Kit {
        id: row.get("id")?,
        club_id: row.get("club_id")?,
        team_id: row.get("team_id")?,
        name: row.get("name")?,
        kit_type: row.get("kit_type")?,
        shirt_color: row.get("shirt_color")?,
        shorts_color: row.get("shorts_color")?,
        socks_color: row.get("socks_color")?,
        season: row.get("season")?,
    })
}
