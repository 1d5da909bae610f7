//! Player, coach and team membership queries

use super::{models::*, schema::ClubDatabase};
use crate::domain::{ClubId, CoachId, PlayerId, TeamId};
use crate::error::Result;
use rusqlite::{params, OptionalExtension, Row, Transaction};

const PLAYER_COLUMNS: &str = "id, club_id, first_name, last_name, date_of_birth,
                              preferred_positions, medical_notes, is_archived";

const COACH_COLUMNS: &str = "id, club_id, first_name, last_name, email, phone, certifications,
                             is_archived";

impl ClubDatabase {
    /// Insert a player together with their emergency contacts
    pub fn insert_player(&mut self, player: &Player, contacts: &[EmergencyContact]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO players (id, club_id, first_name, last_name, date_of_birth,
                                  preferred_positions, medical_notes, is_archived)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                player.id,
                player.club_id,
                player.first_name,
                player.last_name,
                player.date_of_birth,
                player.preferred_positions,
                player.medical_notes,
                player.is_archived
            ],
        )?;
        insert_contacts(&tx, contacts)?;
        tx.commit()?;
        Ok(())
    }

    /// Replace a player's details and emergency contacts atomically.
    /// Returns false (and writes nothing) when the player does not exist.
    pub fn update_player(&mut self, player: &Player, contacts: &[EmergencyContact]) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let rows_affected = tx.execute(
            "UPDATE players
             SET first_name = ?, last_name = ?, date_of_birth = ?, preferred_positions = ?,
                 medical_notes = ?
             WHERE id = ?",
            params![
                player.first_name,
                player.last_name,
                player.date_of_birth,
                player.preferred_positions,
                player.medical_notes,
                player.id
            ],
        )?;
        if rows_affected == 0 {
            return Ok(false);
        }

        tx.execute(
            "DELETE FROM player_emergency_contacts WHERE player_id = ?",
            params![player.id],
        )?;
        insert_contacts(&tx, contacts)?;
        tx.commit()?;
        Ok(true)
    }

    pub fn get_player(&self, id: PlayerId) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                &format!("SELECT {} FROM players WHERE id = ?", PLAYER_COLUMNS),
                params![id],
                player_from_row,
            )
            .optional()?;
        Ok(player)
    }

    pub fn list_players_by_club(&self, club_id: ClubId) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM players
             WHERE club_id = ? AND is_archived = 0
             ORDER BY last_name, first_name",
            PLAYER_COLUMNS
        ))?;
        let rows = stmt.query_map(params![club_id], player_from_row)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    pub fn archive_player(&mut self, id: PlayerId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("UPDATE players SET is_archived = 1 WHERE id = ?", params![id])?;
        Ok(rows_affected > 0)
    }

    pub fn list_emergency_contacts(&self, player_id: PlayerId) -> Result<Vec<EmergencyContact>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, player_id, name, phone, relationship, is_primary
             FROM player_emergency_contacts
             WHERE player_id = ?
             ORDER BY is_primary DESC, name",
        )?;
        let rows = stmt.query_map(params![player_id], |row| {
            Ok(EmergencyContact {
                id: row.get("id")?,
                player_id: row.get("player_id")?,
                name: row.get("name")?,
                phone: row.get("phone")?,
                relationship: row.get("relationship")?,
                is_primary: row.get("is_primary")?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_membership(&self, team_id: TeamId, player_id: PlayerId) -> Result<Option<PlayerTeam>> {
        let membership = self
            .conn
            .query_row(
                "SELECT player_id, team_id, squad_number, joined_at
                 FROM player_teams
                 WHERE team_id = ? AND player_id = ?",
                params![team_id, player_id],
                |row| {
                    Ok(PlayerTeam {
                        player_id: row.get("player_id")?,
                        team_id: row.get("team_id")?,
                        squad_number: row.get("squad_number")?,
                        joined_at: row.get("joined_at")?,
                    })
                },
            )
            .optional()?;
        Ok(membership)
    }

    /// Player currently wearing `squad_number` in the team, if any
    pub fn find_squad_number_holder(&self, team_id: TeamId, squad_number: u32) -> Result<Option<PlayerId>> {
        let holder = self
            .conn
            .query_row(
                "SELECT pt.player_id
                 FROM player_teams pt
                 JOIN players p ON p.id = pt.player_id
                 WHERE pt.team_id = ? AND pt.squad_number = ? AND p.is_archived = 0",
                params![team_id, squad_number],
                |row| row.get(0),
            )
            .optional()?;
        Ok(holder)
    }

    pub fn insert_membership(&mut self, membership: &PlayerTeam) -> Result<()> {
        self.conn.execute(
            "INSERT INTO player_teams (player_id, team_id, squad_number, joined_at)
             VALUES (?, ?, ?, ?)",
            params![
                membership.player_id,
                membership.team_id,
                membership.squad_number,
                membership.joined_at
            ],
        )?;
        Ok(())
    }

    pub fn update_squad_number(
        &mut self,
        team_id: TeamId,
        player_id: PlayerId,
        squad_number: Option<u32>,
    ) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE player_teams SET squad_number = ? WHERE team_id = ? AND player_id = ?",
            params![squad_number, team_id, player_id],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn remove_membership(&mut self, team_id: TeamId, player_id: PlayerId) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM player_teams WHERE team_id = ? AND player_id = ?",
            params![team_id, player_id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Active players on a team; numbered players first, by number
    pub fn list_squad(&self, team_id: TeamId) -> Result<Vec<SquadMember>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, pt.team_id, p.first_name, p.last_name, p.date_of_birth,
                    p.preferred_positions, pt.squad_number
             FROM player_teams pt
             JOIN players p ON p.id = pt.player_id
             WHERE pt.team_id = ? AND p.is_archived = 0
             ORDER BY pt.squad_number IS NULL, pt.squad_number, p.last_name, p.first_name",
        )?;
        let rows = stmt.query_map(params![team_id], |row| {
            Ok(SquadMember {
                player_id: row.get(0)?,
                team_id: row.get(1)?,
                first_name: row.get(2)?,
                last_name: row.get(3)?,
                date_of_birth: row.get(4)?,
                preferred_positions: row.get(5)?,
                squad_number: row.get(6)?,
            })
        })?;

        let mut squad = Vec::new();
        for row in rows {
            squad.push(row?);
        }
        Ok(squad)
    }

    pub fn insert_coach(&mut self, coach: &Coach) -> Result<()> {
        self.conn.execute(
            "INSERT INTO coaches (id, club_id, first_name, last_name, email, phone,
                                  certifications, is_archived)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                coach.id,
                coach.club_id,
                coach.first_name,
                coach.last_name,
                coach.email,
                coach.phone,
                coach.certifications,
                coach.is_archived
            ],
        )?;
        Ok(())
    }

    pub fn update_coach(&mut self, coach: &Coach) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE coaches
             SET first_name = ?, last_name = ?, email = ?, phone = ?, certifications = ?
             WHERE id = ?",
            params![
                coach.first_name,
                coach.last_name,
                coach.email,
                coach.phone,
                coach.certifications,
                coach.id
            ],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn get_coach(&self, id: CoachId) -> Result<Option<Coach>> {
        let coach = self
            .conn
            .query_row(
                &format!("SELECT {} FROM coaches WHERE id = ?", COACH_COLUMNS),
                params![id],
                coach_from_row,
            )
            .optional()?;
        Ok(coach)
    }

    pub fn list_coaches_by_club(&self, club_id: ClubId) -> Result<Vec<Coach>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM coaches
             WHERE club_id = ? AND is_archived = 0
             ORDER BY last_name, first_name",
            COACH_COLUMNS
        ))?;
        let rows = stmt.query_map(params![club_id], coach_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn archive_coach(&mut self, id: CoachId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("UPDATE coaches SET is_archived = 1 WHERE id = ?", params![id])?;
        Ok(rows_affected > 0)
    }

    /// Assign a coach to a team, replacing the role of an existing assignment
    pub fn upsert_team_coach(&mut self, team_id: TeamId, coach_id: CoachId, role: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO team_coaches (team_id, coach_id, role) VALUES (?, ?, ?)
             ON CONFLICT (team_id, coach_id) DO UPDATE SET role = excluded.role",
            params![team_id, coach_id, role],
        )?;
        Ok(())
    }

    pub fn remove_team_coach(&mut self, team_id: TeamId, coach_id: CoachId) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM team_coaches WHERE team_id = ? AND coach_id = ?",
            params![team_id, coach_id],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn list_team_coaches(&self, team_id: TeamId) -> Result<Vec<TeamCoach>> {
        let mut stmt = self.conn.prepare(
            "SELECT tc.team_id, c.id, c.first_name, c.last_name, tc.role
             FROM team_coaches tc
             JOIN coaches c ON c.id = tc.coach_id
             WHERE tc.team_id = ? AND c.is_archived = 0
             ORDER BY tc.role, c.last_name",
        )?;
        let rows = stmt.query_map(params![team_id], |row| {
            Ok(TeamCoach {
                team_id: row.get(0)?,
                coach_id: row.get(1)?,
                first_name: row.get(2)?,
                last_name: row.get(3)?,
                role: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn insert_contacts(tx: &Transaction<'_>, contacts: &[EmergencyContact]) -> Result<()> {
    for contact in contacts {
        tx.execute(
            "INSERT INTO player_emergency_contacts (id, player_id, name, phone, relationship, is_primary)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                contact.id,
                contact.player_id,
                contact.name,
                contact.phone,
                contact.relationship,
                contact.is_primary
            ],
        )?;
    }
    Ok(())
}

fn player_from_row(row: &Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get("id")?,
        club_id: row.get("club_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        date_of_birth: row.get("date_of_birth")?,
        preferred_positions: row.get("preferred_positions")?,
        medical_notes: row.get("medical_notes")?,
        is_archived: row.get("is_archived")?,
    })
}

fn coach_from_row(row: &Row) -> rusqlite::Result<Coach> {
    Ok(Coach {
        id: row.get("id")?,
        club_id: row.get("club_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        certifications: row.get("certifications")?,
        is_archived: row.get("is_archived")?,
    })
}
