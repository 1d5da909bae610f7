//! Aggregate statistics computed from match and membership rows
//!
//! Nothing here is cached or stored; every figure is recomputed from the
//! underlying rows on each call.

use super::{models::*, schema::ClubDatabase};
use crate::domain::{ClubId, MatchOutcome, MatchStatus, TeamId};
use crate::error::Result;
use rusqlite::params;

/// Head counts for a club's active records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClubCounts {
    pub age_groups: u32,
    pub teams: u32,
    pub players: u32,
    pub coaches: u32,
}

impl ClubDatabase {
    /// Tally results of a team's completed matches that have a score
    pub fn team_match_tally(&self, team_id: TeamId) -> Result<MatchTally> {
        let mut stmt = self.conn.prepare(
            "SELECT goals_for, goals_against
             FROM matches
             WHERE team_id = ? AND status = ?
               AND goals_for IS NOT NULL AND goals_against IS NOT NULL",
        )?;
        let rows = stmt.query_map(
            params![team_id, MatchStatus::Completed.code()],
            |row| Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?)),
        )?;

        let mut tally = MatchTally::default();
        for row in rows {
            let (goals_for, goals_against) = row?;
            tally.record(goals_for, goals_against);
        }
        Ok(tally)
    }

    /// Outcomes of the most recent completed matches, newest first
    pub fn recent_form(&self, team_id: TeamId, limit: u32) -> Result<Vec<MatchOutcome>> {
        let mut stmt = self.conn.prepare(
            "SELECT goals_for, goals_against
             FROM matches
             WHERE team_id = ? AND status = ?
               AND goals_for IS NOT NULL AND goals_against IS NOT NULL
             ORDER BY kick_off DESC
             LIMIT ?",
        )?;
        let rows = stmt.query_map(
            params![team_id, MatchStatus::Completed.code(), limit],
            |row| {
                Ok(MatchOutcome::from_score(
                    row.get::<_, u32>(0)?,
                    row.get::<_, u32>(1)?,
                ))
            },
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn count_upcoming_matches(&self, team_id: TeamId) -> Result<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM matches WHERE team_id = ? AND status = ?",
            params![team_id, MatchStatus::Scheduled.code()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Active players on the team
    pub fn count_squad(&self, team_id: TeamId) -> Result<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*)
             FROM player_teams pt
             JOIN players p ON p.id = pt.player_id
             WHERE pt.team_id = ? AND p.is_archived = 0",
            params![team_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn count_team_coaches(&self, team_id: TeamId) -> Result<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*)
             FROM team_coaches tc
             JOIN coaches c ON c.id = tc.coach_id
             WHERE tc.team_id = ? AND c.is_archived = 0",
            params![team_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn club_counts(&self, club_id: ClubId) -> Result<ClubCounts> {
        let counts = self.conn.query_row(
            "SELECT
                (SELECT COUNT(*) FROM age_groups WHERE club_id = ?1 AND is_archived = 0),
                (SELECT COUNT(*) FROM teams WHERE club_id = ?1 AND is_archived = 0),
                (SELECT COUNT(*) FROM players WHERE club_id = ?1 AND is_archived = 0),
                (SELECT COUNT(*) FROM coaches WHERE club_id = ?1 AND is_archived = 0)",
            params![club_id],
            |row| {
                Ok(ClubCounts {
                    age_groups: row.get(0)?,
                    teams: row.get(1)?,
                    players: row.get(2)?,
                    coaches: row.get(3)?,
                })
            },
        )?;
        Ok(counts)
    }
}
