//! Database schema and connection management

use crate::error::{ClubError, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Database connection manager for club data
pub struct ClubDatabase {
    pub(crate) conn: Connection,
}

impl ClubDatabase {
    /// Open (or create) the database at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Create an in-memory database (tests and throwaway runs)
    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Default location of the database file
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| ClubError::Config {
            message: "Could not determine data directory".to_string(),
        })?;
        Ok(data_dir.join("club-manager").join("club.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS clubs (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                short_name TEXT,
                founded_year INTEGER,
                primary_color TEXT NOT NULL,
                secondary_color TEXT NOT NULL,
                is_archived INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS age_groups (
                id TEXT PRIMARY KEY,
                club_id TEXT NOT NULL REFERENCES clubs(id),
                name TEXT NOT NULL,
                code TEXT NOT NULL,
                seasons TEXT NOT NULL DEFAULT '[]',
                default_squad_size INTEGER NOT NULL,
                is_archived INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS teams (
                id TEXT PRIMARY KEY,
                club_id TEXT NOT NULL REFERENCES clubs(id),
                age_group_id TEXT NOT NULL REFERENCES age_groups(id),
                name TEXT NOT NULL,
                level TEXT NOT NULL,
                season TEXT NOT NULL,
                primary_color TEXT NOT NULL,
                secondary_color TEXT,
                is_archived INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS players (
                id TEXT PRIMARY KEY,
                club_id TEXT NOT NULL REFERENCES clubs(id),
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                date_of_birth TEXT NOT NULL,
                preferred_positions TEXT NOT NULL DEFAULT '[]',
                medical_notes TEXT,
                is_archived INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS player_emergency_contacts (
                id TEXT PRIMARY KEY,
                player_id TEXT NOT NULL REFERENCES players(id),
                name TEXT NOT NULL,
                phone TEXT NOT NULL,
                relationship TEXT NOT NULL,
                is_primary INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS player_teams (
                player_id TEXT NOT NULL REFERENCES players(id),
                team_id TEXT NOT NULL REFERENCES teams(id),
                squad_number INTEGER,
                joined_at TEXT NOT NULL,
                PRIMARY KEY (player_id, team_id)
            );

            CREATE TABLE IF NOT EXISTS coaches (
                id TEXT PRIMARY KEY,
                club_id TEXT NOT NULL REFERENCES clubs(id),
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                certifications TEXT NOT NULL DEFAULT '',
                is_archived INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS team_coaches (
                team_id TEXT NOT NULL REFERENCES teams(id),
                coach_id TEXT NOT NULL REFERENCES coaches(id),
                role INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (team_id, coach_id)
            );

            CREATE TABLE IF NOT EXISTS matches (
                id TEXT PRIMARY KEY,
                team_id TEXT NOT NULL REFERENCES teams(id),
                opposition TEXT NOT NULL,
                kick_off TEXT NOT NULL,
                venue TEXT,
                is_home INTEGER NOT NULL,
                status INTEGER NOT NULL DEFAULT 0,
                goals_for INTEGER,
                goals_against INTEGER,
                notes TEXT
            );

            CREATE TABLE IF NOT EXISTS kits (
                id TEXT PRIMARY KEY,
                club_id TEXT NOT NULL REFERENCES clubs(id),
                team_id TEXT REFERENCES teams(id),
                name TEXT NOT NULL,
                kit_type INTEGER NOT NULL DEFAULT 0,
                shirt_color TEXT NOT NULL,
                shorts_color TEXT NOT NULL,
                socks_color TEXT NOT NULL,
                season TEXT
            );

            CREATE TABLE IF NOT EXISTS drills (
                id TEXT PRIMARY KEY,
                club_id TEXT NOT NULL REFERENCES clubs(id),
                age_group_id TEXT REFERENCES age_groups(id),
                team_id TEXT REFERENCES teams(id),
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                equipment TEXT NOT NULL DEFAULT '[]',
                tags TEXT NOT NULL DEFAULT '',
                is_archived INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS drill_templates (
                id TEXT PRIMARY KEY,
                club_id TEXT NOT NULL REFERENCES clubs(id),
                age_group_id TEXT REFERENCES age_groups(id),
                team_id TEXT REFERENCES teams(id),
                name TEXT NOT NULL,
                description TEXT,
                drill_ids TEXT NOT NULL DEFAULT '[]',
                is_archived INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS development_plans (
                id TEXT PRIMARY KEY,
                player_id TEXT NOT NULL REFERENCES players(id),
                title TEXT NOT NULL,
                period_start TEXT NOT NULL,
                period_end TEXT,
                coach_notes TEXT,
                is_archived INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS development_goals (
                id TEXT PRIMARY KEY,
                plan_id TEXT NOT NULL REFERENCES development_plans(id),
                position INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                target_date TEXT,
                progress INTEGER NOT NULL DEFAULT 0,
                completed INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS reports (
                id TEXT PRIMARY KEY,
                player_id TEXT NOT NULL REFERENCES players(id),
                coach_id TEXT REFERENCES coaches(id),
                period_start TEXT NOT NULL,
                period_end TEXT NOT NULL,
                overall_rating REAL NOT NULL,
                strengths TEXT NOT NULL DEFAULT '',
                areas_for_improvement TEXT NOT NULL DEFAULT '',
                coach_comments TEXT,
                is_archived INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS report_development_actions (
                report_id TEXT NOT NULL REFERENCES reports(id),
                position INTEGER NOT NULL,
                goal TEXT NOT NULL,
                actions TEXT NOT NULL DEFAULT '',
                target_date TEXT,
                completed INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (report_id, position)
            );

            CREATE TABLE IF NOT EXISTS report_similar_professionals (
                report_id TEXT NOT NULL REFERENCES reports(id),
                position INTEGER NOT NULL,
                name TEXT NOT NULL,
                team TEXT NOT NULL,
                playing_position TEXT NOT NULL,
                reason TEXT NOT NULL,
                PRIMARY KEY (report_id, position)
            );

            CREATE TABLE IF NOT EXISTS attribute_evaluations (
                id TEXT PRIMARY KEY,
                player_id TEXT NOT NULL REFERENCES players(id),
                coach_id TEXT REFERENCES coaches(id),
                evaluated_at TEXT NOT NULL,
                overall_rating INTEGER,
                notes TEXT
            );

            CREATE TABLE IF NOT EXISTS evaluation_attributes (
                evaluation_id TEXT NOT NULL REFERENCES attribute_evaluations(id),
                attribute_name TEXT NOT NULL,
                rating INTEGER NOT NULL,
                notes TEXT,
                PRIMARY KEY (evaluation_id, attribute_name)
            );

            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                display_name TEXT NOT NULL,
                role INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_teams_age_group ON teams(age_group_id);
            CREATE INDEX IF NOT EXISTS idx_player_teams_team ON player_teams(team_id);
            CREATE INDEX IF NOT EXISTS idx_matches_team_kick_off ON matches(team_id, kick_off);
            CREATE INDEX IF NOT EXISTS idx_drills_club ON drills(club_id);
            CREATE INDEX IF NOT EXISTS idx_evaluation_attributes_evaluation
                ON evaluation_attributes(evaluation_id);",
        )?;

        Ok(())
    }
}
