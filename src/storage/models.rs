//! Data models for the storage layer
//!
//! These mirror table rows. Enum columns stay as integer codes and list
//! columns stay as their raw text; translation happens when a row is mapped
//! to a response DTO.

use crate::domain::*;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub short_name: Option<String>,
    pub founded_year: Option<i32>,
    pub primary_color: String,
    pub secondary_color: String,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgeGroup {
    pub id: AgeGroupId,
    pub club_id: ClubId,
    pub name: String,
    pub code: String,
    /// JSON array of season labels
    pub seasons: String,
    pub default_squad_size: u32,
    pub is_archived: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub club_id: ClubId,
    pub age_group_id: AgeGroupId,
    pub name: String,
    pub level: String,
    pub season: String,
    pub primary_color: String,
    pub secondary_color: Option<String>,
    pub is_archived: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub club_id: ClubId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    /// JSON array of position codes
    pub preferred_positions: String,
    pub medical_notes: Option<String>,
    pub is_archived: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyContact {
    pub id: EmergencyContactId,
    pub player_id: PlayerId,
    pub name: String,
    pub phone: String,
    pub relationship: String,
    pub is_primary: bool,
}

/// A player's membership of a team
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTeam {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub squad_number: Option<u32>,
    pub joined_at: DateTime<Utc>,
}

/// Team membership joined with the player's details
#[derive(Debug, Clone, PartialEq)]
pub struct SquadMember {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub preferred_positions: String,
    pub squad_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coach {
    pub id: CoachId,
    pub club_id: ClubId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Comma-separated certification names
    pub certifications: String,
    pub is_archived: bool,
}

/// Coach assignment joined with the coach's details
#[derive(Debug, Clone, PartialEq)]
pub struct TeamCoach {
    pub team_id: TeamId,
    pub coach_id: CoachId,
    pub first_name: String,
    pub last_name: String,
    pub role: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: MatchId,
    pub team_id: TeamId,
    pub opposition: String,
    pub kick_off: DateTime<Utc>,
    pub venue: Option<String>,
    pub is_home: bool,
    pub status: i64,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Kit {
    pub id: KitId,
    pub club_id: ClubId,
    pub team_id: Option<TeamId>,
    pub name: String,
    pub kit_type: i64,
    pub shirt_color: String,
    pub shorts_color: String,
    pub socks_color: String,
    pub season: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drill {
    pub id: DrillId,
    pub scope: Scope,
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    /// JSON array of equipment names
    pub equipment: String,
    /// Comma-separated tags
    pub tags: String,
    pub is_archived: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrillTemplate {
    pub id: DrillTemplateId,
    pub scope: Scope,
    pub name: String,
    pub description: Option<String>,
    /// JSON array of drill ids, in session order
    pub drill_ids: String,
    pub is_archived: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DevelopmentPlan {
    pub id: DevelopmentPlanId,
    pub player_id: PlayerId,
    pub title: String,
    pub period_start: NaiveDate,
    pub period_end: Option<NaiveDate>,
    pub coach_notes: Option<String>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DevelopmentGoal {
    pub id: GoalId,
    pub plan_id: DevelopmentPlanId,
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub progress: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: ReportId,
    pub player_id: PlayerId,
    pub coach_id: Option<CoachId>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub overall_rating: f64,
    /// Comma-separated
    pub strengths: String,
    /// Comma-separated
    pub areas_for_improvement: String,
    pub coach_comments: Option<String>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DevelopmentAction {
    pub goal: String,
    /// Comma-separated action steps
    pub actions: String,
    pub target_date: Option<NaiveDate>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarProfessional {
    pub name: String,
    pub team: String,
    pub position: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub player_id: PlayerId,
    pub coach_id: Option<CoachId>,
    pub evaluated_at: DateTime<Utc>,
    pub overall_rating: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationAttribute {
    pub name: String,
    pub rating: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: i64,
    pub created_at: DateTime<Utc>,
}

/// Win/draw/loss tally over completed matches
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchTally {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl MatchTally {
    pub fn record(&mut self, goals_for: u32, goals_against: u32) {
        self.played += 1;
        self.goals_for += goals_for;
        self.goals_against += goals_against;
        match MatchOutcome::from_score(goals_for, goals_against) {
            MatchOutcome::Win => self.wins += 1,
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::Loss => self.losses += 1,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Wins as a percentage of matches played; 0 when nothing was played.
    pub fn win_rate(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            crate::util::round1(f64::from(self.wins) * 100.0 / f64::from(self.played))
        }
    }

    pub fn merge(&mut self, other: &MatchTally) {
        self.played += other.played;
        self.wins += other.wins;
        self.draws += other.draws;
        self.losses += other.losses;
        self.goals_for += other.goals_for;
        self.goals_against += other.goals_against;
    }
}
