//! Numeric enum codes stored in the database and their wire labels.
//!
//! Rows keep the integer code. Mapping back is total: a code outside the
//! table resolves to the first variant rather than failing the request.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $first:ident = $first_code:literal => $first_label:literal
            $(, $variant:ident = $code:literal => $label:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $first,
            $($variant,)*
        }

        impl $name {
            /// Map a stored code to its variant; unknown codes fall back to
            #[doc = concat!("`", stringify!($first), "`.")]
            pub fn from_code(code: i64) -> Self {
                match code {
                    $first_code => $name::$first,
                    $($code => $name::$variant,)*
                    _ => $name::$first,
                }
            }

            pub fn code(self) -> i64 {
                match self {
                    $name::$first => $first_code,
                    $($name::$variant => $code,)*
                }
            }

            /// Lower-case label used on the wire.
            pub fn label(self) -> &'static str {
                match self {
                    $name::$first => $first_label,
                    $($name::$variant => $label,)*
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                let label = label.trim().to_ascii_lowercase();
                match label.as_str() {
                    $first_label => Some($name::$first),
                    $($label => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$first
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

coded_enum!(
    /// Kit variants a club can register.
    KitType {
        Home = 0 => "home",
        Away = 1 => "away",
        Third = 2 => "third",
        Goalkeeper = 3 => "goalkeeper",
        Training = 4 => "training",
    }
);

coded_enum!(
    /// Role of a coach within a team.
    CoachRole {
        Head = 0 => "head",
        Assistant = 1 => "assistant",
        Goalkeeper = 2 => "goalkeeper",
        Fitness = 3 => "fitness",
        Technical = 4 => "technical",
    }
);

coded_enum!(
    MatchStatus {
        Scheduled = 0 => "scheduled",
        Completed = 1 => "completed",
        Postponed = 2 => "postponed",
        Cancelled = 3 => "cancelled",
    }
);

coded_enum!(
    /// Caller and user role. Ordered by privilege.
    Role {
        Member = 0 => "member",
        Coach = 1 => "coach",
        Admin = 2 => "admin",
    }
);

/// Level at which a drill or template is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeLevel {
    Club,
    AgeGroup,
    Team,
}

impl fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeLevel::Club => write!(f, "club"),
            ScopeLevel::AgeGroup => write!(f, "agegroup"),
            ScopeLevel::Team => write!(f, "team"),
        }
    }
}

/// Result of a completed match from the team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl MatchOutcome {
    pub fn from_score(goals_for: u32, goals_against: u32) -> Self {
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
        }
    }
}
