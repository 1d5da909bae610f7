//! Identifier types for club entities.

use crate::error::{ClubError, Result};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// Fresh random (v4) identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ClubError;

            fn from_str(s: &str) -> Result<Self> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| ClubError::InvalidId {
                        value: s.to_string(),
                    })
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0.to_string()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let text = value.as_str()?;
                Uuid::parse_str(text)
                    .map(Self)
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

entity_id!(
    /// Type-safe wrapper for Club IDs.
    ///
    /// ```rust
    /// use club_manager::ClubId;
    ///
    /// let id: ClubId = "1b4e28ba-2fa1-11d2-883f-0016d3cca427".parse().unwrap();
    /// assert_eq!(id.to_string(), "1b4e28ba-2fa1-11d2-883f-0016d3cca427");
    /// ```
    ClubId
);
entity_id!(AgeGroupId);
entity_id!(TeamId);
entity_id!(PlayerId);
entity_id!(EmergencyContactId);
entity_id!(CoachId);
entity_id!(MatchId);
entity_id!(KitId);
entity_id!(DrillId);
entity_id!(DrillTemplateId);
entity_id!(DevelopmentPlanId);
entity_id!(GoalId);
entity_id!(ReportId);
entity_id!(EvaluationId);
entity_id!(UserId);
