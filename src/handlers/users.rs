//! User accounts

use crate::domain::{Role, UserId};
use crate::error::{ClubError, Result};
use crate::mediator::{Caller, Request};
use crate::storage::{ClubDatabase, User};
use crate::validation::{ValidationErrors, Validator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub role: Role,
}

impl Request for CreateUser {
    type Response = UserDto;
    const NAME: &'static str = "CreateUser";

    fn authorize(&self, caller: &Caller) -> Result<()> {
        caller.require(Role::Admin)
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .email("email", self.email.trim())
            .required("displayName", &self.display_name)
            .length("displayName", &self.display_name, 2, 100)
            .finish()
    }

    fn handle(self, db: &mut ClubDatabase) -> Result<UserDto> {
        let email = self.email.trim().to_lowercase();
        if db.find_user_by_email(&email)?.is_some() {
            return Err(ClubError::failure(format!(
                "A user with email {} already exists",
                email
            )));
        }

        let user = User {
            id: UserId::generate(),
            email,
            display_name: self.display_name.trim().to_string(),
            role: self.role.code(),
            created_at: crate::util::now(),
        };
        db.insert_user(&user)?;
        tracing::info!(user_id = %user.id, role = %self.role, "user created");
        Ok(user.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: Role::from_code(user.role),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetUserById {
    pub user_id: UserId,
}

impl Request for GetUserById {
    type Response = UserDto;
    const NAME: &'static str = "GetUserById";

    fn handle(self, db: &mut ClubDatabase) -> Result<UserDto> {
        db.get_user(self.user_id)?
            .map(UserDto::from)
            .ok_or_else(|| ClubError::not_found("User", self.user_id))
    }
}
