//! User account queries

use super::{models::*, schema::ClubDatabase};
use crate::domain::UserId;
use crate::error::Result;
use rusqlite::{params, OptionalExtension, Row};

impl ClubDatabase {
    pub fn insert_user(&mut self, user: &User) -> Result<()> {
        self.conn.execute(
            "INSERT INTO users (id, email, display_name, role, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                user.id,
                user.email,
                user.display_name,
                user.role,
                user.created_at
            ],
        )?;
        Ok(())
    }

    pub fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, email, display_name, role, created_at FROM users WHERE id = ?",
                params![id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Case-insensitive lookup by email address
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, email, display_name, role, created_at
                 FROM users
                 WHERE lower(email) = lower(?)",
                params![email],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        display_name: row.get("display_name")?,
        role: row.get("role")?,
        created_at: row.get("created_at")?,
    })
}
