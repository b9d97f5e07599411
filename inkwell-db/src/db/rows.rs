// Column decoding shared by the repositories

use chrono::{DateTime, Utc};
use inkwell_types::{Category, Post, Role, User, UserPreference};
use rusqlite::types::Type;
use rusqlite::Row;
use uuid::Uuid;

/// Column list matching `user_from_row`
pub const USER_COLUMNS: &str = "id, name, email, age, role";

/// Column list matching `post_from_row`
pub const POST_COLUMNS: &str = "id, title, average_rating, author_id, created_at, updated_at";

fn conversion_error(idx: usize, err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_error(idx, e))
}

pub fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    raw.parse::<DateTime<Utc>>()
        .map_err(|e| conversion_error(idx, e))
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role {0:?}")]
struct UnknownRole(String);

pub fn role_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Role> {
    let raw: String = row.get(idx)?;
    Role::parse(&raw).ok_or_else(|| conversion_error(idx, UnknownRole(raw)))
}

/// Decode a user starting at column `offset`
pub fn user_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<User> {
    Ok(User {
        id: uuid_at(row, offset)?,
        name: row.get(offset + 1)?,
        email: row.get(offset + 2)?,
        age: row.get(offset + 3)?,
        role: role_at(row, offset + 4)?,
    })
}

pub fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    user_at(row, 0)
}

/// Decode a preference starting at column `offset`
pub fn preference_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<UserPreference> {
    Ok(UserPreference {
        id: uuid_at(row, offset)?,
        email_updates: row.get(offset + 1)?,
        user_id: uuid_at(row, offset + 2)?,
    })
}

pub fn preference_from_row(row: &Row<'_>) -> rusqlite::Result<UserPreference> {
    preference_at(row, 0)
}

pub fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: uuid_at(row, 0)?,
        title: row.get(1)?,
        average_rating: row.get(2)?,
        author_id: uuid_at(row, 3)?,
        created_at: timestamp_at(row, 4)?,
        updated_at: timestamp_at(row, 5)?,
    })
}

pub fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: uuid_at(row, 0)?,
        name: row.get(1)?,
    })
}
