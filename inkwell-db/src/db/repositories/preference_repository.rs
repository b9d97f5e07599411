use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use inkwell_types::{BatchPayload, UserPreference};

use crate::db::rows::preference_from_row;
use crate::db::DbPool;
use crate::error::DbResult;

pub struct PreferenceRepository {
    pool: DbPool,
}

impl PreferenceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create the preference row for an existing user
    pub fn create(&self, user_id: &Uuid, email_updates: bool) -> DbResult<UserPreference> {
        let conn = self.pool.get()?;
        Self::insert(&conn, user_id, email_updates)
    }

    pub(crate) fn insert(
        conn: &rusqlite::Connection,
        user_id: &Uuid,
        email_updates: bool,
    ) -> DbResult<UserPreference> {
        let preference = UserPreference {
            id: Uuid::new_v4(),
            email_updates,
            user_id: *user_id,
        };
        conn.execute(
            "INSERT INTO user_preferences (id, email_updates, user_id) VALUES (?, ?, ?)",
            params![
                preference.id.to_string(),
                preference.email_updates,
                preference.user_id.to_string(),
            ],
        )?;
        Ok(preference)
    }

    pub fn find_by_user(&self, user_id: &Uuid) -> DbResult<Option<UserPreference>> {
        let conn = self.pool.get()?;
        let preference = conn
            .query_row(
                "SELECT id, email_updates, user_id FROM user_preferences WHERE user_id = ?",
                [user_id.to_string()],
                preference_from_row,
            )
            .optional()?;
        Ok(preference)
    }

    pub fn count(&self) -> DbResult<usize> {
        let conn = self.pool.get()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM user_preferences", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn delete_many(&self) -> DbResult<BatchPayload> {
        let conn = self.pool.get()?;
        let count = conn.execute("DELETE FROM user_preferences", [])?;
        Ok(BatchPayload::new(count))
    }
}
