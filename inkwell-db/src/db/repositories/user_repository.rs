use rusqlite::{params, params_from_iter, OptionalExtension};
use uuid::Uuid;

use inkwell_types::{
    BatchPayload, FindOptions, NewUser, User, UserFilter, UserUpdate, UserWithPreference,
};

use super::PreferenceRepository;
use crate::db::query::{self, optional_where, select_users, set_clause};
use crate::db::rows::{preference_at, user_at, user_from_row, USER_COLUMNS};
use crate::db::DbPool;
use crate::error::{DbError, DbResult};

const ENTITY: &str = "User";

pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a single user and return it with its generated id
    pub fn create(&self, new_user: &NewUser) -> DbResult<User> {
        let conn = self.pool.get()?;
        Self::insert(&conn, new_user)
    }

    pub(crate) fn insert(conn: &rusqlite::Connection, new_user: &NewUser) -> DbResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            age: new_user.age,
            role: new_user.role,
        };
        conn.execute(
            "INSERT INTO users (id, name, email, age, role) VALUES (?, ?, ?, ?, ?)",
            params![
                user.id.to_string(),
                &user.name,
                &user.email,
                user.age,
                user.role.as_str(),
            ],
        )?;
        Ok(user)
    }

    /// Insert several users in one transaction; either all rows land or none
    pub fn create_many(&self, new_users: &[NewUser]) -> DbResult<BatchPayload> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        for new_user in new_users {
            Self::insert(&tx, new_user)?;
        }
        tx.commit()?;
        Ok(BatchPayload::new(new_users.len()))
    }

    /// Insert a user together with its preference row
    pub fn create_with_preference(
        &self,
        new_user: &NewUser,
        email_updates: bool,
    ) -> DbResult<UserWithPreference> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let user = Self::insert(&tx, new_user)?;
        let preference = PreferenceRepository::insert(&tx, &user.id, email_updates)?;
        tx.commit()?;

        Ok(UserWithPreference {
            user,
            user_preference: Some(preference),
        })
    }

    pub fn find_unique_by_id(&self, user_id: &Uuid) -> DbResult<Option<User>> {
        self.find_one("id = ?", user_id.to_string())
    }

    pub fn find_unique_by_email(&self, email: &str) -> DbResult<Option<User>> {
        self.find_one("email = ?", email.to_string())
    }

    /// Look up a user by the compound (age, name) key
    pub fn find_unique_by_age_and_name(&self, age: i64, name: &str) -> DbResult<Option<User>> {
        let conn = self.pool.get()?;
        let sql = format!("SELECT {} FROM users WHERE age = ? AND name = ?", USER_COLUMNS);
        let user = conn
            .query_row(&sql, params![age, name], user_from_row)
            .optional()?;
        Ok(user)
    }

    fn find_one(&self, predicate: &str, key: String) -> DbResult<Option<User>> {
        let conn = self.pool.get()?;
        let sql = format!("SELECT {} FROM users WHERE {}", USER_COLUMNS, predicate);
        let user = conn.query_row(&sql, [key], user_from_row).optional()?;
        Ok(user)
    }

    /// Find a user by email along with its preference, if any
    pub fn find_unique_with_preference(&self, email: &str) -> DbResult<Option<UserWithPreference>> {
        let conn = self.pool.get()?;
        let row = conn
            .query_row(
                "SELECT u.id, u.name, u.email, u.age, u.role, p.id, p.email_updates, p.user_id
                 FROM users u
                 LEFT JOIN user_preferences p ON p.user_id = u.id
                 WHERE u.email = ?",
                [email],
                |row| {
                    let user = user_at(row, 0)?;
                    let preference_id: Option<String> = row.get(5)?;
                    let user_preference = match preference_id {
                        Some(_) => Some(preference_at(row, 5)?),
                        None => None,
                    };
                    Ok(UserWithPreference {
                        user,
                        user_preference,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// First user matching the filter, in insertion order
    pub fn find_first(&self, filter: &UserFilter) -> DbResult<Option<User>> {
        let options = FindOptions::filtered(filter.clone()).take(1);
        Ok(self.find_many(&options)?.into_iter().next())
    }

    pub fn find_many(&self, options: &FindOptions) -> DbResult<Vec<User>> {
        let conn = self.pool.get()?;
        let select = select_users(USER_COLUMNS, options);
        let mut stmt = conn.prepare(&select.sql)?;
        let users = stmt
            .query_map(params_from_iter(select.params.iter()), user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    pub fn count(&self, filter: Option<&UserFilter>) -> DbResult<usize> {
        let conn = self.pool.get()?;
        let clause = optional_where(filter);
        let sql = format!("SELECT COUNT(*) FROM users{}", clause.sql);
        let count: i64 =
            conn.query_row(&sql, params_from_iter(clause.params.iter()), |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Update the user with this email and return the updated row
    pub fn update_by_email(&self, email: &str, update: &UserUpdate) -> DbResult<User> {
        let Some(set) = set_clause(update) else {
            return self
                .find_unique_by_email(email)?
                .ok_or_else(|| DbError::not_found(ENTITY, email));
        };

        let conn = self.pool.get()?;
        let sql = format!(
            "UPDATE users SET {} WHERE email = ? RETURNING {}",
            set.sql, USER_COLUMNS
        );
        let mut values = set.params;
        values.push(email.to_string().into());

        conn.query_row(&sql, params_from_iter(values.iter()), user_from_row)
            .optional()?
            .ok_or_else(|| DbError::not_found(ENTITY, email))
    }

    /// Apply the same change to every user matching the filter
    pub fn update_many(&self, filter: &UserFilter, update: &UserUpdate) -> DbResult<BatchPayload> {
        let Some(set) = set_clause(update) else {
            return Ok(BatchPayload::new(self.count(Some(filter))?));
        };

        let conn = self.pool.get()?;
        let clause = query::where_clause(filter);
        let sql = format!("UPDATE users SET {} WHERE {}", set.sql, clause.sql);
        let mut values = set.params;
        values.extend(clause.params);

        let count = conn.execute(&sql, params_from_iter(values.iter()))?;
        Ok(BatchPayload::new(count))
    }

    /// Delete the user with this email and return the deleted row
    pub fn delete_by_email(&self, email: &str) -> DbResult<User> {
        let conn = self.pool.get()?;
        let sql = format!("DELETE FROM users WHERE email = ? RETURNING {}", USER_COLUMNS);
        conn.query_row(&sql, [email], user_from_row)
            .optional()?
            .ok_or_else(|| DbError::not_found(ENTITY, email))
    }

    /// Delete every user matching the filter, or all users when `None`
    pub fn delete_many(&self, filter: Option<&UserFilter>) -> DbResult<BatchPayload> {
        let conn = self.pool.get()?;
        let clause = optional_where(filter);
        let sql = format!("DELETE FROM users{}", clause.sql);
        let count = conn.execute(&sql, params_from_iter(clause.params.iter()))?;
        Ok(BatchPayload::new(count))
    }
}
