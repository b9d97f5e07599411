use serde::Serialize;
use std::path::Path;

use super::repositories::{
    CategoryRepository, PostRepository, PreferenceRepository, UserRepository,
};
use super::Database;
use crate::config::DatabaseSettings;
use crate::error::DbResult;

/// Row counts of every table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EntityCounts {
    pub users: usize,
    pub user_preferences: usize,
    pub posts: usize,
    pub categories: usize,
}

impl EntityCounts {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Database handle used by a script run.
///
/// The handle is released exactly once: by [`Client::disconnect`] or, on any
/// other exit path, when it is dropped.
pub struct Client {
    db: Database,
    released: bool,
}

impl Client {
    /// Open the configured database and make sure the schema exists
    pub fn connect(settings: &DatabaseSettings) -> DbResult<Self> {
        Self::open(&settings.path, settings.pool_size)
    }

    pub fn open<P: AsRef<Path>>(path: P, pool_size: u32) -> DbResult<Self> {
        let db = Database::new(path.as_ref(), pool_size)?;
        db.initialize()?;
        tracing::info!(path = %path.as_ref().display(), "Database handle acquired");
        Ok(Self::from_database(db))
    }

    /// Wrap an already initialized database
    pub fn from_database(db: Database) -> Self {
        Self {
            db,
            released: false,
        }
    }

    /// In-memory database with the schema applied
    pub fn in_memory() -> DbResult<Self> {
        let db = Database::in_memory()?;
        db.initialize()?;
        Ok(Self::from_database(db))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.db.pool.clone())
    }

    pub fn preferences(&self) -> PreferenceRepository {
        PreferenceRepository::new(self.db.pool.clone())
    }

    pub fn posts(&self) -> PostRepository {
        PostRepository::new(self.db.pool.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.db.pool.clone())
    }

    pub fn counts(&self) -> DbResult<EntityCounts> {
        Ok(EntityCounts {
            users: self.users().count(None)?,
            user_preferences: self.preferences().count()?,
            posts: self.posts().count()?,
            categories: self.categories().count()?,
        })
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release the handle explicitly
    pub fn disconnect(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        tracing::info!("Database handle released");
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwell_types::NewUser;

    #[test]
    fn test_fresh_database_has_no_rows() -> DbResult<()> {
        let client = Client::in_memory()?;
        assert!(client.counts()?.is_empty());
        client.disconnect();
        Ok(())
    }

    #[test]
    fn test_repositories_share_the_same_database() -> DbResult<()> {
        let client = Client::in_memory()?;
        let user = client
            .users()
            .create(&NewUser::new("Kyle", "kyle@test.com", 27))?;
        client.preferences().create(&user.id, true)?;

        let counts = client.counts()?;
        assert_eq!(counts.users, 1);
        assert_eq!(counts.user_preferences, 1);
        Ok(())
    }

    #[test]
    fn test_release_happens_once() -> DbResult<()> {
        let mut client = Client::in_memory()?;
        assert!(!client.is_released());
        client.release();
        assert!(client.is_released());
        client.release();
        assert!(client.is_released());
        Ok(())
    }

    #[test]
    fn test_connect_uses_settings() -> DbResult<()> {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let settings = DatabaseSettings {
            path: dir.path().join("inkwell.db").to_string_lossy().into_owned(),
            pool_size: 2,
        };

        let client = Client::connect(&settings)?;
        client.categories().create("News")?;
        client.disconnect();

        let reopened = Client::connect(&settings)?;
        assert_eq!(reopened.categories().count()?, 1);
        assert!(!reopened.is_released());
        Ok(())
    }
}
