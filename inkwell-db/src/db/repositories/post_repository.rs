use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use inkwell_types::{BatchPayload, NewPost, Post};

use crate::db::rows::{post_from_row, POST_COLUMNS};
use crate::db::DbPool;
use crate::error::{DbError, DbResult};

pub struct PostRepository {
    pool: DbPool,
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a post connected to an existing author
    ///
    /// Fails with a foreign key violation when the author does not exist.
    pub fn create(&self, new_post: &NewPost) -> DbResult<Post> {
        let conn = self.pool.get()?;
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: new_post.title.clone(),
            average_rating: new_post.average_rating,
            author_id: new_post.author_id,
            created_at: now,
            updated_at: now,
        };
        conn.execute(
            "INSERT INTO posts (id, title, average_rating, author_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                post.id.to_string(),
                &post.title,
                post.average_rating,
                post.author_id.to_string(),
                post.created_at.to_rfc3339(),
                post.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(post)
    }

    pub fn find_by_id(&self, post_id: &Uuid) -> DbResult<Option<Post>> {
        let conn = self.pool.get()?;
        let sql = format!("SELECT {} FROM posts WHERE id = ?", POST_COLUMNS);
        let post = conn
            .query_row(&sql, [post_id.to_string()], post_from_row)
            .optional()?;
        Ok(post)
    }

    /// Posts written by a user, oldest first
    pub fn find_by_author(&self, author_id: &Uuid) -> DbResult<Vec<Post>> {
        let conn = self.pool.get()?;
        let sql = format!(
            "SELECT {} FROM posts WHERE author_id = ? ORDER BY created_at ASC, rowid ASC",
            POST_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let posts = stmt
            .query_map([author_id.to_string()], post_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    pub fn find_many(&self) -> DbResult<Vec<Post>> {
        let conn = self.pool.get()?;
        let sql = format!("SELECT {} FROM posts ORDER BY rowid", POST_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let posts = stmt
            .query_map([], post_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    /// Set a post's rating and refresh its `updated_at`
    pub fn update_average_rating(&self, post_id: &Uuid, average_rating: f64) -> DbResult<Post> {
        let conn = self.pool.get()?;
        let sql = format!(
            "UPDATE posts SET average_rating = ?, updated_at = ? WHERE id = ? RETURNING {}",
            POST_COLUMNS
        );
        conn.query_row(
            &sql,
            params![average_rating, Utc::now().to_rfc3339(), post_id.to_string()],
            post_from_row,
        )
        .optional()?
        .ok_or_else(|| DbError::not_found("Post", post_id.to_string()))
    }

    pub fn count(&self) -> DbResult<usize> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn delete_by_author(&self, author_id: &Uuid) -> DbResult<BatchPayload> {
        let conn = self.pool.get()?;
        let count = conn.execute("DELETE FROM posts WHERE author_id = ?", [author_id.to_string()])?;
        Ok(BatchPayload::new(count))
    }

    pub fn delete_many(&self) -> DbResult<BatchPayload> {
        let conn = self.pool.get()?;
        let count = conn.execute("DELETE FROM posts", [])?;
        Ok(BatchPayload::new(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::UserRepository;
    use crate::db::Database;
    use inkwell_types::NewUser;

    fn setup_test_db() -> DbResult<(Database, Uuid)> {
        let db = Database::in_memory()?;
        db.initialize()?;
        let author = UserRepository::new(db.pool.clone())
            .create(&NewUser::new("Kyle", "kyle@test.com", 27))?;
        Ok((db, author.id))
    }

    fn new_post(title: &str, author_id: Uuid) -> NewPost {
        NewPost {
            title: title.to_string(),
            average_rating: 4.5,
            author_id,
        }
    }

    #[test]
    fn test_create_connects_to_existing_author() -> DbResult<()> {
        let (db, author_id) = setup_test_db()?;
        let repo = PostRepository::new(db.pool.clone());

        let post = repo.create(&new_post("First Post", author_id))?;
        assert_eq!(post.author_id, author_id);
        assert_eq!(post.created_at, post.updated_at);

        let stored = repo.find_by_id(&post.id)?.expect("post should exist");
        assert_eq!(stored.title, "First Post");
        assert_eq!(stored.average_rating, 4.5);
        Ok(())
    }

    #[test]
    fn test_create_with_unknown_author_fails() -> DbResult<()> {
        let (db, _author_id) = setup_test_db()?;
        let repo = PostRepository::new(db.pool.clone());

        let err = repo.create(&new_post("Orphan", Uuid::new_v4())).unwrap_err();
        assert!(err.is_foreign_key_violation());
        assert_eq!(repo.count()?, 0);
        Ok(())
    }

    #[test]
    fn test_find_by_author() -> DbResult<()> {
        let (db, author_id) = setup_test_db()?;
        let other = UserRepository::new(db.pool.clone())
            .create(&NewUser::new("Sally", "sally@test.com", 32))?;
        let repo = PostRepository::new(db.pool.clone());

        repo.create(&new_post("One", author_id))?;
        repo.create(&new_post("Two", author_id))?;
        repo.create(&new_post("Elsewhere", other.id))?;

        let titles: Vec<String> = repo
            .find_by_author(&author_id)?
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["One", "Two"]);
        assert_eq!(repo.find_many()?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_update_average_rating() -> DbResult<()> {
        let (db, author_id) = setup_test_db()?;
        let repo = PostRepository::new(db.pool.clone());

        let post = repo.create(&new_post("Rated", author_id))?;
        let updated = repo.update_average_rating(&post.id, 3.0)?;
        assert_eq!(updated.average_rating, 3.0);
        assert!(updated.updated_at >= post.updated_at);
        assert_eq!(updated.created_at, post.created_at);

        let err = repo.update_average_rating(&Uuid::new_v4(), 1.0).unwrap_err();
        assert!(err.is_not_found());
        Ok(())
    }

    #[test]
    fn test_delete_by_author_and_delete_many() -> DbResult<()> {
        let (db, author_id) = setup_test_db()?;
        let repo = PostRepository::new(db.pool.clone());

        repo.create(&new_post("One", author_id))?;
        repo.create(&new_post("Two", author_id))?;
        assert_eq!(repo.delete_by_author(&author_id)?.count, 2);

        repo.create(&new_post("Three", author_id))?;
        assert_eq!(repo.delete_many()?.count, 1);
        assert_eq!(repo.count()?, 0);
        Ok(())
    }
}
