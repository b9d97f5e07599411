use uuid::Uuid;

use inkwell_types::{BatchPayload, Category};

use crate::db::rows::category_from_row;
use crate::db::DbPool;
use crate::error::DbResult;

pub struct CategoryRepository {
    pool: DbPool,
}

impl CategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create(&self, name: &str) -> DbResult<Category> {
        let conn = self.pool.get()?;
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        conn.execute(
            "INSERT INTO categories (id, name) VALUES (?, ?)",
            (category.id.to_string(), &category.name),
        )?;
        Ok(category)
    }

    /// All categories ordered by name
    pub fn find_many(&self) -> DbResult<Vec<Category>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY name")?;
        let categories = stmt
            .query_map([], category_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn count(&self) -> DbResult<usize> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn delete_many(&self) -> DbResult<BatchPayload> {
        let conn = self.pool.get()?;
        let count = conn.execute("DELETE FROM categories", [])?;
        Ok(BatchPayload::new(count))
    }
}
