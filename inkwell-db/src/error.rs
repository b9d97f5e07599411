use rusqlite::ffi;
use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Failures surfaced by the data-access layer.
///
/// Callers are not expected to recover from any of these; the variants exist
/// so a failure can be reported (and tested) for what it is.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("unique constraint failed: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint failed")]
    ForeignKeyViolation,

    #[error("{entity} not found for {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("invalid stored value in column {column}: {reason}")]
    Corrupt { column: String, reason: String },

    #[error("failed to get database connection from pool")]
    Pool(#[from] r2d2::Error),

    #[error(transparent)]
    Sqlite(rusqlite::Error),
}

impl DbError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        DbError::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation { .. })
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, DbError::ForeignKeyViolation)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                    || code.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                let constraint = message
                    .as_deref()
                    .and_then(|m| m.strip_prefix("UNIQUE constraint failed: "))
                    .unwrap_or("unknown")
                    .to_string();
                DbError::UniqueViolation { constraint }
            }
            rusqlite::Error::SqliteFailure(code, _)
                if code.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                DbError::ForeignKeyViolation
            }
            rusqlite::Error::FromSqlConversionFailure(index, _, reason) => DbError::Corrupt {
                column: format!("#{}", index),
                reason: reason.to_string(),
            },
            other => DbError::Sqlite(other),
        }
    }
}
