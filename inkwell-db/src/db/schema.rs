/// SQL schema for the Inkwell database
/// Foreign keys do not cascade: dependents must be removed before their user
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    -- Overflowing arithmetic yields REAL; reject it instead of storing it
    age INTEGER NOT NULL CHECK (typeof(age) = 'integer'),
    role TEXT NOT NULL DEFAULT 'BASIC' CHECK(role IN ('BASIC', 'ADMIN')),
    UNIQUE (age, name)
);

CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);

-- One preference row per user
CREATE TABLE IF NOT EXISTS user_preferences (
    id TEXT PRIMARY KEY,
    email_updates INTEGER NOT NULL DEFAULT 0,
    user_id TEXT UNIQUE NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id)
);

-- Posts table
CREATE TABLE IF NOT EXISTS posts (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    average_rating REAL NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    author_id TEXT NOT NULL,
    FOREIGN KEY (author_id) REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_posts_author_id ON posts(author_id);

-- Categories table
CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY,
    name TEXT UNIQUE NOT NULL
);
"#;

