use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_FILE_NAME: &str = "settings.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
    pub pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
}

impl Settings {
    /// Load settings from `settings.toml` (if present) and the environment.
    pub fn new() -> Result<Self, ConfigError> {
        let candidates = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("inkwell-scripts").join(CONFIG_FILE_NAME),
        ];

        let mut builder = Self::builder(&candidates)?;

        // Environment variables have the highest priority
        if let Ok(db_path) = std::env::var("DATABASE_PATH") {
            builder = builder.set_override("database.path", db_path)?;
        }
        if let Ok(pool_size) = std::env::var("DATABASE_POOL_SIZE") {
            builder = builder.set_override("database.pool_size", pool_size)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Load settings from the given files only, ignoring the environment.
    pub fn from_files(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        Self::builder(paths)?.build()?.try_deserialize()
    }

    fn builder(paths: &[PathBuf]) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let mut builder = Config::builder()
            .set_default("database.path", "inkwell.db")?
            .set_default("database.pool_size", 4)?;

        for path in paths {
            if path.exists() {
                builder = builder.add_source(File::from(path.clone()).required(false));
            }
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_files() {
        let settings = Settings::from_files(&[]).expect("Failed to load defaults");
        assert_eq!(settings.database.path, "inkwell.db");
        assert_eq!(settings.database.pool_size, 4);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = std::fs::File::create(&path).expect("Failed to create settings file");
        writeln!(file, "[database]\npath = \"demo.db\"").expect("Failed to write settings");

        let settings = Settings::from_files(&[path]).expect("Failed to load settings");
        assert_eq!(settings.database.path, "demo.db");
        assert_eq!(settings.database.pool_size, 4);
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let settings = Settings::from_files(&[PathBuf::from("/nonexistent/settings.toml")])
            .expect("Missing files should be ignored");
        assert_eq!(settings.database.path, "inkwell.db");
    }
}
