//! Configuration for the importer
//!
//! Values are layered: built-in defaults, then the TOML config file, then
//! environment variables, then command-line flags (applied by the caller).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/ptl_db";
pub const DEFAULT_SPREADSHEET: &str = "User Section detail of Purchase requisitioners.xlsx";
/// Shared plaintext password given to every imported user
pub const DEFAULT_PASSWORD: &str = "admin";

/// Environment variable names
pub mod env {
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const SPREADSHEET: &str = "ENDUSER_IMPORT_FILE";
    pub const SHEET: &str = "ENDUSER_IMPORT_SHEET";
    pub const DEFAULT_PASSWORD: &str = "ENDUSER_DEFAULT_PASSWORD";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database_url: String,
    pub spreadsheet: PathBuf,
    /// Sheet to read; the first sheet when unset
    pub sheet: Option<String>,
    pub default_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            spreadsheet: PathBuf::from(DEFAULT_SPREADSHEET),
            sheet: None,
            default_password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, the default location, or defaults
    ///
    /// An explicit path must exist. The default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override fields from environment variables, read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(env::DATABASE_URL) {
            self.database_url = url;
        }
        if let Some(path) = get(env::SPREADSHEET) {
            self.spreadsheet = PathBuf::from(path);
        }
        if let Some(sheet) = get(env::SHEET) {
            self.sheet = Some(sheet);
        }
        if let Some(password) = get(env::DEFAULT_PASSWORD) {
            self.default_password = password;
        }
    }
}

/// `~/.config/enduser-import/config.toml` (platform equivalent)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("enduser-import").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.spreadsheet, PathBuf::from(DEFAULT_SPREADSHEET));
        assert_eq!(config.sheet, None);
        assert_eq!(config.default_password, "admin");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            database_url = "postgres://importer@db:5432/ptl_db"
            sheet = "Requisitioners"
            "#,
        )
        .unwrap();

        assert_eq!(config.database_url, "postgres://importer@db:5432/ptl_db");
        assert_eq!(config.sheet.as_deref(), Some("Requisitioners"));
        assert_eq!(config.default_password, DEFAULT_PASSWORD);
        assert_eq!(config.spreadsheet, PathBuf::from(DEFAULT_SPREADSHEET));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::from_toml("databse_url = \"x\"").is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config::from_toml(r#"spreadsheet = "from-file.xlsx""#).unwrap();
        let vars: HashMap<&str, &str> = [
            (env::DATABASE_URL, "sqlite://local.db"),
            (env::SPREADSHEET, "from-env.xlsx"),
            (env::DEFAULT_PASSWORD, "   "),
        ]
        .into_iter()
        .collect();

        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.database_url, "sqlite://local.db");
        assert_eq!(config.spreadsheet, PathBuf::from("from-env.xlsx"));
        // Blank values are ignored
        assert_eq!(config.default_password, DEFAULT_PASSWORD);
        assert_eq!(config.sheet, None);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_password = \"changeme\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.default_password, "changeme");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
