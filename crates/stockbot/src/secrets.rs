//! Secret lookup
//!
//! API keys are resolved through [`SecretSource`] so configuration can be
//! built from the process environment in the binary and from fixed values
//! in tests.

use crate::error::{Result, StockError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Something that can look up a secret by name
pub trait SecretSource: Send + Sync {
    /// Return the secret, or `None` when it is not set or empty
    fn secret(&self, name: &str) -> Option<String>;

    /// Return the first secret found among `names`
    fn first_of(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.secret(name))
    }
}

/// Secrets read from process environment variables
///
/// Call [`load_dotenv`] first to pick up a `.env` file.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecrets;

/// What [`load_dotenv`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvOutcome {
    /// Variables were read from this file
    Loaded(PathBuf),
    /// No `.env` was found in the working directory or its parents
    NotFound,
}

/// Load a dotenv file into the process environment.
///
/// With `None` the `.env` file in the working directory (or a parent) is
/// tried, and its absence is [`DotenvOutcome::NotFound`]. An explicit `path`
/// must exist. A file that cannot be parsed is an error either way.
pub fn load_dotenv(path: Option<&Path>) -> Result<DotenvOutcome> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .map(|()| DotenvOutcome::Loaded(path.to_path_buf()))
            .map_err(|e| {
                StockError::ConfigError(format!("Failed to load {}: {e}", path.display()))
            }),
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(DotenvOutcome::Loaded(path)),
            Err(e) if e.not_found() => Ok(DotenvOutcome::NotFound),
            Err(e) => Err(StockError::ConfigError(format!("Failed to load .env: {e}"))),
        },
    }
}

impl SecretSource for EnvSecrets {
    fn secret(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }
}

/// Fixed in-memory secrets
#[derive(Debug, Clone, Default)]
pub struct StaticSecrets {
    values: HashMap<String, String>,
}

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl SecretSource for StaticSecrets {
    fn secret(&self, name: &str) -> Option<String> {
        self.values.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_env_file_is_error() {
        let path = std::env::temp_dir().join("stockbot-no-such-dir").join("missing.env");
        let err = load_dotenv(Some(&path)).unwrap_err();
        assert!(matches!(err, StockError::ConfigError(_)));
        assert!(err.to_string().contains("missing.env"));
    }

    #[test]
    fn test_explicit_env_file_loaded() {
        let path = std::env::temp_dir().join(format!("stockbot-{}.env", std::process::id()));
        std::fs::write(&path, "STOCKBOT_DOTENV_TEST_KEY=from_file\n").unwrap();

        let outcome = load_dotenv(Some(&path));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(outcome.unwrap(), DotenvOutcome::Loaded(path));
        assert_eq!(
            EnvSecrets.secret("STOCKBOT_DOTENV_TEST_KEY").as_deref(),
            Some("from_file")
        );
    }

    #[test]
    fn test_static_secrets() {
        let secrets = StaticSecrets::new().with("KEY", "value").with("EMPTY", "");
        assert_eq!(secrets.secret("KEY").as_deref(), Some("value"));
        assert_eq!(secrets.secret("EMPTY"), None);
        assert_eq!(secrets.secret("MISSING"), None);
    }

    #[test]
    fn test_first_of_prefers_earlier_names() {
        let secrets = StaticSecrets::new().with("LEGACY", "old").with("PRIMARY", "new");
        assert_eq!(
            secrets.first_of(&["PRIMARY", "LEGACY"]).as_deref(),
            Some("new")
        );
        assert_eq!(secrets.first_of(&["MISSING", "LEGACY"]).as_deref(), Some("old"));
        assert_eq!(secrets.first_of(&["MISSING"]), None);
    }
}
