//! Configuration management.
//!
//! Values are layered: built-in defaults, then the TOML config file, then
//! environment variables. Command-line flags are applied last by the binary.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::{Identity, Session};
use crate::observability::{LOG_FORMAT_ENV, LogFormat, LoggingConfig};
use crate::{Error, Result};

/// Overrides the data directory.
pub const DATA_DIR_ENV: &str = "BARILLET_DATA_DIR";
/// Identity the CLI acts as.
pub const USER_ENV: &str = "BARILLET_USER";
/// Email attached to the CLI identity.
pub const EMAIL_ENV: &str = "BARILLET_EMAIL";
/// Default output directory for exports.
pub const EXPORT_DIR_ENV: &str = "BARILLET_EXPORT_DIR";

const APP_DIR: &str = "barillet";

/// Main configuration for barillet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarilletConfig {
    /// Directory holding one JSON file per barillet.
    pub data_dir: PathBuf,
    /// Identity the CLI acts as; `None` means anonymous.
    pub user_id: Option<String>,
    /// Email of that identity.
    pub user_email: Option<String>,
    /// Where exports are written when no output path is given.
    pub export_dir: PathBuf,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Export directory.
    pub export_dir: Option<String>,
    /// Identity section.
    pub user: Option<ConfigFileUser>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
}

/// `[user]` section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileUser {
    /// User id.
    pub id: Option<String>,
    /// Email.
    pub email: Option<String>,
}

/// `[logging]` section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileLogging {
    /// `EnvFilter` directive.
    pub filter: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Log file path.
    pub file: Option<String>,
}

impl Default for BarilletConfig {
    fn default() -> Self {
        let data_root = directories::BaseDirs::new().map_or_else(
            || PathBuf::from(".barillet"),
            |dirs| dirs.data_dir().join(APP_DIR),
        );
        Self {
            data_dir: data_root.join("barillets"),
            user_id: None,
            user_email: None,
            export_dir: PathBuf::from("."),
            logging: LoggingConfig::default(),
        }
    }
}

impl BarilletConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| Error::operation("parse_config_file", e))?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the platform config directory
    /// (`~/.config/barillet/config.toml` on Linux).
    ///
    /// Returns the defaults when no file exists or it cannot be parsed.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(path) = Self::default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                Self::default()
            },
        }
    }

    /// Path of the default config file, if the platform has a config dir.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(APP_DIR).join("config.toml"))
    }

    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(export_dir) = file.export_dir {
            config.export_dir = PathBuf::from(export_dir);
        }
        if let Some(user) = file.user {
            config.user_id = user.id.filter(|id| !id.trim().is_empty());
            config.user_email = user.email;
        }
        if let Some(logging) = file.logging {
            if let Some(filter) = logging.filter {
                config.logging.filter = filter;
            }
            if let Some(format) = logging.format.as_deref().and_then(LogFormat::parse) {
                config.logging.format = format;
            }
            config.logging.file = logging.file.map(PathBuf::from);
        }

        config
    }

    /// Applies `BARILLET_*` environment overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(EXPORT_DIR_ENV) {
            self.export_dir = PathBuf::from(dir);
        }
        if let Some(user) = lookup(USER_ENV) {
            self.user_id = Some(user);
        }
        if let Some(email) = lookup(EMAIL_ENV) {
            self.user_email = Some(email);
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV).as_deref().and_then(LogFormat::parse) {
            self.logging.format = format;
        }
        self
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the acting user.
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Builds the session for the configured identity.
    #[must_use]
    pub fn session(&self) -> Session {
        self.user_id.as_ref().map_or_else(Session::anonymous, |uid| {
            let mut identity = Identity::new(uid.clone());
            identity.email.clone_from(&self.user_email);
            Session::signed_in(identity)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
data_dir = "/srv/barillet"

[user]
id = "coach"
email = "coach@example.org"

[logging]
format = "json"
"#,
        )
        .unwrap();

        let config = BarilletConfig::load_from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/barillet"));
        assert_eq!(config.user_id.as_deref(), Some("coach"));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.session().user_id(), Some("coach"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "colour = \"blue\"\n").unwrap();
        assert!(matches!(
            BarilletConfig::load_from_file(&path),
            Err(Error::OperationFailed { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (DATA_DIR_ENV, "/tmp/data"),
            (USER_ENV, "u-42"),
            (LOG_FORMAT_ENV, "json"),
            (EMAIL_ENV, "  "),
        ]);
        let config = BarilletConfig::default()
            .with_overrides_from(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/data"));
        assert_eq!(config.user_id.as_deref(), Some("u-42"));
        assert!(config.user_email.is_none());
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_session_without_user_is_anonymous() {
        let config = BarilletConfig::default();
        assert!(config.session().identity().is_none());
    }
}
