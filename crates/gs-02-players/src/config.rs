//! # Session Configuration
//!
//! Storage layout, refresh throttle and protocol version for a session.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{ConfigError, ConfigResult};

/// Default vitals refresh interval, in engine ticks.
pub const DEFAULT_REFRESH_INTERVAL_TICKS: u64 = 100;

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory holding one permission record per player.
    pub permissions_dir: PathBuf,

    /// Directory holding one JSON player record per player.
    pub players_dir: PathBuf,

    /// Extension appended to the sanitized id of a permission record.
    pub permission_extension: String,

    /// Extra suffix some platforms appended to permission records.
    /// Records carrying it are migrated on load.
    pub legacy_suffix: String,

    /// Minimum ticks between two vitals refreshes of the same player.
    pub refresh_interval_ticks: u64,

    /// Wire protocol version accepted by this session.
    pub protocol_version: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            permissions_dir: PathBuf::from("profile/PermissionsFramework/Permissions"),
            players_dir: PathBuf::from("profile/PermissionsFramework/Players"),
            permission_extension: ".txt".to_string(),
            legacy_suffix: ".txt".to_string(),
            refresh_interval_ticks: DEFAULT_REFRESH_INTERVAL_TICKS,
            protocol_version: shared_types::Envelope::<()>::CURRENT_VERSION,
        }
    }
}

impl SessionConfig {
    /// Create a config for testing, rooted at `dir`.
    pub fn for_testing(dir: &Path) -> Self {
        Self {
            permissions_dir: dir.join("permissions"),
            players_dir: dir.join("players"),
            ..Self::default()
        }
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the session cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.permission_extension.is_empty() {
            return Err(ConfigError::Invalid {
                field: "permission_extension",
                reason: "must not be empty".into(),
            });
        }
        if self.permission_extension.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: "permission_extension",
                reason: "must not contain a path separator".into(),
            });
        }
        if self.legacy_suffix.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: "legacy_suffix",
                reason: "must not contain a path separator".into(),
            });
        }
        if self.refresh_interval_ticks == 0 {
            return Err(ConfigError::Invalid {
                field: "refresh_interval_ticks",
                reason: "must be at least 1".into(),
            });
        }
        if self.protocol_version == 0 {
            return Err(ConfigError::Invalid {
                field: "protocol_version",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.refresh_interval_ticks, 100);
        assert_eq!(config.permission_extension, ".txt");
        assert_eq!(config.legacy_suffix, ".txt");
        assert_eq!(config.protocol_version, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_config() {
        let config = SessionConfig::for_testing(Path::new("/tmp/session"));
        assert_eq!(config.permissions_dir, PathBuf::from("/tmp/session/permissions"));
        assert_eq!(config.players_dir, PathBuf::from("/tmp/session/players"));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = SessionConfig {
            refresh_interval_ticks: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "refresh_interval_ticks",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_separator_in_extension() {
        let config = SessionConfig {
            permission_extension: "/txt".into(),
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{ "refresh_interval_ticks": 250 }"#).unwrap();

        let config = SessionConfig::from_file(&path).unwrap();
        assert_eq!(config.refresh_interval_ticks, 250);
        assert_eq!(config.permission_extension, ".txt");
    }

    #[test]
    fn test_from_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{ "protocol_version": 0 }"#).unwrap();
        assert!(matches!(
            SessionConfig::from_file(&path),
            Err(ConfigError::Invalid { .. })
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            SessionConfig::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            SessionConfig::from_file(Path::new("/nonexistent/session.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
