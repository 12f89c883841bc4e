//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use locbase_store::{default_db_path, default_preferences_path};
use locbase_types::Coordinate;

use crate::cli::{ProviderArgs, ProviderKind};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Location database path
    #[serde(default)]
    pub db: Option<PathBuf>,

    /// Preference file path
    #[serde(default)]
    pub prefs: Option<PathBuf>,

    /// Location provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Location provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider used when none is given on the command line.
    #[serde(default)]
    pub kind: ProviderKind,

    /// Desktop id GeoClue uses to identify the application.
    #[serde(default = "default_desktop_id")]
    pub desktop_id: String,

    /// Coordinate reported by the fixed provider.
    #[serde(default)]
    pub fixed: Option<Coordinate>,
}

fn default_desktop_id() -> String {
    "locbase".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            desktop_id: default_desktop_id(),
            fixed: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("locbase")
            .join("config.toml")
    }

    /// Load config from `path`, or return default if it is missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        warn!(path = %path.display(), "Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    warn!(path = %path.display(), "Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Database path from flag or env var, then config, then the platform default.
pub fn resolve_db_path(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.or_else(|| config.db.clone())
        .unwrap_or_else(default_db_path)
}

/// Preference file path from flag or env var, then config, then the platform default.
pub fn resolve_prefs_path(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.or_else(|| config.prefs.clone())
        .unwrap_or_else(default_preferences_path)
}

/// Provider choice after merging command-line arguments with the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSelection {
    pub kind: ProviderKind,
    pub fixed: Option<Coordinate>,
    pub desktop_id: String,
}

/// Resolve the provider: an explicit `--provider` wins, `--at` alone selects
/// the fixed provider, otherwise the config file decides.
pub fn resolve_provider(args: &ProviderArgs, config: &Config) -> ProviderSelection {
    let kind = args
        .provider
        .or(args.at.map(|_| ProviderKind::Fixed))
        .unwrap_or(config.provider.kind);

    ProviderSelection {
        kind,
        fixed: args.at.or(config.provider.fixed),
        desktop_id: config.provider.desktop_id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml"));
        assert_eq!(config, Config::default());
        assert_eq!(config.provider.desktop_id, "locbase");
        assert_eq!(config.provider.kind, ProviderKind::Geoclue);
    }

    #[test]
    fn test_unparsable_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "db = [not toml").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.db = Some(PathBuf::from("/data/locations.db"));
        config.provider.kind = ProviderKind::Fixed;
        config.provider.fixed = Some(Coordinate::new(1.5, -2.5));
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[provider]\nkind = \"fixed\"\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.provider.kind, ProviderKind::Fixed);
        assert_eq!(config.provider.desktop_id, "locbase");
        assert!(config.db.is_none());
    }

    #[test]
    fn test_resolve_db_path_prefers_flag() {
        let config = Config {
            db: Some(PathBuf::from("/from/config.db")),
            ..Config::default()
        };
        assert_eq!(
            resolve_db_path(Some(PathBuf::from("/from/flag.db")), &config),
            PathBuf::from("/from/flag.db")
        );
        assert_eq!(
            resolve_db_path(None, &config),
            PathBuf::from("/from/config.db")
        );
        assert_eq!(resolve_db_path(None, &Config::default()), default_db_path());
    }

    #[test]
    fn test_resolve_provider_at_implies_fixed() {
        let args = ProviderArgs {
            provider: None,
            at: Some(Coordinate::new(1.0, 2.0)),
        };
        let selection = resolve_provider(&args, &Config::default());
        assert_eq!(selection.kind, ProviderKind::Fixed);
        assert_eq!(selection.fixed, Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn test_resolve_provider_explicit_kind_wins() {
        let args = ProviderArgs {
            provider: Some(ProviderKind::Geoclue),
            at: Some(Coordinate::new(1.0, 2.0)),
        };
        assert_eq!(
            resolve_provider(&args, &Config::default()).kind,
            ProviderKind::Geoclue
        );
    }

    #[test]
    fn test_resolve_provider_falls_back_to_config() {
        let mut config = Config::default();
        config.provider.kind = ProviderKind::Fixed;
        config.provider.fixed = Some(Coordinate::new(3.0, 4.0));

        let selection = resolve_provider(&ProviderArgs::default(), &config);
        assert_eq!(selection.kind, ProviderKind::Fixed);
        assert_eq!(selection.fixed, Some(Coordinate::new(3.0, 4.0)));
    }
}
