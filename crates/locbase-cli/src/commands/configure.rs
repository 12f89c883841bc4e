//! Config command - inspect and edit the configuration file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use locbase_types::Coordinate;

use crate::cli::{ConfigAction, ConfigKey, ProviderKind};
use crate::config::Config;

fn key_name(key: ConfigKey) -> &'static str {
    match key {
        ConfigKey::Db => "db",
        ConfigKey::Prefs => "prefs",
        ConfigKey::Provider => "provider",
        ConfigKey::FixedAt => "fixed-at",
        ConfigKey::DesktopId => "desktop-id",
    }
}

fn get_value(config: &Config, key: ConfigKey) -> Option<String> {
    match key {
        ConfigKey::Db => config.db.as_ref().map(|p| p.display().to_string()),
        ConfigKey::Prefs => config.prefs.as_ref().map(|p| p.display().to_string()),
        ConfigKey::Provider => Some(config.provider.kind.to_string()),
        ConfigKey::FixedAt => config.provider.fixed.map(|c| c.to_string()),
        ConfigKey::DesktopId => Some(config.provider.desktop_id.clone()),
    }
}

fn set_value(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::Db => config.db = Some(PathBuf::from(value)),
        ConfigKey::Prefs => config.prefs = Some(PathBuf::from(value)),
        ConfigKey::Provider => {
            config.provider.kind = ProviderKind::from_str(value, true)
                .map_err(|e| anyhow::anyhow!("Invalid provider '{}': {}", value, e))?;
        }
        ConfigKey::FixedAt => {
            let coordinate: Coordinate = value
                .parse()
                .with_context(|| format!("Invalid coordinate '{}'", value))?;
            config.provider.fixed = Some(coordinate);
        }
        ConfigKey::DesktopId => config.provider.desktop_id = value.to_string(),
    }
    Ok(())
}

fn unset_value(config: &mut Config, key: ConfigKey) {
    let defaults = Config::default();
    match key {
        ConfigKey::Db => config.db = None,
        ConfigKey::Prefs => config.prefs = None,
        ConfigKey::Provider => config.provider.kind = defaults.provider.kind,
        ConfigKey::FixedAt => config.provider.fixed = None,
        ConfigKey::DesktopId => config.provider.desktop_id = defaults.provider.desktop_id,
    }
}

/// Execute the config command against the file at `path`.
pub fn cmd_config(action: ConfigAction, path: &Path) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            let config = Config::load_from(path);
            if !path.exists() {
                println!("# No config file at {} (showing defaults)", path.display());
            }
            let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            print!("{}", content);
        }
        ConfigAction::Get { key } => {
            let config = Config::load_from(path);
            match get_value(&config, key) {
                Some(value) => println!("{}", value),
                None => println!("(not set)"),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(path);
            set_value(&mut config, key, &value)?;
            config.save_to(path)?;
            println!("Set {} = {}", key_name(key), value);
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load_from(path);
            unset_value(&mut config, key);
            config.save_to(path)?;
            println!("Unset {}", key_name(key));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_fixed_coordinate() {
        let mut config = Config::default();
        set_value(&mut config, ConfigKey::FixedAt, "-23.5,-46.6").unwrap();
        assert_eq!(
            config.provider.fixed,
            Some(Coordinate::new(-23.5, -46.6))
        );
        assert_eq!(
            get_value(&config, ConfigKey::FixedAt).as_deref(),
            Some("-23.5,-46.6")
        );
    }

    #[test]
    fn test_set_provider_is_case_insensitive() {
        let mut config = Config::default();
        set_value(&mut config, ConfigKey::Provider, "FIXED").unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Fixed);
        assert!(set_value(&mut config, ConfigKey::Provider, "gps").is_err());
    }

    #[test]
    fn test_set_rejects_bad_coordinate() {
        let mut config = Config::default();
        assert!(set_value(&mut config, ConfigKey::FixedAt, "here").is_err());
        assert!(config.provider.fixed.is_none());
    }

    #[test]
    fn test_unset_restores_defaults() {
        let mut config = Config::default();
        set_value(&mut config, ConfigKey::DesktopId, "org.example.Locbase").unwrap();
        set_value(&mut config, ConfigKey::Db, "/tmp/l.db").unwrap();

        unset_value(&mut config, ConfigKey::DesktopId);
        unset_value(&mut config, ConfigKey::Db);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        cmd_config(
            ConfigAction::Set {
                key: ConfigKey::Provider,
                value: "fixed".to_string(),
            },
            &path,
        )
        .unwrap();

        assert_eq!(Config::load_from(&path).provider.kind, ProviderKind::Fixed);
    }
}
