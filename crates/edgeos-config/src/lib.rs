//! Shared configuration for the EdgeOS tools.
//!
//! A single TOML file holds output defaults and the integration settings
//! (monitored devices and interfaces, polling intervals, traffic unit).
//! Values are layered: built-in defaults, then the file, then `EDGEOS_`
//! environment variables.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use edgeos_core::{CoreError, IntegrationSettings};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<CoreError> for ConfigError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidSetting { field, reason } => Self::Validation { field, reason },
            other => Self::Validation {
                field: "integration".into(),
                reason: other.to_string(),
            },
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Global CLI defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Integration options.
    #[serde(default)]
    pub integration: IntegrationSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "edgeos", "edgeos").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("edgeos");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from an explicit file path + environment.
///
/// Nested keys use a double underscore, e.g.
/// `EDGEOS_INTEGRATION__CONSIDER_AWAY_INTERVAL=300`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("EDGEOS_").split("__"));

    let config: Config = figment.extract()?;
    config.integration.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    cfg.integration.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    debug!(path = %path.display(), "saved config");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use edgeos_core::{DeviceType, MacAddress, Unit};
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.defaults.output, "table");
        assert_eq!(config.integration.consider_away_interval, 180);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.defaults.output = "json".into();
        config.integration.unit = Unit::Megabytes;
        config.integration.consider_away_interval = 300;
        config
            .integration
            .set_monitored_device(&MacAddress::new("AA:BB:CC:00:11:22"), true);
        config.integration.set_monitored_interface("eth0", true);

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded, config);
        assert!(
            loaded
                .integration
                .is_monitored(DeviceType::Device, Some("aa:bb:cc:00:11:22"))
        );
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[integration]\nupdate_api_interval = 60\n\n[integration.monitored_interfaces]\neth1 = true\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.integration.update_api_interval, 60);
        assert_eq!(config.integration.update_entities_interval, 1);
        assert!(
            config
                .integration
                .is_monitored(DeviceType::Interface, Some("eth1"))
        );
        assert_eq!(config.defaults.color, "auto");
    }

    #[test]
    fn out_of_range_interval_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[integration]\nconsider_away_interval = 601\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation { ref field, .. } if field == "consider_away_interval"
        ));
    }

    #[test]
    fn malformed_file_is_a_figment_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[integration]\nunit = \"Bits\"\n").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Figment(_))));
    }
}
