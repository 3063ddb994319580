//! Shared helpers for command handlers.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use edgeos_config::Config;
use edgeos_core::{DeviceType, Platform};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file in effect: `--config` / `EDGEOS_CONFIG`, else the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(edgeos_config::config_path)
}

/// Load configuration from the effective path. A missing file yields defaults.
pub fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(edgeos_config::load_config_from(&config_path(global))?)
}

pub fn parse_platform(value: &str) -> Result<Platform, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: "platform".into(),
        reason: format!("unknown platform '{value}'"),
    })
}

pub fn parse_device_type(value: &str) -> Result<DeviceType, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: "device-type".into(),
        reason: format!("unknown device type '{value}'"),
    })
}

/// Parse an RFC 3339 reference time, defaulting to now.
pub fn parse_timestamp(value: Option<&str>) -> Result<DateTime<Utc>, CliError> {
    let Some(value) = value else {
        return Ok(Utc::now());
    };
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| CliError::Validation {
            field: "at".into(),
            reason: format!("expected an RFC 3339 timestamp: {e}"),
        })
}

/// Read and parse a JSON file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}
