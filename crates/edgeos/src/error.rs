//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use edgeos_config::ConfigError;
use edgeos_core::{CatalogError, CoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFIG: i32 = 78;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Catalog ──────────────────────────────────────────────────────
    #[error("Entity catalog is inconsistent: {0}")]
    #[diagnostic(
        code(edgeos::catalog),
        help("Every validation tag used by a descriptor needs a registered rule.")
    )]
    Catalog(#[from] CatalogError),

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(edgeos::not_found),
        help("Run: edgeos {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(edgeos::validation))]
    Validation { field: String, reason: String },

    #[error("Unknown setting '{key}'")]
    #[diagnostic(code(edgeos::unknown_setting), help("Valid settings: {valid}"))]
    UnknownSetting { key: String, valid: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists")]
    #[diagnostic(
        code(edgeos::config_exists),
        help(
            "Use --force to overwrite it.\n\
             Existing file: {path}"
        )
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(edgeos::config))]
    Config(Box<figment::Error>),

    #[error("Could not save configuration: {0}")]
    #[diagnostic(code(edgeos::config_save))]
    ConfigSave(String),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(edgeos::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(edgeos::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::UnknownSetting { .. } | Self::ConfigExists { .. } => {
                exit_code::USAGE
            }
            Self::Config(_) | Self::ConfigSave(_) => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Catalog(err) => CliError::Catalog(err),

            CoreError::DeviceNotFound { identifier } => CliError::NotFound {
                resource_type: "device".into(),
                identifier,
                list_command: "devices inspect --file <FILE>".into(),
            },

            CoreError::UnknownValue { kind: "setting", value } => CliError::UnknownSetting {
                key: value,
                valid: edgeos_core::IntegrationSettings::KEYS.join(", "),
            },

            CoreError::UnknownValue { kind, value } => CliError::Validation {
                field: kind.into(),
                reason: format!("unknown value '{value}'"),
            },

            CoreError::InvalidSetting { field, reason } => CliError::Validation { field, reason },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Figment(err) => CliError::Config(err),
            ConfigError::Io(err) => CliError::Io(err),
            ConfigError::Serialization(err) => CliError::ConfigSave(err.to_string()),
        }
    }
}
