// ── Core error types ──
//
// The core is a pure computation layer: selection never fails and the
// traffic model never fails. What remains are catalog construction
// errors (surfaced at startup) and settings validation.

use thiserror::Error;

use crate::entity::{EntityKey, EntityValidation};

/// Raised while building a [`Catalog`](crate::Catalog) or resolving a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("No validation rule registered for tag '{tag}'")]
    UnregisteredValidation { tag: EntityValidation },

    #[error("Entity '{key}' references unregistered validation tag '{tag}'")]
    InvalidDescriptor {
        key: EntityKey,
        tag: EntityValidation,
    },
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Catalog errors ───────────────────────────────────────────────
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    #[error("Unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Invalid setting {field}: {reason}")]
    InvalidSetting { field: String, reason: String },
}
