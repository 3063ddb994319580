// ── Validation rules ──
//
// A validation tag on a descriptor gates whether the entity is exposed
// for the current session. Both inputs are tri-state: `None` means the
// caller does not know (or the flag does not apply).
//
// Truth table, pinned:
//
//   monitored       is_monitored == Some(true)   unset -> hidden
//   admin-only      is_admin == Some(true)       unset -> hidden
//   non-admin-only  is_admin != Some(true)       unset -> shown

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::trace;

use super::descriptor::EntityDescriptor;
use crate::error::CatalogError;

/// Predicate over `(is_monitored, is_admin)`. Must be pure and total.
pub type ValidationRule = fn(Option<bool>, Option<bool>) -> bool;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EntityValidation {
    /// Requires monitoring to be enabled for the device or interface.
    Monitored,
    /// Requires an admin session.
    AdminOnly,
    /// Requires a session that is not known to be admin.
    NonAdminOnly,
}

impl EntityValidation {
    /// The built-in rule for this tag.
    pub fn default_rule(self) -> ValidationRule {
        match self {
            Self::Monitored => requires_monitoring,
            Self::AdminOnly => requires_admin,
            Self::NonAdminOnly => requires_non_admin,
        }
    }
}

fn requires_monitoring(is_monitored: Option<bool>, _is_admin: Option<bool>) -> bool {
    is_monitored == Some(true)
}

fn requires_admin(_is_monitored: Option<bool>, is_admin: Option<bool>) -> bool {
    is_admin == Some(true)
}

fn requires_non_admin(_is_monitored: Option<bool>, is_admin: Option<bool>) -> bool {
    is_admin != Some(true)
}

/// Tag → rule table.
#[derive(Debug, Clone, Default)]
pub struct ValidationRegistry {
    rules: HashMap<EntityValidation, ValidationRule>,
}

impl ValidationRegistry {
    /// A registry with no rules. Mostly useful for building custom tables.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every tag bound to its [`default_rule`](EntityValidation::default_rule).
    pub fn standard() -> Self {
        EntityValidation::iter().fold(Self::empty(), |registry, tag| {
            registry.with_rule(tag, tag.default_rule())
        })
    }

    /// Bind (or rebind) `tag` to `rule`.
    pub fn with_rule(mut self, tag: EntityValidation, rule: ValidationRule) -> Self {
        self.rules.insert(tag, rule);
        self
    }

    pub fn contains(&self, tag: EntityValidation) -> bool {
        self.rules.contains_key(&tag)
    }

    pub fn lookup(&self, tag: EntityValidation) -> Result<ValidationRule, CatalogError> {
        self.rules
            .get(&tag)
            .copied()
            .ok_or(CatalogError::UnregisteredValidation { tag })
    }

    /// Whether `descriptor` may be exposed for the given session flags.
    /// Descriptors without a tag are always valid.
    pub fn is_valid(
        &self,
        descriptor: &EntityDescriptor,
        is_monitored: Option<bool>,
        is_admin: Option<bool>,
    ) -> Result<bool, CatalogError> {
        let Some(tag) = descriptor.entity_validation else {
            return Ok(true);
        };
        let rule = self.lookup(tag)?;
        let valid = rule(is_monitored, is_admin);
        trace!(key = %descriptor.key, %tag, ?is_monitored, ?is_admin, valid, "validated entity");
        Ok(valid)
    }
}
