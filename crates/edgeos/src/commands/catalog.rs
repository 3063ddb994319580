//! Catalog, entity selection and platform handlers.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use edgeos_core::{EntityDescriptor, Platform, catalog, is_admin_level};

use crate::cli::{EntitiesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Validation")]
    validation: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Icon")]
    icon: String,
}

impl From<&Arc<EntityDescriptor>> for EntityRow {
    fn from(d: &Arc<EntityDescriptor>) -> Self {
        Self {
            key: d.key.to_string(),
            platform: d.platform().to_string(),
            device_type: d.device_type.to_string(),
            validation: d
                .entity_validation
                .map_or_else(|| "-".into(), |tag| tag.to_string()),
            category: d
                .entity_category
                .map_or_else(|| "-".into(), |c| c.to_string()),
            icon: d.icon.unwrap_or("-").into(),
        }
    }
}

#[derive(Clone, Serialize, Tabled)]
struct PlatformRow {
    #[tabled(rename = "Platform")]
    platform: Platform,
    #[tabled(rename = "Entities")]
    entities: usize,
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn handle_catalog(global: &GlobalOpts) -> Result<(), CliError> {
    let descriptors = catalog().descriptors();
    let out = output::render_list(&global.output, descriptors, |d| EntityRow::from(d), |d| {
        format!("{}.{}", d.platform(), d.key)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn handle_entities(args: &EntitiesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let platform = util::parse_platform(&args.platform)?;
    let device_type = util::parse_device_type(&args.device_type)?;

    let is_monitored = match &args.item {
        Some(item) => {
            let config = util::load_config(global)?;
            Some(config.integration.is_monitored(device_type, Some(item.as_str())))
        }
        None => args.monitored,
    };
    let is_admin = args
        .admin
        .or_else(|| is_admin_level(args.user_level.as_deref()));

    debug!(%platform, %device_type, ?is_monitored, ?is_admin, "selecting entities");
    let selected = catalog().select(platform, device_type, is_monitored, is_admin);

    let out = output::render_list(&global.output, &selected, |d| EntityRow::from(d), |d| {
        d.key.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn handle_platforms(global: &GlobalOpts) -> Result<(), CliError> {
    let catalog = catalog();
    let rows: Vec<PlatformRow> = catalog
        .platforms()
        .iter()
        .map(|&platform| PlatformRow {
            platform,
            entities: catalog
                .descriptors()
                .iter()
                .filter(|d| d.platform() == platform)
                .count(),
        })
        .collect();

    let out = output::render_list(&global.output, &rows, PlatformRow::clone, |r| {
        r.platform.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
