//! Config subcommand handlers.

use std::path::Path;

use edgeos_config::{Config, save_config_to};
use edgeos_core::MacAddress;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

fn monitored_list<'a>(entries: impl Iterator<Item = (&'a String, &'a bool)>) -> String {
    let enabled: Vec<&str> = entries
        .filter(|(_, on)| **on)
        .map(|(id, _)| id.as_str())
        .collect();
    if enabled.is_empty() {
        "-".into()
    } else {
        enabled.join(", ")
    }
}

fn detail(cfg: &Config, path: &Path) -> String {
    let settings = &cfg.integration;
    [
        format!("Config file:              {}", path.display()),
        format!("Output:                   {}", cfg.defaults.output),
        format!("Color:                    {}", cfg.defaults.color),
        format!("Unit:                     {}", settings.unit),
        format!("Consider away interval:   {}s", settings.consider_away_interval),
        format!("Update entities interval: {}s", settings.update_entities_interval),
        format!("Update API interval:      {}s", settings.update_api_interval),
        format!("Log incoming messages:    {}", settings.log_incoming_messages),
        format!(
            "Monitored devices:        {}",
            monitored_list(settings.monitored_devices.iter())
        ),
        format!(
            "Monitored interfaces:     {}",
            monitored_list(settings.monitored_interfaces.iter())
        ),
    ]
    .join("\n")
}

fn saved(path: &Path, global: &GlobalOpts) {
    if !global.quiet {
        eprintln!("Saved {}", path.display());
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = util::config_path(global);

    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = util::load_config(global)?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| detail(c, &path),
                |_| path.display().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            save_config_to(&Config::default(), &path)?;
            saved(&path, global);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = util::load_config(global)?;
            cfg.integration.set_value(&key, &value)?;
            save_config_to(&cfg, &path)?;
            saved(&path, global);
            Ok(())
        }

        ConfigCommand::Monitor { kind, id, enabled } => {
            let mut cfg = util::load_config(global)?;
            match kind.as_str() {
                "device" => cfg
                    .integration
                    .set_monitored_device(&MacAddress::new(&id), enabled),
                "interface" => cfg.integration.set_monitored_interface(&id, enabled),
                other => {
                    return Err(CliError::Validation {
                        field: "kind".into(),
                        reason: format!("expected 'device' or 'interface', got '{other}'"),
                    });
                }
            }
            save_config_to(&cfg, &path)?;
            saved(&path, global);
            Ok(())
        }
    }
}
