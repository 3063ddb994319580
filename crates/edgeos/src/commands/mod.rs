//! Command dispatch: bridges CLI args -> core queries -> output formatting.

pub mod catalog;
pub mod config_cmd;
pub mod devices;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Catalog => catalog::handle_catalog(global),
        Command::Entities(args) => catalog::handle_entities(&args, global),
        Command::Platforms => catalog::handle_platforms(global),
        Command::Devices(args) => devices::handle(args, global),
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "completions are generated before dispatch".into(),
        }),
    }
}
