//! Shared helpers for command handlers.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Read one resource from a JSON file.
pub fn read_resource<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| CliError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Echo the resource about to be applied on stderr, in canonical form.
pub fn echo_resource<T: Serialize>(global: &GlobalOpts, resource: &T) -> Result<(), CliError> {
    if !global.quiet {
        eprintln!("{}", output::render_json_pretty(resource)?);
    }
    Ok(())
}

pub fn not_found(resource_type: &str, identifier: &str, list_command: &str) -> CliError {
    CliError::NotFound {
        resource_type: resource_type.into(),
        identifier: identifier.into(),
        list_command: list_command.into(),
    }
}

/// Empty cells render as "-".
pub fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map_or_else(|| "-".into(), str::to_owned)
}
