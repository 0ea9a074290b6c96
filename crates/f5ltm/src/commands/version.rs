//! Appliance version command.

use serde::Serialize;

use f5ltm_core::{NodeCreation, Session};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::Appliance;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct VersionInfo {
    version: String,
    node_creation: NodeCreation,
}

pub fn handle(session: &Session<Appliance>, global: &GlobalOpts) -> Result<(), CliError> {
    let info = VersionInfo {
        version: session.version().to_string(),
        node_creation: session.node_creation(),
    };
    let out = output::render_single(
        &global.format_or(OutputFormat::Table),
        &info,
        |i| format!("Version:       {}\nNode creation: {}", i.version, i.node_creation),
        |i| i.version.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
