//! Command dispatch: bridges CLI args -> session mappers -> output formatting.

pub mod config_cmd;
pub mod monitors;
pub mod nodes;
pub mod pools;
pub mod rules;
pub mod util;
pub mod version;
pub mod virtual_servers;

use f5ltm_api::IControlClient;
use f5ltm_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// The device type every appliance-bound command runs against.
pub type Appliance = IControlClient;

/// Dispatch an appliance-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session<Appliance>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Nodes(args) => nodes::handle(session, args, global).await,
        Command::Pools(args) => pools::handle(session, args, global).await,
        Command::VirtualServers(args) => virtual_servers::handle(session, args, global).await,
        Command::Rules(args) => rules::handle(session, args, global).await,
        Command::Monitors(args) => monitors::handle(session, args, global).await,
        Command::Version => version::handle(session, global),
        // Config and Completions are handled before a session exists
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not need an appliance session".into(),
        )),
    }
}
