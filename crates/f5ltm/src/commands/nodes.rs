//! Node command handlers.

use tabled::Tabled;

use f5ltm_core::{Node, Session};

use crate::cli::{GlobalOpts, NodesArgs, NodesCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{Appliance, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Connection limit")]
    connection_limit: u64,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Node> for NodeRow {
    fn from(n: &Node) -> Self {
        Self {
            name: n.name.clone(),
            address: n.address.clone(),
            connection_limit: n.connection_limit,
            description: util::or_dash(n.description.as_deref()),
        }
    }
}

fn detail(n: &Node) -> String {
    [
        format!("Name:             {}", n.name),
        format!("Address:          {}", n.address),
        format!("Connection limit: {}", n.connection_limit),
        format!("Description:      {}", util::or_dash(n.description.as_deref())),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session<Appliance>,
    args: NodesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let nodes = session.nodes();
    match args.command {
        NodesCommand::List => {
            let all = nodes.find_all().await?;
            let out = output::render_list(
                &global.format_or(OutputFormat::Table),
                &all,
                |n| NodeRow::from(n),
                |n| n.address.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NodesCommand::Dump { address } => {
            let node = nodes
                .find(&address)
                .await?
                .ok_or_else(|| util::not_found("node", &address, "nodes list"))?;
            let out = output::render_single(
                &global.format_or(OutputFormat::Json),
                &node,
                detail,
                |n| n.address.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NodesCommand::Apply { file } => {
            let node: Node = util::read_resource(&file)?;
            util::echo_resource(global, &node)?;
            nodes.apply(&node).await?;
            output::success(global, &format!("Node {} applied", node.address));
            Ok(())
        }

        NodesCommand::Delete { address } => {
            if !util::confirm(&format!("Delete node '{address}'?"), global.yes)? {
                return Ok(());
            }
            nodes.delete(&address).await?;
            output::success(global, &format!("Node {address} deleted"));
            Ok(())
        }
    }
}
