//! Virtual server command handlers.

use tabled::Tabled;

use f5ltm_core::{Session, VirtualServer};

use crate::cli::{GlobalOpts, OutputFormat, VirtualServersArgs, VirtualServersCommand};
use crate::error::CliError;
use crate::output;

use super::{Appliance, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VirtualServerRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Pool")]
    pool: String,
    #[tabled(rename = "SNAT")]
    snat: String,
}

impl From<&VirtualServer> for VirtualServerRow {
    fn from(v: &VirtualServer) -> Self {
        Self {
            name: v.name.clone(),
            destination: format!("{}:{}", v.address, v.port),
            protocol: v.protocol.to_string(),
            pool: util::or_dash(Some(&v.default_pool_name)),
            snat: v.snat_type.to_string(),
        }
    }
}

fn detail(v: &VirtualServer) -> String {
    let profiles = v
        .profiles
        .iter()
        .map(|p| format!("{} ({})", p.name, p.context))
        .collect::<Vec<_>>()
        .join(", ");
    let vlans = if v.vlans.is_empty() {
        "all".to_owned()
    } else {
        v.vlans.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    [
        format!("Name:        {}", v.name),
        format!("Destination: {}:{}", v.address, v.port),
        format!("Protocol:    {}", v.protocol),
        format!("Pool:        {}", util::or_dash(Some(&v.default_pool_name))),
        format!("Profiles:    {}", util::or_dash(Some(&profiles))),
        format!("VLANs:       {vlans}"),
        format!("SNAT:        {}", v.snat_type),
        format!("Description: {}", util::or_dash(v.description.as_deref())),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session<Appliance>,
    args: VirtualServersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let servers = session.virtual_servers();
    match args.command {
        VirtualServersCommand::List => {
            let all = servers.find_all().await?;
            let out = output::render_list(
                &global.format_or(OutputFormat::Table),
                &all,
                |v| VirtualServerRow::from(v),
                |v| v.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VirtualServersCommand::Dump { name } => {
            let vs = servers
                .find(&name)
                .await?
                .ok_or_else(|| util::not_found("virtual server", &name, "virtual-servers list"))?;
            let out = output::render_single(
                &global.format_or(OutputFormat::Json),
                &vs,
                detail,
                |v| v.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VirtualServersCommand::Apply { file } => {
            let vs: VirtualServer = util::read_resource(&file)?;
            util::echo_resource(global, &vs)?;
            servers.apply(&vs).await?;
            output::success(global, &format!("Virtual server {} applied", vs.name));
            Ok(())
        }

        VirtualServersCommand::Delete { name } => {
            if !util::confirm(&format!("Delete virtual server '{name}'?"), global.yes)? {
                return Ok(());
            }
            servers.delete(&name).await?;
            output::success(global, &format!("Virtual server {name} deleted"));
            Ok(())
        }
    }
}
