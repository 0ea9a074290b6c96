//! Pool command handlers.

use tabled::Tabled;

use f5ltm_core::{Pool, Session};

use crate::cli::{GlobalOpts, OutputFormat, PoolsArgs, PoolsCommand};
use crate::error::CliError;
use crate::output;

use super::{Appliance, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PoolRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "LB method")]
    lb_method: String,
    #[tabled(rename = "Members")]
    members: String,
    #[tabled(rename = "Monitors")]
    monitors: String,
}

impl From<&Pool> for PoolRow {
    fn from(p: &Pool) -> Self {
        Self {
            name: p.name.clone(),
            lb_method: p.load_balancing_method.to_string(),
            members: members(p, "\n"),
            monitors: p.monitors.iter().cloned().collect::<Vec<_>>().join("\n"),
        }
    }
}

fn members(p: &Pool, sep: &str) -> String {
    p.members
        .iter()
        .map(|m| format!("{}:{}", m.address, m.port))
        .collect::<Vec<_>>()
        .join(sep)
}

fn detail(p: &Pool) -> String {
    let monitors = p.monitors.iter().cloned().collect::<Vec<_>>().join(", ");
    [
        format!("Name:        {}", p.name),
        format!("LB method:   {}", p.load_balancing_method),
        format!("Members:     {}", util::or_dash(Some(&members(p, ", ")))),
        format!("Monitors:    {}", util::or_dash(Some(&monitors))),
        format!("Description: {}", util::or_dash(p.description.as_deref())),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session<Appliance>,
    args: PoolsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let pools = session.pools();
    match args.command {
        PoolsCommand::List => {
            let all = pools.find_all().await?;
            let out = output::render_list(
                &global.format_or(OutputFormat::Table),
                &all,
                |p| PoolRow::from(p),
                |p| p.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PoolsCommand::Dump { name } => {
            let pool = pools
                .find(&name)
                .await?
                .ok_or_else(|| util::not_found("pool", &name, "pools list"))?;
            let out = output::render_single(
                &global.format_or(OutputFormat::Json),
                &pool,
                detail,
                |p| p.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PoolsCommand::Apply { file } => {
            let pool: Pool = util::read_resource(&file)?;
            util::echo_resource(global, &pool)?;
            pools.apply(&pool).await?;
            output::success(
                global,
                &format!("Pool {} applied ({} members)", pool.name, pool.members.len()),
            );
            Ok(())
        }

        PoolsCommand::Delete { name } => {
            if !util::confirm(&format!("Delete pool '{name}'?"), global.yes)? {
                return Ok(());
            }
            pools.delete(&name).await?;
            output::success(global, &format!("Pool {name} deleted"));
            Ok(())
        }
    }
}
