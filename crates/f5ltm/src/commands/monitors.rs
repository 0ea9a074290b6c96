//! Health monitor command handlers (read-only).

use tabled::Tabled;

use f5ltm_core::{Monitor, Session};

use crate::cli::{GlobalOpts, MonitorsArgs, MonitorsCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{Appliance, util};

#[derive(Tabled)]
struct MonitorRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    monitor_type: String,
}

impl From<&Monitor> for MonitorRow {
    fn from(m: &Monitor) -> Self {
        Self {
            name: m.name.clone(),
            monitor_type: m.monitor_type.to_string(),
        }
    }
}

pub async fn handle(
    session: &Session<Appliance>,
    args: MonitorsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let monitors = session.monitors();
    match args.command {
        MonitorsCommand::List => {
            let all = monitors.find_all().await?;
            let out = output::render_list(
                &global.format_or(OutputFormat::Table),
                &all,
                |m| MonitorRow::from(m),
                |m| m.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MonitorsCommand::Dump { name } => {
            let monitor = monitors
                .find(&name)
                .await?
                .ok_or_else(|| util::not_found("monitor", &name, "monitors list"))?;
            let out = output::render_single(
                &global.format_or(OutputFormat::Json),
                &monitor,
                |m| format!("Name: {}\nType: {}", m.name, m.monitor_type),
                |m| m.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
