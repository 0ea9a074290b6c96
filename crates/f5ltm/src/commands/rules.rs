//! iRule command handlers (read-only).

use tabled::Tabled;

use f5ltm_core::{Rule, Session};

use crate::cli::{GlobalOpts, OutputFormat, RulesArgs, RulesCommand};
use crate::error::CliError;
use crate::output;

use super::{Appliance, util};

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Lines")]
    lines: usize,
}

pub async fn handle(
    session: &Session<Appliance>,
    args: RulesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let rules = session.rules();
    match args.command {
        RulesCommand::List => {
            let all = rules.find_all().await?;
            let out = output::render_list(
                &global.format_or(OutputFormat::Table),
                &all,
                |r| RuleRow {
                    name: r.name.clone(),
                    lines: r.code.lines().count(),
                },
                |r| r.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // The code itself unless a structured format was asked for.
        RulesCommand::Dump { name } => {
            let rule = rules
                .find(&name)
                .await?
                .ok_or_else(|| util::not_found("rule", &name, "rules list"))?;
            let out = output::render_single(
                &global.format_or(OutputFormat::Plain),
                &rule,
                |r: &Rule| r.code.clone(),
                |r| r.code.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
