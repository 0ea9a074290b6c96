//! Clap derive structures for the `f5ltm` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// f5ltm -- manage BIG-IP LTM nodes, pools and virtual servers
#[derive(Debug, Parser)]
#[command(
    name = "f5ltm",
    version,
    about = "Manage F5 BIG-IP Local Traffic Manager objects from the command line",
    long_about = "Reads and writes BIG-IP LTM nodes, pools and virtual servers over the\n\
        iControl SOAP API, and lists iRules and health monitors.\n\n\
        Resources are exchanged as JSON: `dump` prints a resource, `apply`\n\
        creates or updates one from a file.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Appliance address: hostname, IP or URL (overrides profile)
    #[arg(long, short = 'b', env = "F5LTM_BIGIP", global = true)]
    pub bigip: Option<String>,

    /// Management port [default: 443]
    #[arg(long, env = "F5LTM_PORT", global = true)]
    pub port: Option<u16>,

    /// Username (overrides profile)
    #[arg(long, short = 'u', env = "F5LTM_USER", global = true)]
    pub user: Option<String>,

    /// Password; prompted for when not given
    #[arg(long, env = "F5LTM_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Configuration profile to use
    #[arg(long, short = 'p', env = "F5LTM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format [default: table for lists, json for dumps]
    #[arg(long, short = 'o', env = "F5LTM_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "F5LTM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "F5LTM_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

impl GlobalOpts {
    /// The selected output format, or `fallback` when none was given.
    pub fn format_or(&self, fallback: OutputFormat) -> OutputFormat {
        self.output.clone().unwrap_or(fallback)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table
    Table,
    /// Pretty-printed JSON (interchange format)
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage nodes (backend addresses)
    #[command(alias = "node", alias = "n")]
    Nodes(NodesArgs),

    /// Manage pools and their members
    #[command(alias = "pool")]
    Pools(PoolsArgs),

    /// Manage virtual servers
    #[command(alias = "vs")]
    VirtualServers(VirtualServersArgs),

    /// View iRules
    #[command(alias = "rule")]
    Rules(RulesArgs),

    /// View health monitor templates
    #[command(alias = "monitor")]
    Monitors(MonitorsArgs),

    /// Show the appliance software version
    Version,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NODES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NodesArgs {
    #[command(subcommand)]
    pub command: NodesCommand,
}

#[derive(Debug, Subcommand)]
pub enum NodesCommand {
    /// List all nodes
    #[command(alias = "ls")]
    List,

    /// Print one node as JSON
    Dump {
        /// Node address
        address: String,
    },

    /// Create or update a node from a JSON file
    Apply {
        /// JSON file holding one node
        file: PathBuf,
    },

    /// Delete a node
    #[command(alias = "rm")]
    Delete {
        /// Node address
        address: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  POOLS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PoolsArgs {
    #[command(subcommand)]
    pub command: PoolsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PoolsCommand {
    /// List all pools with their members
    #[command(alias = "ls")]
    List,

    /// Print one pool as JSON
    Dump {
        /// Pool name, e.g. /Common/WebPool
        name: String,
    },

    /// Create a pool, or replace an existing one, from a JSON file
    Apply {
        /// JSON file holding one pool
        file: PathBuf,
    },

    /// Delete a pool
    #[command(alias = "rm")]
    Delete {
        /// Pool name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VIRTUAL SERVERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VirtualServersArgs {
    #[command(subcommand)]
    pub command: VirtualServersCommand,
}

#[derive(Debug, Subcommand)]
pub enum VirtualServersCommand {
    /// List all virtual servers
    #[command(alias = "ls")]
    List,

    /// Print one virtual server as JSON
    Dump {
        /// Virtual server name
        name: String,
    },

    /// Recreate a virtual server from a JSON file
    Apply {
        /// JSON file holding one virtual server
        file: PathBuf,
    },

    /// Delete a virtual server
    #[command(alias = "rm")]
    Delete {
        /// Virtual server name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RULES & MONITORS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    /// List iRule names
    #[command(alias = "ls")]
    List,

    /// Print the code of one iRule
    Dump {
        /// iRule name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct MonitorsArgs {
    #[command(subcommand)]
    pub command: MonitorsCommand,
}

#[derive(Debug, Subcommand)]
pub enum MonitorsCommand {
    /// List monitor templates
    #[command(alias = "ls")]
    List,

    /// Print one monitor template
    Dump {
        /// Template name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG & COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// One of: host, port, username, password, ca_cert, insecure, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name (defaults to the active profile)
        name: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
