//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text. Every runtime error exits with the same status.

use miette::Diagnostic;
use thiserror::Error;

use f5ltm_config::ConfigError;
use f5ltm_core::CoreError;

/// Process exit status for any runtime failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to appliance at {url}")]
    #[diagnostic(
        code(f5ltm::connection_failed),
        help(
            "{reason}\n\
             Check the address and port, or try --insecure (-k) for self-signed certificates."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(f5ltm::timeout),
        help("Increase the timeout with --timeout or check appliance responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(f5ltm::auth_failed),
        help(
            "{message}\n\
             Verify the username and password, or store a new one with: f5ltm config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(f5ltm::no_credentials),
        help(
            "Pass --user, configure one with: f5ltm config set username <NAME>\n\
             Or set the F5LTM_USER environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Appliance ────────────────────────────────────────────────────
    #[error("Cannot parse appliance version '{raw}'")]
    #[diagnostic(
        code(f5ltm::version),
        help("The appliance reported a version without a major.minor.patch part.")
    )]
    VersionParse { raw: String },

    #[error("{message}")]
    #[diagnostic(code(f5ltm::device))]
    Device { message: String },

    #[error("Unrecognised {kind} '{token}' returned by the appliance")]
    #[diagnostic(code(f5ltm::unknown_code))]
    UnknownCode { kind: String, token: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(f5ltm::not_found),
        help("Run: f5ltm {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(f5ltm::validation))]
    Validation { field: String, reason: String },

    #[error("Invalid JSON in {path}: {source}")]
    #[diagnostic(code(f5ltm::json), help("Compare the file with the output of `dump`."))]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(f5ltm::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: f5ltm config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No appliance address configured")]
    #[diagnostic(
        code(f5ltm::no_config),
        help(
            "Pass --bigip <HOST>, or create a profile with: f5ltm config init\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(f5ltm::config))]
    Config(Box<ConfigError>),

    #[error("Internal error: {0}")]
    #[diagnostic(code(f5ltm::internal))]
    Internal(String),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(f5ltm::io))]
    Io(#[from] std::io::Error),
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout => CliError::Timeout,
            CoreError::VersionParse { raw } => CliError::VersionParse { raw },
            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::UnknownCode { kind, token } => CliError::UnknownCode {
                kind: kind.into(),
                token,
            },
            CoreError::Device { message } => CliError::Device { message },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: "(see: f5ltm config profiles)".into(),
            },
            other => CliError::Config(Box::new(other)),
        }
    }
}
