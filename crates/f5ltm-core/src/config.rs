// ── Runtime connection configuration ──
//
// Describes *how* to reach an appliance. Carries credentials and transport
// tuning but never touches disk; the CLI builds a `SessionConfig` from its
// profile and flags and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Opt-in, for appliances with self-signed certificates.
    DangerAcceptInvalid,
}

/// Everything needed to open a [`Session`](crate::Session) against one appliance.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Appliance root URL (e.g. `https://10.0.0.245/`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}
