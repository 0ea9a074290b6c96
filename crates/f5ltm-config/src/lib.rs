//! Shared configuration for the f5ltm CLI.
//!
//! TOML profiles, password resolution (env + keyring + plaintext), and
//! translation to `f5ltm_core::SessionConfig`. The CLI layers its global
//! flags on top of what this crate resolves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use f5ltm_api::IControlClient;
use f5ltm_core::{SessionConfig, TlsVerification};

/// Keyring service name under which passwords are stored.
pub const KEYRING_SERVICE: &str = "f5ltm";

/// Environment variable consulted before the keyring.
pub const PASSWORD_ENV: &str = "F5LTM_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named appliance profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named appliance profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Management address: hostname, IP, or full URL.
    pub host: String,

    /// Management port; 443 when unset.
    pub port: Option<u16>,

    pub username: Option<String>,

    /// Plaintext password. Prefer the keyring (`config set-password`).
    pub password: Option<String>,

    /// Path to a CA certificate for strict verification.
    pub ca_cert: Option<PathBuf>,

    /// Override `defaults.insecure`.
    pub insecure: Option<bool>,

    /// Override `defaults.timeout`.
    pub timeout: Option<u64>,
}

pub const DEFAULT_PORT: u16 = 443;

impl Profile {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

impl Config {
    /// The profile to use: `requested`, else `default_profile`, else "default".
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }

    /// Effective TLS mode for `profile`: a CA file wins, then `insecure`.
    pub fn tls_for(&self, profile: &Profile) -> TlsVerification {
        if let Some(ref ca) = profile.ca_cert {
            TlsVerification::CustomCa(ca.clone())
        } else if profile.insecure.unwrap_or(self.defaults.insecure) {
            TlsVerification::DangerAcceptInvalid
        } else {
            TlsVerification::SystemDefaults
        }
    }

    pub fn timeout_for(&self, profile: &Profile) -> Duration {
        Duration::from_secs(profile.timeout.unwrap_or(self.defaults.timeout))
    }

    /// Build a `SessionConfig` from a stored profile, no flag overrides.
    pub fn session_config(&self, profile_name: &str) -> Result<SessionConfig, ConfigError> {
        let profile = self.profile(profile_name)?;
        let username = profile
            .username
            .clone()
            .ok_or_else(|| ConfigError::Validation {
                field: "username".into(),
                reason: format!("profile '{profile_name}' has no username"),
            })?;

        Ok(SessionConfig {
            url: appliance_url(&profile.host, profile.port())?,
            username,
            password: resolve_password(profile, profile_name)?,
            tls: self.tls_for(profile),
            timeout: self.timeout_for(profile),
        })
    }
}

/// Parse a management address into the appliance root URL.
pub fn appliance_url(host: &str, port: u16) -> Result<url::Url, ConfigError> {
    if host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "no appliance address given".into(),
        });
    }
    IControlClient::appliance_url(host, port).map_err(|e| ConfigError::Validation {
        field: "host".into(),
        reason: format!("{host}: {e}"),
    })
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "f5ltm", "f5ltm").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("f5ltm");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading & saving ────────────────────────────────────────────────

/// Load the config from the canonical path plus `F5LTM_` environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path`. A missing file yields the defaults.
///
/// Environment keys nest with a double underscore, e.g.
/// `F5LTM_DEFAULTS__TIMEOUT=60` or `F5LTM_DEFAULT_PROFILE=lab`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = file_figment(path).merge(Env::prefixed("F5LTM_").split("__"));
    Ok(figment.extract()?)
}

/// Load only what is stored in the config file, without `F5LTM_` overrides.
pub fn load_file_config() -> Result<Config, ConfigError> {
    load_file_config_from(&config_path())
}

/// Defaults plus the TOML file at `path`. Start from this before rewriting
/// the file: environment overrides never get persisted, and a file that
/// fails to parse is reported rather than replaced.
pub fn load_file_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(file_figment(path).extract()?)
}

fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

/// Load config, falling back to defaults on any error. Read-only use only.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize `cfg` as TOML to `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Password resolution ─────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/password"),
    )?)
}

/// Resolve a password without CLI flags: env, then keyring, then plaintext.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store `password` in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}
