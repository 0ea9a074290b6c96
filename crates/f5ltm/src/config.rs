//! CLI configuration -- thin wrapper around `f5ltm_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--bigip, --user, --password, ...).

use std::time::Duration;

use secrecy::SecretString;

use f5ltm_core::{SessionConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use f5ltm_config::{
    Config, DEFAULT_PORT, Profile, config_path, load_config, load_config_or_default,
    load_file_config_from, save_config_to, store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config
        .profile_name(global.profile.as_deref())
        .to_owned()
}

/// Build a `SessionConfig` from the config file, the active profile and flags.
///
/// Flags win over the profile. A profile requested with `--profile` must
/// exist; without one, flags alone are enough to connect.
pub fn resolve_session_config(global: &GlobalOpts) -> Result<SessionConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => Profile::default(),
    };

    // 1. Appliance address (flag > env > profile)
    let host = global
        .bigip
        .clone()
        .or_else(|| Some(profile.host.clone()).filter(|h| !h.trim().is_empty()))
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
    let port = global.port.or(profile.port).unwrap_or(DEFAULT_PORT);
    let url = f5ltm_config::appliance_url(&host, port)?;

    // 2. Credentials
    let username = global
        .user
        .clone()
        .or_else(|| profile.username.clone())
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;
    let password = resolve_password(global, &profile, &profile_name, &username, &host)?;

    // 3. TLS verification
    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        cfg.tls_for(&profile)
    };

    // 4. Timeout
    let timeout = global
        .timeout
        .map_or_else(|| cfg.timeout_for(&profile), Duration::from_secs);

    Ok(SessionConfig {
        url,
        username,
        password,
        tls,
        timeout,
    })
}

/// Flag (or `F5LTM_PASSWORD`), then keyring and profile, then a masked prompt.
fn resolve_password(
    global: &GlobalOpts,
    profile: &Profile,
    profile_name: &str,
    username: &str,
    host: &str,
) -> Result<SecretString, CliError> {
    if let Some(ref pw) = global.password {
        return Ok(SecretString::from(pw.clone()));
    }
    if let Ok(pw) = f5ltm_config::resolve_password(profile, profile_name) {
        return Ok(pw);
    }
    let pw = rpassword::prompt_password(format!("Password for {username}@{host}: "))?;
    Ok(SecretString::from(pw))
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
