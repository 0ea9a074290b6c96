//! Config subcommand handlers.

use std::path::Path;

use dialoguer::{Confirm, Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expected}"),
    })
}

/// Copy of `cfg` safe to print: plaintext passwords are masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("********".into());
        }
    }
    cfg
}

/// Apply `key = value` to `profile`.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "host" | "bigip" => profile.host = value,
        "port" => profile.port = Some(parse_field("port", &value, "a port number")?),
        "username" | "user" => profile.username = Some(value),
        "password" => profile.password = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => profile.insecure = Some(parse_field("insecure", &value, "'true' or 'false'")?),
        "timeout" => profile.timeout = Some(parse_field("timeout", &value, "a number (seconds)")?),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: host, port, username, \
                     password, ca_cert, insecure, timeout"
                ),
            });
        }
    }
    Ok(())
}

/// Load the stored config at `path`, apply `change`, write it back.
///
/// Nothing is written if the file cannot be read or `change` fails.
fn edit_config_at<T>(
    path: &Path,
    change: impl FnOnce(&mut Config) -> Result<T, CliError>,
) -> Result<T, CliError> {
    let mut cfg = config::load_file_config_from(path)?;
    let out = change(&mut cfg)?;
    config::save_config_to(&cfg, path)?;
    Ok(out)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            // Fail before prompting if the existing file is unusable.
            config::load_file_config_from(&config_path)?;
            eprintln!("f5ltm configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let host: String = Input::new()
                .with_prompt("Appliance address")
                .interact_text()
                .map_err(prompt_err)?;

            let port: u16 = Input::new()
                .with_prompt("Management port")
                .default(config::DEFAULT_PORT)
                .interact_text()
                .map_err(prompt_err)?;

            let username: String = Input::new()
                .with_prompt("Username")
                .default("admin".into())
                .interact_text()
                .map_err(prompt_err)?;

            let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            let store_choices = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
            ];
            let store_selection = Select::new()
                .with_prompt("Where to store the password?")
                .items(store_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let password_field = if store_selection == 0 {
                config::store_password(&profile_name, &password)?;
                eprintln!("   ✓ Password stored in system keyring");
                None
            } else {
                Some(password)
            };

            let insecure = Confirm::new()
                .with_prompt("Accept the appliance's self-signed certificate?")
                .default(true)
                .interact()
                .map_err(prompt_err)?;

            edit_config_at(&config_path, |cfg| {
                cfg.profiles.insert(profile_name.clone(), Profile {
                    host,
                    port: (port != config::DEFAULT_PORT).then_some(port),
                    username: Some(username),
                    password: password_field,
                    ca_cert: None,
                    insecure: Some(insecure),
                    timeout: None,
                });
                cfg.default_profile = Some(profile_name.clone());
                Ok(())
            })?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: f5ltm version");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(
                &global.format_or(OutputFormat::Yaml),
                &cfg,
                |c| format!("{c:#?}"),
                |_| config::config_path().display().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let profile_name = edit_config_at(&config::config_path(), |cfg| {
                let profile_name = config::active_profile_name(global, cfg);
                set_key(cfg.profiles.entry(profile_name.clone()).or_default(), &key, value)?;
                Ok(profile_name)
            })?;
            output::success(global, &format!("Set {key} on profile '{profile_name}'"));
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: f5ltm config init");
            } else {
                for (name, profile) in &cfg.profiles {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}\t{}", profile.host);
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            edit_config_at(&config::config_path(), |cfg| {
                if !cfg.profiles.contains_key(&name) {
                    return Err(CliError::ProfileNotFound {
                        available: config::available_profiles(cfg),
                        name: name.clone(),
                    });
                }
                cfg.default_profile = Some(name.clone());
                Ok(())
            })?;
            output::success(global, &format!("Default profile set to '{name}'"));
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { name } => {
            let cfg = config::load_config()?;
            let profile_name = name.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let secret = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }
            config::store_password(&profile_name, &secret)?;

            output::success(
                global,
                &format!("Password stored in system keyring for profile '{profile_name}'"),
            );
            Ok(())
        }
    }
}
