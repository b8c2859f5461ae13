//! Config subcommand handlers.

use dialoguer::{Input, Select};

use o2ctl_config::{self as config_file, Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
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

/// Replace plaintext passwords before display.
fn redact(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.admin_password.is_some() {
            profile.admin_password = Some("<redacted>".into());
        }
    }
    cfg
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config_file::config_path();
            eprintln!("o2ctl configuration wizard");
            eprintln!("  Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("local".into())
                .interact_text()
                .map_err(prompt_err)?;

            let url: String = Input::new()
                .with_prompt("Server URL")
                .default("http://127.0.0.1:5080".into())
                .interact_text()
                .map_err(prompt_err)?;

            let admin_email: String = Input::new()
                .with_prompt("Admin email")
                .default("admin@example.com".into())
                .interact_text()
                .map_err(prompt_err)?;

            let email_domain: String = Input::new()
                .with_prompt("Email domain for generated accounts")
                .default("example.com".into())
                .interact_text()
                .map_err(prompt_err)?;

            let password =
                rpassword::prompt_password("Admin password: ").map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "admin_password".into(),
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
                config_file::store_admin_password(&profile_name, &password)?;
                eprintln!("  ✓ Password stored in system keyring");
                None
            } else {
                Some(password)
            };

            let profile = Profile {
                url,
                admin_email,
                admin_password: password_field,
                admin_password_env: None,
                schema: "v2".into(),
                email_domain,
                ca_cert: None,
                insecure: None,
                timeout: None,
            };

            // Merge into any existing config rather than clobbering
            // other profiles.
            let mut cfg = config_file::load_config_or_default();
            cfg.default_profile = Some(profile_name.clone());
            cfg.profiles.insert(profile_name.clone(), profile);
            config_file::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: o2ctl show-all");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redact(config_file::load_config_or_default());
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|_| format!("{c:#?}")),
                |_| "config".into(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config_file::load_config_or_default();
            let default = config_file::default_profile_name(&cfg);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: o2ctl config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name.as_str() == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ──────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config_file::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound { name });
            }

            cfg.default_profile = Some(name.clone());
            config_file::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = config_file::load_config_or_default();
            let profile_name =
                profile.unwrap_or_else(|| config::active_profile_name(global, &cfg).to_owned());

            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound { name: profile_name });
            }

            let password =
                rpassword::prompt_password("Admin password: ").map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "admin_password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            config_file::store_admin_password(&profile_name, &password)?;
            eprintln!("✓ Password stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}
