//! Profile and flag resolution.
//!
//! The config file crate knows nothing about CLI flags; this module
//! layers `GlobalOpts` overrides on top of the selected profile to
//! produce a runnable `InstanceConfig`.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use o2ctl_config::{Config, Profile};
use o2ctl_core::{InstanceConfig, SchemaGeneration, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile name in effect: `--profile` flag, then the config file's
/// `default_profile`, then "local".
pub fn active_profile_name<'a>(global: &'a GlobalOpts, config: &'a Config) -> &'a str {
    global
        .profile
        .as_deref()
        .unwrap_or_else(|| o2ctl_config::default_profile_name(config))
}

/// Build the instance connection from the active profile with CLI flag
/// overrides layered on top.
///
/// The password chain starts at `--admin-password` (clap also reads
/// `O2CTL_ADMIN_PASSWORD` into that flag) and falls back to the config
/// crate's env/keyring/plaintext chain.
pub fn resolve_instance(global: &GlobalOpts, config: &Config) -> Result<InstanceConfig, CliError> {
    let profile_name = active_profile_name(global, config).to_owned();
    let profile = o2ctl_config::select_profile(config, &profile_name)?;

    let url_str = global.url.as_deref().unwrap_or(&profile.url);
    let url: Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let schema_str = global.schema.as_deref().unwrap_or(&profile.schema);
    let schema = SchemaGeneration::parse(schema_str).ok_or_else(|| CliError::Validation {
        field: "schema".into(),
        reason: format!("expected 'v1' or 'v2', got '{schema_str}'"),
    })?;

    let admin_password = match &global.admin_password {
        Some(flag) => SecretString::from(flag.clone()),
        None => o2ctl_config::resolve_admin_password(profile, &profile_name)?,
    };

    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(config.defaults.timeout);

    Ok(InstanceConfig {
        url,
        admin_email: global
            .admin_email
            .clone()
            .unwrap_or_else(|| profile.admin_email.clone()),
        admin_password,
        schema,
        email_domain: profile.email_domain.clone(),
        tls: resolve_tls(global, profile, config),
        timeout: Duration::from_secs(timeout),
    })
}

fn resolve_tls(global: &GlobalOpts, profile: &Profile, config: &Config) -> TlsVerification {
    if global.insecure || profile.insecure.unwrap_or(config.defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    }
}
