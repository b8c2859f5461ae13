//! Configuration for the o2ctl CLI.
//!
//! TOML profiles, credential resolution (keyring + env + plaintext),
//! and bootstrap-plan overrides. A built-in `local` profile matches a
//! stock single-node dev install, so the tool works with no config
//! file at all.

use std::collections::HashMap;
use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use o2ctl_core::DesiredOrg;
use o2ctl_core::plan::default_org_names;

/// Environment variable consulted for the admin password when the
/// profile names no other source.
pub const PASSWORD_ENV: &str = "O2CTL_ADMIN_PASSWORD";

/// Keyring service name for stored secrets.
const KEYRING_SERVICE: &str = "o2ctl";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no admin password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("unknown profile '{name}' (run `o2ctl config profiles`)")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

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
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Desired-state plan for `bootstrap`; the standard org set when
    /// absent.
    pub bootstrap: Option<BootstrapSection>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("local".into()),
            defaults: Defaults::default(),
            profiles: HashMap::from([("local".into(), Profile::local())]),
            bootstrap: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named server profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Server base URL (e.g., "http://127.0.0.1:5080").
    pub url: String,

    /// Administrator login email.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Admin password (plaintext -- prefer keyring or env var).
    pub admin_password: Option<String>,

    /// Environment variable name containing the admin password.
    pub admin_password_env: Option<String>,

    /// Grant-encoding generation the server speaks: "v1" or "v2".
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Domain for generated service-account emails.
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

impl Profile {
    /// The built-in profile for a stock local dev install.
    pub fn local() -> Self {
        Self {
            url: "http://127.0.0.1:5080".into(),
            admin_email: default_admin_email(),
            admin_password: Some("ComplexPassword123!".into()),
            admin_password_env: None,
            schema: default_schema(),
            email_domain: default_email_domain(),
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

fn default_admin_email() -> String {
    "admin@example.com".into()
}
fn default_schema() -> String {
    "v2".into()
}
fn default_email_domain() -> String {
    "example.com".into()
}

/// `[bootstrap]` section: the org set `bootstrap` reconciles.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct BootstrapSection {
    #[serde(default)]
    pub orgs: Vec<DesiredOrg>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "o2ctl", "o2ctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("o2ctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from built-ins + file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("O2CTL_CONFIG_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning the built-in default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Profile selection ───────────────────────────────────────────────

/// The profile name to use when no flag or env override names one.
#[must_use]
pub fn default_profile_name(config: &Config) -> &str {
    config.default_profile.as_deref().unwrap_or("local")
}

/// Look up a profile by name.
pub fn select_profile<'a>(config: &'a Config, name: &str) -> Result<&'a Profile, ConfigError> {
    config
        .profiles
        .get(name)
        .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the admin password from the credential chain (no CLI flag
/// step): profile-named env var, `O2CTL_ADMIN_PASSWORD`, keyring,
/// plaintext config.
pub fn resolve_admin_password(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's admin_password_env → env var lookup
    if let Some(ref env_name) = profile.admin_password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Well-known env var
    if let Ok(val) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_key(profile_name)) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(ref password) = profile.admin_password {
        return Ok(SecretString::from(password.clone()));
    }

    Err(ConfigError::NoCredentials { profile: profile_name.into() })
}

/// Store the admin password for a profile in the system keyring.
pub fn store_admin_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_key(profile_name))?;
    entry.set_password(password)?;
    Ok(())
}

fn keyring_key(profile_name: &str) -> String {
    format!("{profile_name}/admin-password")
}

// ── Bootstrap plan ──────────────────────────────────────────────────

/// The org set `bootstrap` reconciles: the `[bootstrap]` section when
/// one is configured, otherwise the standard platform layout.
#[must_use]
pub fn bootstrap_plan(config: &Config) -> Vec<DesiredOrg> {
    match &config.bootstrap {
        Some(section) if !section.orgs.is_empty() => section.orgs.clone(),
        _ => default_org_names().into_iter().map(DesiredOrg::standard).collect(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn built_in_local_profile_matches_a_stock_install() {
        let config = Config::default();
        assert_eq!(default_profile_name(&config), "local");

        let profile = select_profile(&config, "local").unwrap();
        assert_eq!(profile.url, "http://127.0.0.1:5080");
        assert_eq!(profile.admin_email, "admin@example.com");
        assert_eq!(profile.schema, "v2");
        assert_eq!(profile.email_domain, "example.com");
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let config = Config::default();
        let err = select_profile(&config, "prod").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { ref name } if name == "prod"));
    }

    #[test]
    fn profile_toml_fills_defaults() {
        let profile: Profile = toml::from_str(r#"url = "https://logs.internal:5080""#).unwrap();
        assert_eq!(profile.admin_email, "admin@example.com");
        assert_eq!(profile.schema, "v2");
        assert_eq!(profile.email_domain, "example.com");
        assert_eq!(profile.admin_password, None);
        assert_eq!(profile.timeout, None);
    }

    #[test]
    fn plaintext_password_resolves_through_the_chain() {
        let profile = Profile {
            admin_password: Some("hunter2".into()),
            ..Profile::local()
        };
        let secret = resolve_admin_password(&profile, "scratch-profile").unwrap();
        use secrecy::ExposeSecret;
        assert_eq!(secret.expose_secret(), "hunter2");
    }

    #[test]
    fn bootstrap_section_overrides_the_standard_plan() {
        let config: Config = toml::from_str(
            r#"
            [[bootstrap.orgs]]
            name = "acme"

            [[bootstrap.orgs]]
            name = "widgets"
            streams = [{ name = "audit", retention_hours = 2160 }]
            users = [{ email = "ops@widgets.dev", role = "admin" }]
            "#,
        )
        .unwrap();

        let plan = bootstrap_plan(&config);
        assert_eq!(plan.len(), 2);

        // A bare name gets the full standard layout.
        assert_eq!(plan[0].name, "acme");
        assert_eq!(plan[0].streams.len(), 3);
        assert_eq!(plan[0].service_accounts[0].name, "sa-gitops");

        // Explicit sections replace the defaults they name.
        assert_eq!(plan[1].streams.len(), 1);
        assert_eq!(plan[1].streams[0].retention_hours, 2160);
        assert_eq!(plan[1].users[0].email, "ops@widgets.dev");
    }

    #[test]
    fn default_bootstrap_plan_covers_the_platform_orgs() {
        let plan = bootstrap_plan(&Config::default());
        let names: Vec<_> = plan.iter().map(|org| org.name.as_str()).collect();
        assert_eq!(names, ["platform_observability", "platform_kubernetes", "team1", "team2"]);
    }
}
