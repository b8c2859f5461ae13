// ── Runtime connection configuration ──
//
// These types describe *how* to reach an OpenObserve instance. They
// carry credential data and connection tuning, but never touch disk --
// the CLI resolves profiles and flags into an `InstanceConfig` and
// hands it in.

use std::time::Duration;

use o2ctl_api::SchemaGeneration;
use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// System CA store (strict). The default -- instances are plain
    /// HTTP or properly certificated.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (lab instances behind self-signed ingress).
    DangerAcceptInvalid,
}

/// Configuration for one OpenObserve instance connection.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    /// Server root URL (e.g. `http://127.0.0.1:5080`).
    pub url: Url,
    /// Admin login used for HTTP basic auth on every call.
    pub admin_email: String,
    pub admin_password: SecretString,
    /// Wire-schema generation the server speaks.
    pub schema: SchemaGeneration,
    /// Domain for derived addresses (service accounts, sample users).
    pub email_domain: String,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}
