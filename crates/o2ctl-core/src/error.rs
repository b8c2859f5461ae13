// ── Core error types ──
//
// User-facing errors from o2ctl-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures
// directly. The `From<o2ctl_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.
//
// Note that most reconcile failures never become errors at all: they
// land in report rows as statuses, and the batch keeps going. An error
// here means nothing further could sensibly happen.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Organization not found: {name}")]
    OrgNotFound { name: String },

    /// The org was created (or already present) but no listing yields
    /// its API identifier, so nothing inside it can be addressed.
    #[error("Cannot resolve an API identifier for organization {name}")]
    OrgUnresolved { name: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<o2ctl_api::Error> for CoreError {
    fn from(err: o2ctl_api::Error) -> Self {
        match err {
            o2ctl_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            o2ctl_api::Error::PermissionDenied { message } => {
                CoreError::PermissionDenied { message }
            }
            o2ctl_api::Error::Conflict { message } => CoreError::Api {
                message: format!("conflict: {message}"),
                status: Some(409),
            },
            o2ctl_api::Error::NotFound { message } => CoreError::NotFound { what: message },
            o2ctl_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            o2ctl_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else if e.status().map(|s| s.as_u16()) == Some(404) {
                    CoreError::NotFound {
                        what: e.url().map(|u| u.path().to_owned()).unwrap_or_default(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            o2ctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            o2ctl_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            o2ctl_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
