use thiserror::Error;

/// Top-level error type for the `o2ctl-api` crate.
///
/// Every HTTP status the reconciler cares about gets its own variant, so
/// callers branch on variants instead of re-parsing status codes.
/// `o2ctl-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Authenticated but not allowed (HTTP 403).
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    // ── Remote API ──────────────────────────────────────────────────
    /// Duplicate-create signal (HTTP 409). Callers decide whether this
    /// is a failure or an idempotent success.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Resource not found (HTTP 404).
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Any other non-2xx response, with the server's error detail.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with a body preview for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for the duplicate-create signal.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Returns `true` if the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if the server rejected the identifier form itself
    /// (unknown id or malformed path) rather than the operation.
    pub fn is_unknown_identifier(&self) -> bool {
        self.is_not_found() || matches!(self, Self::Api { status: 400, .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
