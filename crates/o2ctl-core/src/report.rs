// ── Reconcile outcome reporting ──
//
// Status strings are load-bearing: operators grep bootstrap reports for
// the exact literals, so `Outcome` serializes to the same strings the
// console shows. Failures carry their reason inline rather than as a
// separate field.

use std::fmt;

use serde::{Serialize, Serializer};

/// Password placeholder for users that already existed -- their real
/// password is not known and never echoed.
pub const EXISTING_PASSWORD: &str = "<Existing>";

/// Terminal status of one reconcile step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Settings applied. Streams only -- their create and update are
    /// indistinguishable by design.
    Ok,
    /// Settings rejected or unreachable. Streams only.
    Fail,
    /// The resource was created on this pass.
    Created,
    /// The resource was already present and needed nothing.
    Exists,
    /// The resource was present but drifted; it was corrected.
    Updated,
    /// The step failed, with the reason.
    Failed(String),
}

impl Outcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Fail | Self::Failed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK"),
            Self::Fail => f.write_str("FAIL"),
            Self::Created => f.write_str("Created"),
            Self::Exists => f.write_str("Exists"),
            Self::Updated => f.write_str("Updated"),
            Self::Failed(reason) => write!(f, "Failed: {reason}"),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

// ── Per-resource report rows ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct StreamReport {
    pub name: String,
    pub status: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleReport {
    pub name: String,
    pub status: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserReport {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// The generated password on creation, [`EXISTING_PASSWORD`] when
    /// the user predates this pass, absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub status: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceAccountReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    pub status: Outcome,
}

impl ServiceAccountReport {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: Some(email.into()),
            token: None,
            client_id: None,
            client_secret: None,
            status: Outcome::Exists,
        }
    }
}

/// Everything that happened for one organization.
///
/// An org that never resolved keeps all its sections empty -- the
/// report is the record of what was attempted, and nothing was.
#[derive(Debug, Clone, Serialize)]
pub struct OrgReport {
    pub org: String,
    pub streams: Vec<StreamReport>,
    pub roles: Vec<RoleReport>,
    pub users: Vec<UserReport>,
    pub service_accounts: Vec<ServiceAccountReport>,
}

impl OrgReport {
    pub fn empty(org: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            streams: Vec::new(),
            roles: Vec::new(),
            users: Vec::new(),
            service_accounts: Vec::new(),
        }
    }

    /// Whether any step in any section failed.
    pub fn has_failures(&self) -> bool {
        self.streams.iter().any(|s| s.status.is_failure())
            || self.roles.iter().any(|r| r.status.is_failure())
            || self.users.iter().any(|u| u.status.is_failure())
            || self.service_accounts.iter().any(|sa| sa.status.is_failure())
    }

    /// Whether nothing was attempted in any section, which is what an
    /// org that never resolved looks like.
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
            && self.roles.is_empty()
            && self.users.is_empty()
            && self.service_accounts.is_empty()
    }
}
