// ── Purge ──
//
// Teardown of one organization in four best-effort phases: service
// accounts, users, roles, streams. A failed deletion is recorded and
// the sweep moves on; only a missing organization is a hard error,
// because there is nothing to tear down. Confirmation gates live in the
// CLI, not here.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::reconciler::Reconciler;

/// Roles every instance ships with. Never deleted.
pub const SYSTEM_ROLES: [&str; 6] = ["admin", "root", "editor", "viewer", "user", "member"];

/// Streams whose names start with this prefix are server-internal.
pub const RESERVED_STREAM_PREFIX: &str = "_";

/// The built-in meta organization; excluded from bulk teardown.
pub const META_ORG: &str = "_meta";

/// What one purge pass deleted, skipped, and failed to delete.
#[derive(Debug, Clone, Serialize)]
pub struct PurgeSummary {
    pub org: String,
    /// Deleted counts, per phase.
    pub service_accounts: usize,
    pub users: usize,
    pub roles: usize,
    pub streams: usize,
    /// Resources left alone on purpose (admin user, system roles,
    /// internal streams).
    pub skipped: usize,
    /// One line per deletion or listing that failed.
    pub failures: Vec<String>,
}

impl PurgeSummary {
    fn empty(org: &str) -> Self {
        Self {
            org: org.to_owned(),
            service_accounts: 0,
            users: 0,
            roles: 0,
            streams: 0,
            skipped: 0,
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    #[must_use]
    pub fn deleted(&self) -> usize {
        self.service_accounts + self.users + self.roles + self.streams
    }
}

fn is_system_role(name: &str) -> bool {
    SYSTEM_ROLES.iter().any(|role| role.eq_ignore_ascii_case(name))
}

impl Reconciler {
    /// Delete everything user-created in one organization.
    pub async fn purge_org(&self, name: &str) -> Result<PurgeSummary, CoreError> {
        let org_id = self
            .resolve_org_id(name)
            .await?
            .ok_or_else(|| CoreError::OrgNotFound { name: name.to_owned() })?;

        info!("purging organization {name} ({org_id})");
        let mut summary = PurgeSummary::empty(name);

        self.purge_service_accounts(&org_id, &mut summary).await;
        self.purge_users(&org_id, &mut summary).await;
        self.purge_roles(&org_id, &mut summary).await;
        self.purge_streams(&org_id, &mut summary).await;

        info!(
            "purge of {name} done: {} deleted, {} skipped, {} failed",
            summary.deleted(),
            summary.skipped,
            summary.failures.len()
        );
        Ok(summary)
    }

    async fn purge_service_accounts(&self, org_id: &str, summary: &mut PurgeSummary) {
        let accounts = match self.api.list_service_accounts(org_id).await {
            Ok(accounts) => accounts,
            Err(e) => {
                summary.failures.push(format!("list service accounts: {e}"));
                return;
            }
        };

        for account in accounts {
            let Some(key) = account.delete_key() else {
                summary.failures.push("service account with no email or name".to_owned());
                continue;
            };
            match self.api.delete_service_account(org_id, key).await {
                Ok(()) => summary.service_accounts += 1,
                Err(e) => {
                    warn!("delete service account {key}: {e}");
                    summary.failures.push(format!("service account {key}: {e}"));
                }
            }
        }
    }

    async fn purge_users(&self, org_id: &str, summary: &mut PurgeSummary) {
        let users = match self.api.list_users(org_id).await {
            Ok(users) => users,
            Err(e) => {
                summary.failures.push(format!("list users: {e}"));
                return;
            }
        };

        for user in users {
            if user.email.eq_ignore_ascii_case(self.api.admin_email()) {
                summary.skipped += 1;
                continue;
            }
            match self.api.delete_user(org_id, &user.email).await {
                Ok(()) => summary.users += 1,
                Err(e) => {
                    warn!("delete user {}: {e}", user.email);
                    summary.failures.push(format!("user {}: {e}", user.email));
                }
            }
        }
    }

    async fn purge_roles(&self, org_id: &str, summary: &mut PurgeSummary) {
        let roles = match self.api.list_roles(org_id).await {
            Ok(roles) => roles,
            Err(e) => {
                summary.failures.push(format!("list roles: {e}"));
                return;
            }
        };

        for entry in &roles {
            let Some(name) = entry.name() else { continue };
            if is_system_role(name) {
                summary.skipped += 1;
                continue;
            }
            match self.api.delete_role(org_id, name).await {
                Ok(()) => summary.roles += 1,
                Err(e) => {
                    warn!("delete role {name}: {e}");
                    summary.failures.push(format!("role {name}: {e}"));
                }
            }
        }
    }

    async fn purge_streams(&self, org_id: &str, summary: &mut PurgeSummary) {
        let streams = match self.api.list_streams(org_id).await {
            Ok(streams) => streams,
            Err(e) => {
                summary.failures.push(format!("list streams: {e}"));
                return;
            }
        };

        for stream in &streams {
            if stream.name.starts_with(RESERVED_STREAM_PREFIX) {
                summary.skipped += 1;
                continue;
            }
            match self.api.delete_stream(org_id, &stream.name).await {
                Ok(()) => summary.streams += 1,
                Err(e) => {
                    warn!("delete stream {}: {e}", stream.name);
                    summary.failures.push(format!("stream {}: {e}", stream.name));
                }
            }
        }
    }

    /// Names of every organization eligible for bulk teardown, which is
    /// all of them except the built-in meta org.
    pub async fn cleanup_targets(&self) -> Result<Vec<String>, CoreError> {
        let orgs = self.api.list_organizations().await?;
        Ok(orgs
            .iter()
            .filter_map(|org| org.name.as_deref())
            .filter(|name| *name != META_ORG)
            .map(str::to_owned)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_role_matching_ignores_case() {
        assert!(is_system_role("admin"));
        assert!(is_system_role("Admin"));
        assert!(is_system_role("VIEWER"));
        assert!(!is_system_role("log-reader"));
        assert!(!is_system_role(""));
    }

    #[test]
    fn summary_counts() {
        let mut summary = PurgeSummary::empty("team1");
        assert!(!summary.has_failures());
        assert_eq!(summary.deleted(), 0);

        summary.streams = 2;
        summary.users = 1;
        summary.failures.push("stream x: boom".to_owned());
        assert!(summary.has_failures());
        assert_eq!(summary.deleted(), 3);
    }
}
