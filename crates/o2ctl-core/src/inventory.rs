// ── Inventory ──
//
// Read-only scan across every organization. Listing failures inside an
// org degrade to empty sections rather than aborting the scan; this is
// an observation tool and must work against half-broken instances.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::purge::META_ORG;
use crate::reconciler::Reconciler;

/// Snapshot of one organization's managed resources.
#[derive(Debug, Clone, Serialize)]
pub struct OrgInventory {
    pub name: String,
    pub id: String,
    pub streams: Vec<String>,
    pub roles: Vec<String>,
    /// `email (role)` per user.
    pub users: Vec<String>,
    pub service_accounts: Vec<String>,
}

impl Reconciler {
    /// Scan every organization except the built-in meta org.
    ///
    /// Orgs the listing returns without a usable identifier are skipped
    /// outright; nothing below them can be addressed.
    pub async fn inventory(&self) -> Result<Vec<OrgInventory>, CoreError> {
        let orgs = self.api.list_organizations().await?;

        let mut overview = Vec::new();
        for org in &orgs {
            let Some(name) = org.name.as_deref() else { continue };
            if name == META_ORG {
                continue;
            }
            let Some(org_id) = org.org_id() else { continue };

            debug!("scanning {name} ({org_id})");
            overview.push(self.scan_org(name, org_id).await);
        }
        Ok(overview)
    }

    async fn scan_org(&self, name: &str, org_id: &str) -> OrgInventory {
        let streams = self
            .api
            .list_streams(org_id)
            .await
            .map_err(|e| warn!("list streams for {name}: {e}"))
            .unwrap_or_default();
        let roles = self
            .api
            .list_roles(org_id)
            .await
            .map_err(|e| warn!("list roles for {name}: {e}"))
            .unwrap_or_default();
        let users = self
            .api
            .list_users(org_id)
            .await
            .map_err(|e| warn!("list users for {name}: {e}"))
            .unwrap_or_default();
        let accounts = self
            .api
            .list_service_accounts(org_id)
            .await
            .map_err(|e| warn!("list service accounts for {name}: {e}"))
            .unwrap_or_default();

        OrgInventory {
            name: name.to_owned(),
            id: org_id.to_owned(),
            streams: streams.iter().map(|s| s.name.clone()).collect(),
            roles: roles.iter().map(|r| r.name().unwrap_or("unknown").to_owned()).collect(),
            users: users
                .iter()
                .map(|u| format!("{} ({})", u.email, u.role.as_deref().unwrap_or("unknown")))
                .collect(),
            service_accounts: accounts.iter().filter_map(|sa| sa.name.clone()).collect(),
        }
    }
}
