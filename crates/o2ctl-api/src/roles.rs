// Custom-role endpoints
//
// Grant payloads are encoded per schema generation before they reach
// these methods; see `schema::SchemaGeneration::encode_grants`.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ListPayload, RoleEntry, RolePayload};

impl ApiClient {
    /// List all roles in an organization.
    ///
    /// `GET /api/{org_id}/roles`
    ///
    /// Entries are bare name strings on some builds and objects on
    /// others; [`RoleEntry`] normalizes both.
    pub async fn list_roles(&self, org_id: &str) -> Result<Vec<RoleEntry>, Error> {
        let url = self.org_url(org_id, "roles");
        debug!("listing roles in {org_id}");
        let payload: ListPayload<RoleEntry> = self.get(url).await?;
        Ok(payload.into_vec())
    }

    /// Create a custom role with its full grant list.
    ///
    /// `POST /api/{org_id}/roles`
    pub async fn create_role(&self, org_id: &str, role: &RolePayload) -> Result<(), Error> {
        let url = self.org_url(org_id, "roles");
        debug!("creating role {} in {org_id}", role.role);
        self.post_unit(url, role).await
    }

    /// Replace a role's grant list, addressing the role by id or name.
    ///
    /// `PUT /api/{org_id}/roles/{key}`
    ///
    /// This is a full replacement -- the server does not merge grants.
    pub async fn update_role(
        &self,
        org_id: &str,
        key: &str,
        role: &RolePayload,
    ) -> Result<(), Error> {
        let url = self.org_url(org_id, &format!("roles/{key}"));
        debug!("updating role {key} in {org_id}");
        self.put_unit(url, role).await
    }

    /// Delete a custom role by name.
    ///
    /// `DELETE /api/{org_id}/roles/{name}`
    pub async fn delete_role(&self, org_id: &str, name: &str) -> Result<(), Error> {
        let url = self.org_url(org_id, &format!("roles/{name}"));
        debug!("deleting role {name} in {org_id}");
        self.delete(url).await
    }
}
