// Organization endpoints
//
// Org management is server-scoped (`/api/organizations`), unlike every
// other resource which lives under `/api/{org_id}/...`.

use tracing::debug;

use crate::client::{ApiClient, decode_body};
use crate::error::Error;
use crate::models::{CreatedOrgPayload, ListPayload, Organization};

impl ApiClient {
    /// List all organizations visible to the admin identity.
    ///
    /// `GET /api/organizations`
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, Error> {
        let url = self.api_url("organizations");
        debug!("listing organizations");
        let payload: ListPayload<Organization> = self.get(url).await?;
        Ok(payload.into_vec())
    }

    /// Create an organization by name.
    ///
    /// `POST /api/organizations`
    ///
    /// Returns the new API identifier when the response embeds one;
    /// callers fall back to a list-and-scan when it doesn't. A response
    /// body that isn't recognizable org JSON is treated the same as a
    /// bare acknowledgement.
    pub async fn create_organization(&self, name: &str) -> Result<Option<String>, Error> {
        let url = self.api_url("organizations");
        debug!("creating organization {name}");

        let body = self
            .post_raw(url, &serde_json::json!({ "name": name }))
            .await?;

        let embedded_id = decode_body::<CreatedOrgPayload>(&body)
            .ok()
            .and_then(|payload| payload.into_org().org_id().map(str::to_owned));
        Ok(embedded_id)
    }
}
