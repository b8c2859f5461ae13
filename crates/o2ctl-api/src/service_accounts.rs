// Service-account endpoints
//
// Addressing is inconsistent across server builds: updates key on email
// (falling back to id), deletes key on email (falling back to name).
// The `ServiceAccount` model exposes both choices as accessors so
// callers don't encode the asymmetry themselves.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    CredentialPayload, ListPayload, NewServiceAccount, SaCredential, ServiceAccount,
    ServiceAccountUpdate,
};

impl ApiClient {
    /// List all service accounts in an organization.
    ///
    /// `GET /api/{org_id}/service_accounts`
    pub async fn list_service_accounts(&self, org_id: &str) -> Result<Vec<ServiceAccount>, Error> {
        let url = self.org_url(org_id, "service_accounts");
        debug!("listing service accounts in {org_id}");
        let payload: ListPayload<ServiceAccount> = self.get(url).await?;
        Ok(payload.into_vec())
    }

    /// Create a service account.
    ///
    /// `POST /api/{org_id}/service_accounts`
    pub async fn create_service_account(
        &self,
        org_id: &str,
        account: &NewServiceAccount,
    ) -> Result<(), Error> {
        let url = self.org_url(org_id, "service_accounts");
        debug!("creating service account {} in {org_id}", account.name);
        self.post_unit(url, account).await
    }

    /// Update a service account addressed by email or id.
    ///
    /// `PUT /api/{org_id}/service_accounts/{key}`
    pub async fn update_service_account(
        &self,
        org_id: &str,
        key: &str,
        update: &ServiceAccountUpdate,
    ) -> Result<(), Error> {
        let url = self.org_url(org_id, &format!("service_accounts/{key}"));
        debug!("updating service account {key} in {org_id}");
        self.put_unit(url, update).await
    }

    /// Delete a service account addressed by email or name.
    ///
    /// `DELETE /api/{org_id}/service_accounts/{key}`
    pub async fn delete_service_account(&self, org_id: &str, key: &str) -> Result<(), Error> {
        let url = self.org_url(org_id, &format!("service_accounts/{key}"));
        debug!("deleting service account {key} in {org_id}");
        self.delete(url).await
    }

    /// Fetch the credential material for a service account.
    ///
    /// `GET /api/{org_id}/service_accounts/{email}`
    ///
    /// The payload nests under `data` on some builds and arrives flat on
    /// others; either way the caller gets a plain [`SaCredential`].
    pub async fn get_service_account_credential(
        &self,
        org_id: &str,
        email: &str,
    ) -> Result<SaCredential, Error> {
        let url = self.org_url(org_id, &format!("service_accounts/{email}"));
        debug!("fetching credential for service account {email} in {org_id}");
        let payload: CredentialPayload = self.get(url).await?;
        Ok(payload.into_inner())
    }
}
