// User endpoints
//
// Duplicate creation surfaces as `Error::Conflict` (HTTP 409); the
// reconciler treats that as idempotent success, not a failure.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ListPayload, NewUser, User};

impl ApiClient {
    /// List all users in an organization.
    ///
    /// `GET /api/{org_id}/users`
    pub async fn list_users(&self, org_id: &str) -> Result<Vec<User>, Error> {
        let url = self.org_url(org_id, "users");
        debug!("listing users in {org_id}");
        let payload: ListPayload<User> = self.get(url).await?;
        Ok(payload.into_vec())
    }

    /// Create a user.
    ///
    /// `POST /api/{org_id}/users`
    pub async fn create_user(&self, org_id: &str, user: &NewUser) -> Result<(), Error> {
        let url = self.org_url(org_id, "users");
        debug!("creating user {} in {org_id}", user.email);
        self.post_unit(url, user).await
    }

    /// Remove a user from an organization.
    ///
    /// `DELETE /api/{org_id}/users/{email}`
    pub async fn delete_user(&self, org_id: &str, email: &str) -> Result<(), Error> {
        let url = self.org_url(org_id, &format!("users/{email}"));
        debug!("deleting user {email} in {org_id}");
        self.delete(url).await
    }
}
