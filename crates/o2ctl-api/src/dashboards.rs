// Dashboard endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;

impl ApiClient {
    /// Import a dashboard definition into an organization.
    ///
    /// `POST /api/{org_id}/dashboards`
    ///
    /// The body is the raw dashboard JSON; callers strip any
    /// `dashboardId` field first so the server mints a fresh copy
    /// instead of colliding with an exported id.
    pub async fn create_dashboard(
        &self,
        org_id: &str,
        dashboard: &serde_json::Value,
    ) -> Result<(), Error> {
        let title = dashboard
            .get("title")
            .and_then(|t| t.as_str())
            .unwrap_or("untitled");
        let url = self.org_url(org_id, "dashboards");
        debug!("importing dashboard {title:?} into {org_id}");
        self.post_unit(url, dashboard).await
    }

    /// Download a dashboard definition from an arbitrary URL.
    ///
    /// Unauthenticated; used for the public dashboard catalog. Shares
    /// the client's TLS and timeout settings.
    pub async fn download_dashboard(&self, url: &str) -> Result<serde_json::Value, Error> {
        debug!("GET {url}");
        let response = self.http().get(url).send().await?.error_for_status()?;
        response.json().await.map_err(Error::from)
    }
}
