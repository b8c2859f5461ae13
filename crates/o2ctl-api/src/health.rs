// Server health probe
//
// `/healthz` sits outside the `/api` prefix and answers without
// authentication, so readiness can be checked before credentials are
// known to be valid.

use std::time::Duration;

use tracing::debug;

use crate::client::{ApiClient, decode_body};
use crate::error::Error;
use crate::models::HealthStatus;

impl ApiClient {
    /// Probe `GET /healthz` with its own short timeout.
    ///
    /// The per-request timeout overrides the client default so a hung
    /// server can't stall a readiness-polling loop for the full request
    /// timeout on every probe.
    pub async fn healthz(&self, timeout: Duration) -> Result<HealthStatus, Error> {
        let url = self.root_url("healthz");
        debug!("GET {url}");

        let resp = self
            .http()
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(Error::Transport)?;

        let body = Self::check(resp).await?;
        decode_body(&body)
    }
}
