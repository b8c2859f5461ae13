// Stream endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{StreamInfo, StreamListPayload, StreamSettingsRequest};

impl ApiClient {
    /// List all streams in an organization.
    ///
    /// `GET /api/{org_id}/streams`
    pub async fn list_streams(&self, org_id: &str) -> Result<Vec<StreamInfo>, Error> {
        let url = self.org_url(org_id, "streams");
        debug!("listing streams in {org_id}");
        let payload: StreamListPayload = self.get(url).await?;
        Ok(payload.into_vec())
    }

    /// Apply settings to a log stream, creating the stream if absent.
    ///
    /// `POST /api/{org_id}/streams/{stream}?type=logs`
    ///
    /// The server treats the posted settings object as authoritative, so
    /// the same call serves create and update.
    pub async fn apply_stream_settings(
        &self,
        org_id: &str,
        stream: &str,
        settings: &StreamSettingsRequest,
    ) -> Result<(), Error> {
        let mut url = self.org_url(org_id, &format!("streams/{stream}"));
        url.query_pairs_mut().append_pair("type", "logs");
        debug!("applying settings to stream {stream} in {org_id}");
        self.post_unit(url, settings).await
    }

    /// Delete a stream.
    ///
    /// `DELETE /api/{org_id}/streams/{stream}`
    pub async fn delete_stream(&self, org_id: &str, stream: &str) -> Result<(), Error> {
        let url = self.org_url(org_id, &format!("streams/{stream}"));
        debug!("deleting stream {stream} in {org_id}");
        self.delete(url).await
    }
}
