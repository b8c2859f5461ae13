// Management API HTTP client
//
// Wraps `reqwest::Client` with OpenObserve URL construction, per-request
// HTTP basic auth, and centralized status handling. All endpoint modules
// (orgs, streams, users, etc.) are implemented as inherent methods via
// separate files to keep this module focused on transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::schema::SchemaGeneration;
use crate::transport::TransportConfig;

/// Admin identity attached to every management call as HTTP basic auth.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: SecretString,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Raw HTTP client for the OpenObserve management API.
///
/// Builds `/api/{org_id}/...` URLs, authenticates each request, and maps
/// HTTP statuses into the crate error taxonomy before callers ever see a
/// body. Response-shape tolerance lives in [`crate::models`]; this type
/// only moves bytes.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: AdminCredentials,
    schema: SchemaGeneration,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the server root, e.g. `http://127.0.0.1:5080`.
    pub fn new(
        base_url: Url,
        credentials: AdminCredentials,
        schema: SchemaGeneration,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url, credentials, schema })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: AdminCredentials,
        schema: SchemaGeneration,
    ) -> Self {
        Self { http, base_url, credentials, schema }
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for plain downloads outside the API).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The admin identity requests authenticate as.
    pub fn admin_email(&self) -> &str {
        &self.credentials.email
    }

    /// The schema generation payloads are encoded for.
    pub fn schema(&self) -> SchemaGeneration {
        self.schema
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a server-level URL outside the API prefix: `{base}/{path}`.
    pub(crate) fn root_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/{path}");
        Url::parse(&full).expect("invalid server URL")
    }

    /// Build a server-level API URL: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        self.root_url(&format!("api/{path}"))
    }

    /// Build an org-scoped API URL: `{base}/api/{org_id}/{path}`.
    pub(crate) fn org_url(&self, org_id: &str, path: &str) -> Url {
        self.root_url(&format!("api/{org_id}/{path}"))
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn authed(&self, rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        rb.basic_auth(
            &self.credentials.email,
            Some(self.credentials.password.expose_secret()),
        )
    }

    /// Send a GET request and decode the response as `T`.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self
            .authed(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;

        let body = Self::check(resp).await?;
        decode_body(&body)
    }

    /// Send a POST with JSON body and return the checked response text.
    pub(crate) async fn post_raw(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<String, Error> {
        debug!("POST {url}");

        let resp = self
            .authed(self.http.post(url))
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::check(resp).await
    }

    /// Send a POST with JSON body, discarding any response payload.
    pub(crate) async fn post_unit(&self, url: Url, body: &impl Serialize) -> Result<(), Error> {
        self.post_raw(url, body).await.map(|_| ())
    }

    /// Send a PUT with JSON body, discarding any response payload.
    pub(crate) async fn put_unit(&self, url: Url, body: &impl Serialize) -> Result<(), Error> {
        debug!("PUT {url}");

        let resp = self
            .authed(self.http.put(url))
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::check(resp).await.map(|_| ())
    }

    /// Send a DELETE, discarding any response payload.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self
            .authed(self.http.delete(url))
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::check(resp).await.map(|_| ())
    }

    /// Map non-2xx statuses into the error taxonomy; return the body on
    /// success.
    pub(crate) async fn check(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            return Ok(body);
        }

        let message = error_detail(&body);
        match status.as_u16() {
            401 => Err(Error::Authentication { message }),
            403 => Err(Error::PermissionDenied { message }),
            404 => Err(Error::NotFound { message }),
            409 => Err(Error::Conflict { message }),
            code => Err(Error::Api { status: code, message }),
        }
    }
}

/// Decode a checked response body as `T`, keeping a preview on failure.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: preview(body),
    })
}

/// Extract a human-readable error message from a response body.
///
/// The server usually returns `{"code": ..., "message": "..."}`; fall
/// back to a trimmed body preview for anything else.
fn error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
            return msg.to_owned();
        }
        if let Some(msg) = value.get("error").and_then(|m| m.as_str()) {
            return msg.to_owned();
        }
    }
    preview(body)
}

/// Trim a body to a log-safe preview.
fn preview(body: &str) -> String {
    const MAX_CHARS: usize = 200;

    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_CHARS {
        trimmed.to_owned()
    } else {
        let head: String = trimmed.chars().take(MAX_CHARS).collect();
        format!("{head}...")
    }
}
