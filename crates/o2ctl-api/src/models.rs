// Management API response and request types
//
// Field presence and envelope shape vary across server versions, so list
// payloads, token payloads, and role entries are modeled as untagged
// enums, with `#[serde(default)]` used liberally. All of the tolerance
// lives here -- endpoint methods and the reconciler never re-probe
// response shapes.

use serde::{Deserialize, Serialize};

// ── Envelopes ────────────────────────────────────────────────────────

/// List payload that arrives either `{"data": [...]}` or as a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Enveloped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Enveloped { data } => data,
            Self::Bare(items) => items,
        }
    }
}

/// Stream listings use a `{"list": [...]}` wrapper instead of `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StreamListPayload {
    Enveloped { list: Vec<StreamInfo> },
    Bare(Vec<StreamInfo>),
}

impl StreamListPayload {
    pub fn into_vec(self) -> Vec<StreamInfo> {
        match self {
            Self::Enveloped { list } => list,
            Self::Bare(items) => items,
        }
    }
}

// ── Organization ─────────────────────────────────────────────────────

/// Organization record from `GET /api/organizations`.
///
/// The API identifier field is `identifier` on current builds and `id`
/// on older ones; [`Organization::org_id`] picks whichever is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub org_type: Option<String>,
}

impl Organization {
    /// The canonical API identifier: `identifier` when present, else `id`.
    pub fn org_id(&self) -> Option<&str> {
        self.identifier.as_deref().or(self.id.as_deref())
    }
}

/// Response from `POST /api/organizations`.
///
/// Newer builds embed the created org (possibly under `data`); older
/// builds return a bare acknowledgement, which parses as an empty org.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreatedOrgPayload {
    Enveloped { data: Organization },
    Flat(Organization),
}

impl CreatedOrgPayload {
    pub fn into_org(self) -> Organization {
        match self {
            Self::Enveloped { data } => data,
            Self::Flat(org) => org,
        }
    }
}

// ── Streams ──────────────────────────────────────────────────────────

/// Stream descriptor from `GET /api/{org_id}/streams`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamInfo {
    pub name: String,
    #[serde(default)]
    pub stream_type: Option<String>,
    #[serde(default)]
    pub storage_type: Option<String>,
    #[serde(default)]
    pub settings: Option<StreamSettings>,
}

/// Settings block for a managed log stream.
///
/// Applied blind on every reconcile pass: the server treats the posted
/// object as the new authoritative settings, so there is no read-compare
/// step. Only `data_retention` varies between managed streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // wire shape, not a state machine
pub struct StreamSettings {
    #[serde(default)]
    pub approx_partition: bool,
    #[serde(default)]
    pub bloom_filter_fields: Vec<String>,
    #[serde(default)]
    pub data_retention: u32,
    #[serde(default)]
    pub defined_schema_fields: Vec<String>,
    #[serde(default)]
    pub distinct_value_fields: Vec<String>,
    #[serde(default)]
    pub enable_distinct_fields: bool,
    #[serde(default)]
    pub enable_log_patterns_extraction: bool,
    #[serde(default)]
    pub extended_retention_days: Vec<u32>,
    #[serde(default)]
    pub full_text_search_keys: Vec<String>,
    #[serde(default)]
    pub index_all_values: bool,
    #[serde(default)]
    pub index_fields: Vec<String>,
    #[serde(default)]
    pub index_original_data: bool,
    #[serde(default)]
    pub partition_keys: Vec<String>,
    #[serde(default)]
    pub partition_time_level: Option<String>,
    #[serde(default)]
    pub store_original_data: bool,
}

impl StreamSettings {
    /// The settings applied to every managed stream, varying only in
    /// retention hours.
    pub fn for_retention(hours: u32) -> Self {
        Self {
            approx_partition: true,
            bloom_filter_fields: Vec::new(),
            data_retention: hours,
            defined_schema_fields: Vec::new(),
            distinct_value_fields: Vec::new(),
            enable_distinct_fields: true,
            enable_log_patterns_extraction: true,
            extended_retention_days: Vec::new(),
            full_text_search_keys: Vec::new(),
            index_all_values: true,
            index_fields: Vec::new(),
            index_original_data: true,
            partition_keys: Vec::new(),
            partition_time_level: Some("hourly".to_owned()),
            store_original_data: true,
        }
    }
}

/// Body for `POST /api/{org_id}/streams/{stream}?type=logs`.
#[derive(Debug, Clone, Serialize)]
pub struct StreamSettingsRequest {
    pub fields: Vec<serde_json::Value>,
    pub settings: StreamSettings,
}

impl StreamSettingsRequest {
    pub fn for_retention(hours: u32) -> Self {
        Self {
            fields: Vec::new(),
            settings: StreamSettings::for_retention(hours),
        }
    }
}

// ── Users ────────────────────────────────────────────────────────────

/// User record from `GET /api/{org_id}/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_external: bool,
}

/// Body for `POST /api/{org_id}/users`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_external: bool,
    pub password: String,
    /// Built-in role (`admin`, `member`, ...).
    pub role: String,
    pub custom_role: Vec<String>,
}

// ── Service accounts ─────────────────────────────────────────────────

/// Service-account record from `GET /api/{org_id}/service_accounts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccount {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl ServiceAccount {
    /// The identifier update calls address: email when present, else id.
    pub fn update_key(&self) -> Option<&str> {
        self.email.as_deref().or(self.id.as_deref())
    }

    /// The identifier delete calls address: email when present, else name.
    pub fn delete_key(&self) -> Option<&str> {
        self.email.as_deref().or(self.name.as_deref())
    }
}

/// Body for `POST /api/{org_id}/service_accounts`.
#[derive(Debug, Clone, Serialize)]
pub struct NewServiceAccount {
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Body for `PUT /api/{org_id}/service_accounts/{key}`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceAccountUpdate {
    pub name: String,
    pub role: String,
}

/// Credential payload from `GET /api/{org_id}/service_accounts/{email}`.
///
/// Arrives nested under `data` or flat depending on server version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CredentialPayload {
    Enveloped { data: SaCredential },
    Flat(SaCredential),
}

impl CredentialPayload {
    pub fn into_inner(self) -> SaCredential {
        match self {
            Self::Enveloped { data } => data,
            Self::Flat(cred) => cred,
        }
    }
}

/// Service-account credential material.
///
/// Current builds return a bearer `token`; some return a client-id /
/// client-secret pair instead. Either form counts as retrievable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaCredential {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl SaCredential {
    /// Returns `true` when no secret material came back at all.
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.client_id.is_none() && self.client_secret.is_none()
    }
}

// ── Roles ────────────────────────────────────────────────────────────

/// Entry from `GET /api/{org_id}/roles`.
///
/// Some builds return bare name strings, others full objects. The
/// accessors normalize both shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoleEntry {
    Name(String),
    Object {
        #[serde(default)]
        role: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default, deserialize_with = "de_opt_id")]
        id: Option<String>,
    },
}

impl RoleEntry {
    /// The role's display name, regardless of shape.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(s) => Some(s),
            Self::Object { role, name, .. } => role.as_deref().or(name.as_deref()),
        }
    }

    /// The internal id, when the listing carries one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Object { id, .. } => id.as_deref(),
        }
    }
}

/// A single grant: which permission applies to which object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub object: String,
    pub permission: String,
}

/// Body for role create and update calls.
///
/// `permissions` is pre-encoded by
/// [`SchemaGeneration::encode_grants`](crate::schema::SchemaGeneration::encode_grants),
/// so one payload type serves both wire generations.
#[derive(Debug, Clone, Serialize)]
pub struct RolePayload {
    pub role: String,
    pub permissions: serde_json::Value,
}

// ── Health ───────────────────────────────────────────────────────────

/// Response from `GET /healthz`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("ok")
    }
}

// ── Deserialization helpers ──────────────────────────────────────────

/// Accept an identifier as either a JSON string or a number; older
/// builds used numeric row ids where current ones use strings.
fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    Ok(raw.map(|r| match r {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn list_payload_unwraps_both_shapes() {
        let enveloped: ListPayload<Organization> =
            serde_json::from_str(r#"{"data": [{"name": "team1", "identifier": "abc"}]}"#).unwrap();
        assert_eq!(enveloped.into_vec().len(), 1);

        let bare: ListPayload<Organization> =
            serde_json::from_str(r#"[{"name": "team1", "id": 7}]"#).unwrap();
        let orgs = bare.into_vec();
        assert_eq!(orgs[0].org_id(), Some("7"));
    }

    #[test]
    fn org_id_prefers_identifier_over_id() {
        let org: Organization =
            serde_json::from_str(r#"{"name": "team1", "identifier": "abc", "id": "123"}"#).unwrap();
        assert_eq!(org.org_id(), Some("abc"));
    }

    #[test]
    fn stream_list_uses_list_wrapper() {
        let payload: StreamListPayload =
            serde_json::from_str(r#"{"list": [{"name": "team1_default"}]}"#).unwrap();
        assert_eq!(payload.into_vec()[0].name, "team1_default");
    }

    #[test]
    fn role_entry_tolerates_strings_and_objects() {
        let entries: Vec<RoleEntry> =
            serde_json::from_str(r#"["ops", {"role": "ingest", "id": 4}, {"name": "viewer2"}]"#)
                .unwrap();
        assert_eq!(entries[0].name(), Some("ops"));
        assert_eq!(entries[1].name(), Some("ingest"));
        assert_eq!(entries[1].id(), Some("4"));
        assert_eq!(entries[2].name(), Some("viewer2"));
        assert_eq!(entries[2].id(), None);
    }

    #[test]
    fn credential_payload_tolerates_nesting() {
        let nested: CredentialPayload =
            serde_json::from_str(r#"{"data": {"token": "t0ken"}}"#).unwrap();
        assert_eq!(nested.into_inner().token.as_deref(), Some("t0ken"));

        let flat: CredentialPayload = serde_json::from_str(r#"{"token": "t0ken"}"#).unwrap();
        assert_eq!(flat.into_inner().token.as_deref(), Some("t0ken"));

        let pair: CredentialPayload =
            serde_json::from_str(r#"{"client_id": "ci", "client_secret": "cs"}"#).unwrap();
        let cred = pair.into_inner();
        assert!(!cred.is_empty());
        assert_eq!(cred.client_id.as_deref(), Some("ci"));
    }

    #[test]
    fn stream_settings_carry_fixed_defaults() {
        let settings = StreamSettings::for_retention(240);
        assert_eq!(settings.data_retention, 240);
        assert!(settings.store_original_data);
        assert_eq!(settings.partition_time_level.as_deref(), Some("hourly"));

        let body = serde_json::to_value(StreamSettingsRequest::for_retention(24)).unwrap();
        assert_eq!(body["fields"], serde_json::json!([]));
        assert_eq!(body["settings"]["data_retention"], 24);
        assert_eq!(body["settings"]["approx_partition"], true);
    }

    #[test]
    fn created_org_payload_survives_bare_acknowledgement() {
        let ack: CreatedOrgPayload =
            serde_json::from_str(r#"{"code": 200, "message": "created"}"#).unwrap();
        assert_eq!(ack.into_org().org_id(), None);

        let embedded: CreatedOrgPayload =
            serde_json::from_str(r#"{"data": {"name": "team1", "identifier": "xyz"}}"#).unwrap();
        assert_eq!(embedded.into_org().org_id(), Some("xyz"));
    }
}
