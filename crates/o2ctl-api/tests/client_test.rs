#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use o2ctl_api::models::{NewUser, RolePayload, StreamSettingsRequest};
use o2ctl_api::{AdminCredentials, ApiClient, Error, SchemaGeneration};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        base_url,
        AdminCredentials::new("admin@example.com", "test-password"),
        SchemaGeneration::V2,
    );
    (server, client)
}

// ── Organization tests ──────────────────────────────────────────────

#[tokio::test]
async fn test_list_organizations_enveloped() {
    let (server, client) = setup().await;

    let body = json!({
        "data": [
            { "name": "team1", "identifier": "team1_id", "type": "custom" },
            { "name": "_meta", "identifier": "_meta" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let orgs = client.list_organizations().await.unwrap();

    assert_eq!(orgs.len(), 2);
    assert_eq!(orgs[0].name.as_deref(), Some("team1"));
    assert_eq!(orgs[0].org_id(), Some("team1_id"));
}

#[tokio::test]
async fn test_list_organizations_bare_array_with_numeric_ids() {
    let (server, client) = setup().await;

    let body = json!([{ "name": "team1", "id": 42 }]);

    Mock::given(method("GET"))
        .and(path("/api/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let orgs = client.list_organizations().await.unwrap();

    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0].org_id(), Some("42"));
}

#[tokio::test]
async fn test_create_organization_with_embedded_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/organizations"))
        .and(body_json(json!({ "name": "team3" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "name": "team3", "identifier": "team3_id" }
        })))
        .mount(&server)
        .await;

    let id = client.create_organization("team3").await.unwrap();

    assert_eq!(id.as_deref(), Some("team3_id"));
}

#[tokio::test]
async fn test_create_organization_bare_acknowledgement() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/organizations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "message": "created" })),
        )
        .mount(&server)
        .await;

    let id = client.create_organization("team3").await.unwrap();

    assert_eq!(id, None);
}

// ── Stream tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_streams_uses_list_wrapper() {
    let (server, client) = setup().await;

    let body = json!({
        "list": [
            { "name": "team1_default", "stream_type": "logs" },
            { "name": "_audit" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/team1_id/streams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let streams = client.list_streams("team1_id").await.unwrap();

    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0].name, "team1_default");
}

#[tokio::test]
async fn test_apply_stream_settings_sends_full_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/team1_id/streams/team1_long_term"))
        .and(query_param("type", "logs"))
        .and(body_json(json!({
            "fields": [],
            "settings": {
                "approx_partition": true,
                "bloom_filter_fields": [],
                "data_retention": 840,
                "defined_schema_fields": [],
                "distinct_value_fields": [],
                "enable_distinct_fields": true,
                "enable_log_patterns_extraction": true,
                "extended_retention_days": [],
                "full_text_search_keys": [],
                "index_all_values": true,
                "index_fields": [],
                "index_original_data": true,
                "partition_keys": [],
                "partition_time_level": "hourly",
                "store_original_data": true
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 200 })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .apply_stream_settings("team1_id", "team1_long_term", &StreamSettingsRequest::for_retention(840))
        .await
        .unwrap();
}

// ── User tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_user_conflict_maps_to_conflict_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/team1_id/users"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "user already exists" })),
        )
        .mount(&server)
        .await;

    let user = NewUser {
        email: "user1-team1@example.com".into(),
        first_name: "User".into(),
        last_name: "Team".into(),
        is_external: false,
        password: "hunter2hunter2aa".into(),
        role: "admin".into(),
        custom_role: Vec::new(),
    };
    let result = client.create_user("team1_id", &user).await;

    assert!(
        matches!(result, Err(ref e) if e.is_conflict()),
        "expected Conflict error, got: {result:?}"
    );
}

// ── Service-account tests ───────────────────────────────────────────

#[tokio::test]
async fn test_credential_fetch_nested_and_flat() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/team1_id/service_accounts/sa-gitops-team1@example.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "token": "abc123" } })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/team2_id/service_accounts/sa-gitops-team2@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "xyz789" })))
        .mount(&server)
        .await;

    let nested = client
        .get_service_account_credential("team1_id", "sa-gitops-team1@example.com")
        .await
        .unwrap();
    assert_eq!(nested.token.as_deref(), Some("abc123"));

    let flat = client
        .get_service_account_credential("team2_id", "sa-gitops-team2@example.com")
        .await
        .unwrap();
    assert_eq!(flat.token.as_deref(), Some("xyz789"));
}

// ── Role tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_roles_mixed_shapes() {
    let (server, client) = setup().await;

    let body = json!({ "data": ["admin", { "role": "ops", "id": 9 }] });

    Mock::given(method("GET"))
        .and(path("/api/team1_id/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let roles = client.list_roles("team1_id").await.unwrap();

    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].name(), Some("admin"));
    assert_eq!(roles[1].name(), Some("ops"));
    assert_eq!(roles[1].id(), Some("9"));
}

#[tokio::test]
async fn test_update_role_puts_full_payload() {
    let (server, client) = setup().await;

    let grants = vec![o2ctl_api::models::RoleGrant {
        object: "stream:team1_default".into(),
        permission: "AllowAll".into(),
    }];
    let payload = RolePayload {
        role: "ops".into(),
        permissions: SchemaGeneration::V2.encode_grants(&grants),
    };

    Mock::given(method("PUT"))
        .and(path("/api/team1_id/roles/9"))
        .and(body_json(json!({
            "role": "ops",
            "permissions": [{ "object": "stream:team1_default", "permission": "AllowAll" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 200 })))
        .expect(1)
        .mount(&server)
        .await;

    client.update_role("team1_id", "9", &payload).await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "invalid credentials" })),
        )
        .mount(&server)
        .await;

    let result = client.list_organizations().await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(
                message.contains("invalid credentials"),
                "expected auth detail, got: {message}"
            );
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_carries_detail_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/team1_id/streams"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "db unavailable" })),
        )
        .mount(&server)
        .await;

    let result = client.list_streams("team1_id").await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("db unavailable"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_healthz_probe() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/healthz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let health = client
        .healthz(std::time::Duration::from_secs(5))
        .await
        .unwrap();

    assert!(health.is_ok());
}
