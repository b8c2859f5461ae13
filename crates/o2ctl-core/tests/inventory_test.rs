#![allow(clippy::unwrap_used)]

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use o2ctl_api::transport::TransportConfig;
use o2ctl_api::{AdminCredentials, ApiClient, SchemaGeneration};
use o2ctl_core::Reconciler;

async fn setup() -> (MockServer, Reconciler) {
    let server = MockServer::start().await;
    let api = ApiClient::new(
        Url::parse(&server.uri()).unwrap(),
        AdminCredentials::new("admin@example.com", "test-password"),
        SchemaGeneration::V2,
        &TransportConfig::default(),
    )
    .unwrap();
    (server, Reconciler::with_client(api, "example.com"))
}

#[tokio::test]
async fn scans_every_org_except_meta() {
    let (server, rec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "name": "_meta", "identifier": "_meta" },
                { "name": "team1", "identifier": "t1" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/_meta/streams"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/t1/streams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{ "name": "team1_default", "stream_type": "logs" }]
        })))
        .mount(&server)
        .await;
    // Role listings mix strings and objects across server versions.
    Mock::given(method("GET"))
        .and(path("/api/t1/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "admin",
            { "role": "log-reader" },
            { "name": "legacy-only" },
            {}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/t1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "email": "u@example.com", "role": "admin" },
                { "email": "x@example.com" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/t1/service_accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "name": "sa-gitops", "email": "sa-gitops-team1@example.com" },
                { "email": "nameless@example.com" }
            ]
        })))
        .mount(&server)
        .await;

    let overview = rec.inventory().await.unwrap();

    assert_eq!(overview.len(), 1);
    let org = &overview[0];
    assert_eq!(org.name, "team1");
    assert_eq!(org.id, "t1");
    assert_eq!(org.streams, ["team1_default"]);
    assert_eq!(org.roles, ["admin", "log-reader", "legacy-only", "unknown"]);
    assert_eq!(org.users, ["u@example.com (admin)", "x@example.com (unknown)"]);
    assert_eq!(org.service_accounts, ["sa-gitops"]);
}

#[tokio::test]
async fn listing_failures_degrade_to_empty_sections() {
    let (server, rec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "name": "team1", "identifier": "t1" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/t1/streams"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/t1/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["admin"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/t1/users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/t1/service_accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let overview = rec.inventory().await.unwrap();

    assert_eq!(overview.len(), 1);
    let org = &overview[0];
    assert!(org.streams.is_empty());
    assert!(org.users.is_empty());
    assert_eq!(org.roles, ["admin"]);
}
