#![allow(clippy::unwrap_used)]

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use o2ctl_api::transport::TransportConfig;
use o2ctl_api::{AdminCredentials, ApiClient, SchemaGeneration};
use o2ctl_core::{CoreError, Reconciler};

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
async fn purges_one_org_honoring_skip_lists() {
    let (server, rec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "name": "team1", "identifier": "team1_abc" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/team1_abc/service_accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "name": "sa-gitops", "email": "sa-gitops-team1@example.com" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/team1_abc/service_accounts/sa-gitops-team1@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    // The operator's own identity survives, case-insensitively.
    Mock::given(method("GET"))
        .and(path("/api/team1_abc/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "email": "Admin@example.com", "role": "root" },
                { "email": "user1-team1@example.com", "role": "admin" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/team1_abc/users/user1-team1@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/team1_abc/users/Admin@example.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/team1_abc/roles"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(["admin", { "role": "log-reader", "id": "r1" }])),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/team1_abc/roles/log-reader"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/team1_abc/roles/admin"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/team1_abc/streams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [
                { "name": "team1_short_term", "stream_type": "logs" },
                { "name": "_internal", "stream_type": "logs" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/team1_abc/streams/team1_short_term"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/team1_abc/streams/_internal"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let summary = rec.purge_org("team1").await.unwrap();

    assert_eq!(summary.org, "team1");
    assert_eq!(summary.service_accounts, 1);
    assert_eq!(summary.users, 1);
    assert_eq!(summary.roles, 1);
    assert_eq!(summary.streams, 1);
    assert_eq!(summary.skipped, 3);
    assert!(!summary.has_failures());
    assert_eq!(summary.deleted(), 4);
}

#[tokio::test]
async fn purge_of_missing_org_is_an_error() {
    let (server, rec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let err = rec.purge_org("ghost").await.unwrap_err();
    assert!(matches!(err, CoreError::OrgNotFound { ref name } if name == "ghost"));
}

#[tokio::test]
async fn failed_deletions_are_recorded_not_fatal() {
    let (server, rec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "name": "team1", "identifier": "team1_abc" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/team1_abc/service_accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "name": "sa1", "email": "sa1-team1@example.com" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/team1_abc/service_accounts/sa1-team1@example.com"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "locked" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/team1_abc/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "email": "user1-team1@example.com" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/team1_abc/users/user1-team1@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/team1_abc/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/team1_abc/streams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": [] })))
        .mount(&server)
        .await;

    let summary = rec.purge_org("team1").await.unwrap();

    assert_eq!(summary.service_accounts, 0);
    assert_eq!(summary.users, 1);
    assert!(summary.has_failures());
    assert_eq!(summary.failures.len(), 1);
    assert!(summary.failures[0].contains("sa1-team1@example.com"));
}

#[tokio::test]
async fn cleanup_targets_exclude_the_meta_org() {
    let (server, rec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "name": "_meta", "identifier": "_meta" },
                { "name": "team1", "identifier": "t1" },
                { "identifier": "nameless" },
                { "name": "team2", "identifier": "t2" }
            ]
        })))
        .mount(&server)
        .await;

    let targets = rec.cleanup_targets().await.unwrap();
    assert_eq!(targets, ["team1", "team2"]);
}
