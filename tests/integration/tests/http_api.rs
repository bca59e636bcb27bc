//! HTTP API integration tests.
//!
//! These tests start a real server on a loopback port and drive it with an
//! HTTP client, checking authentication, routing, and JSON bodies end to end.

use keyshelf_integration_tests::TestServer;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_list_without_token_is_unauthorized() {
    let server = TestServer::start("integration-key").await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/credentials"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_with_token() {
    let server = TestServer::start("integration-key").await;
    server
        .store
        .set("COMPANY_NAME", "Example Company LLC")
        .await
        .unwrap();

    let response = reqwest::Client::new()
        .get(server.url("/credentials"))
        .header("Authorization", server.bearer())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["service"], "mcp-servers");
    assert_eq!(
        body["credentials"],
        json!({ "COMPANY_NAME": "****************LLC" })
    );
    assert_eq!(
        body["available_keys"],
        json!([
            "COMPANY_OWNER_SSN",
            "BANK_ACCT",
            "BANK_ROUTING",
            "COMPANY_NAME",
            "COMPANY_EIN",
            "COMPANY_ADDRESS",
            "COMPANY_OWNER"
        ])
    );
}

#[tokio::test]
async fn test_store_then_get() {
    let server = TestServer::start("integration-key").await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/credentials/COMPANY_NAME"))
        .header("Authorization", server.bearer())
        .json(&json!({ "value": "Acme" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["key"], "COMPANY_NAME");
    assert_eq!(body["masked_value"], "*cme");

    let response = client
        .get(server.url("/credentials/COMPANY_NAME?reveal=true"))
        .header("Authorization", server.bearer())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["value"], "Acme");
    assert_eq!(body["masked_value"], "*cme");

    let stored = server.store.get("COMPANY_NAME").await.unwrap();
    assert_eq!(stored.expose_secret(), "Acme");
}

#[tokio::test]
async fn test_invalid_name_does_not_touch_store() {
    let server = TestServer::start("integration-key").await;

    let response = reqwest::Client::new()
        .post(server.url("/credentials/SLACK_TOKEN"))
        .header("Authorization", server.bearer())
        .json(&json!({ "value": "xoxb" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(server.backend.access_count(), 0);
}

#[tokio::test]
async fn test_malformed_body() {
    let server = TestServer::start("integration-key").await;

    let response = reqwest::Client::new()
        .post(server.url("/credentials/COMPANY_NAME"))
        .header("Authorization", server.bearer())
        .header("Content-Type", "application/json")
        .body("{\"value\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_plain_body_without_json_content_type() {
    let server = TestServer::start("integration-key").await;

    let response = reqwest::Client::new()
        .post(server.url("/credentials/COMPANY_EIN"))
        .header("Authorization", server.bearer())
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(r#"{"value": "12-3456789"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = server.store.get("COMPANY_EIN").await.unwrap();
    assert_eq!(stored.expose_secret(), "12-3456789");
}

#[tokio::test]
async fn test_wrong_method_answers_json() {
    let server = TestServer::start("integration-key").await;

    let response = reqwest::Client::new()
        .post(server.url("/credentials"))
        .header("Authorization", server.bearer())
        .json(&json!({ "value": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unknown endpoint");
}
