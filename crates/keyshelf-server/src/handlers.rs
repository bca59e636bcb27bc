//! Credential route handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use keyshelf_core::{CredentialName, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::ApiError;
use crate::server::AppState;

/// `GET /credentials` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    /// Service namespace.
    pub service: String,
    /// Stored credentials, masked, in allow-list order.
    pub credentials: Map<String, Value>,
    /// Every accepted credential name.
    pub available_keys: Vec<String>,
}

/// `GET /credentials/{name}` query string.
#[derive(Debug, Default, Deserialize)]
pub struct GetQuery {
    /// Include the raw value in the response.
    #[serde(default)]
    pub reveal: bool,
}

/// `GET /credentials/{name}` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialResponse {
    pub key: String,
    pub masked_value: String,
    /// Only present with `?reveal=true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// `POST /credentials/{name}` body.
#[derive(Debug, Deserialize)]
pub struct StoreRequest {
    pub value: String,
}

/// `POST /credentials/{name}` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreResponse {
    pub message: String,
    pub key: String,
    pub masked_value: String,
}

fn parse_name(name: Result<Path<String>, PathRejection>) -> Result<CredentialName, ApiError> {
    let Path(name) =
        name.map_err(|e| ApiError::BadRequest(format!("Invalid path: {}", e.body_text())))?;
    name.parse().map_err(|_| ApiError::InvalidName(name))
}

/// Parse a store request. The body is JSON whatever the `Content-Type` says.
fn parse_store_request(body: &[u8]) -> Result<StoreRequest, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        if e.is_data() {
            ApiError::BadRequest("Missing or invalid field: value".to_string())
        } else {
            ApiError::BadRequest(format!("Invalid JSON body: {e}"))
        }
    })
}

/// List every stored credential with its masked value.
pub async fn list_credentials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse>, ApiError> {
    let credentials = state
        .store
        .entries()
        .await?
        .into_iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.masked())))
        .collect();

    Ok(Json(ListResponse {
        service: state.store.service().to_string(),
        credentials,
        available_keys: CredentialName::ALL.iter().map(|n| n.to_string()).collect(),
    }))
}

/// Return one credential, masked unless the caller asks to reveal it.
pub async fn get_credential(
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
    query: Result<Query<GetQuery>, QueryRejection>,
) -> Result<Json<CredentialResponse>, ApiError> {
    let name = parse_name(name)?;
    let Query(query) = query
        .map_err(|e| ApiError::BadRequest(format!("Invalid query string: {}", e.body_text())))?;
    let value = state.store.get_credential(name).await?;

    if query.reveal {
        info!(%name, "revealing credential value");
    }

    Ok(Json(CredentialResponse {
        key: name.to_string(),
        masked_value: value.masked(),
        value: query.reveal.then(|| value.expose_secret().to_string()),
    }))
}

/// Create or overwrite one credential.
pub async fn store_credential(
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<StoreResponse>, ApiError> {
    let name = parse_name(name)?;
    let body = body
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;
    let request = parse_store_request(&body)?;

    if request.value.is_empty() {
        return Err(ApiError::BadRequest("Value cannot be empty".to_string()));
    }

    let value = SecretString::new(request.value);
    state.store.set_credential(name, &value).await?;
    info!(%name, "stored credential");

    Ok(Json(StoreResponse {
        message: format!("Successfully stored {name}"),
        key: name.to_string(),
        masked_value: value.masked(),
    }))
}

/// Fallback for unknown paths and unsupported methods.
pub async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKey;
    use crate::server::{Server, ServerConfig};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use keyshelf_store::{CredentialStore, MemoryBackend};
    use tower::ServiceExt;

    const TOKEN: &str = "test-token";

    fn test_app() -> (Router, CredentialStore) {
        let store = CredentialStore::new(Arc::new(MemoryBackend::new()));
        let config = ServerConfig::new(
            "127.0.0.1",
            0,
            ApiKey::resolve_from(Some(TOKEN.to_string()), None),
        );
        (Server::new(config, store.clone()).router(), store)
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_list_requires_token() {
        let (app, _) = test_app();
        let (status, body) = send(&app, request(Method::GET, "/credentials", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_wrong_token_rejected() {
        let (app, _) = test_app();
        let (status, _) =
            send(&app, request(Method::GET, "/credentials", Some("nope"), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_endpoint_checks_auth_first() {
        let (app, _) = test_app();
        let (status, _) = send(&app, request(Method::GET, "/secrets", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) =
            send(&app, request(Method::GET, "/secrets", Some(TOKEN), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Unknown endpoint");
    }

    #[tokio::test]
    async fn test_list_masks_values() {
        let (app, store) = test_app();
        store.set("COMPANY_NAME", "Example Company LLC").await.unwrap();
        store.set("COMPANY_EIN", "12-3456789").await.unwrap();

        let (status, body) =
            send(&app, request(Method::GET, "/credentials", Some(TOKEN), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "mcp-servers");
        assert_eq!(body["credentials"]["COMPANY_NAME"], "****************LLC");
        assert_eq!(body["credentials"]["COMPANY_EIN"], "*******789");
        assert_eq!(body["credentials"].as_object().unwrap().len(), 2);
        assert_eq!(body["available_keys"].as_array().unwrap().len(), 7);
        assert_eq!(body["available_keys"][0], "COMPANY_OWNER_SSN");
    }

    #[tokio::test]
    async fn test_get_masked_by_default() {
        let (app, store) = test_app();
        store.set("BANK_ACCT", "000123456789").await.unwrap();

        let (status, body) =
            send(&app, request(Method::GET, "/credentials/BANK_ACCT", Some(TOKEN), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["key"], "BANK_ACCT");
        assert_eq!(body["masked_value"], "*********789");
        assert!(body.get("value").is_none());
    }

    #[tokio::test]
    async fn test_get_reveal() {
        let (app, store) = test_app();
        store.set("BANK_ACCT", "000123456789").await.unwrap();

        let (status, body) = send(
            &app,
            request(Method::GET, "/credentials/BANK_ACCT?reveal=true", Some(TOKEN), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], "000123456789");
    }

    #[tokio::test]
    async fn test_get_errors() {
        let (app, _) = test_app();

        let (status, body) =
            send(&app, request(Method::GET, "/credentials/GITHUB_TOKEN", Some(TOKEN), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown key: GITHUB_TOKEN");

        let (status, body) =
            send(&app, request(Method::GET, "/credentials/COMPANY_EIN", Some(TOKEN), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No value found for key: COMPANY_EIN");
    }

    #[tokio::test]
    async fn test_post_then_get() {
        let (app, _) = test_app();

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/credentials/COMPANY_NAME",
                Some(TOKEN),
                Some(r#"{"value": "Acme"}"#),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["key"], "COMPANY_NAME");
        assert_eq!(body["masked_value"], "*cme");

        let (status, body) = send(
            &app,
            request(Method::GET, "/credentials/COMPANY_NAME?reveal=true", Some(TOKEN), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], "Acme");
    }

    #[tokio::test]
    async fn test_post_requires_token() {
        let (app, store) = test_app();
        let (status, _) = send(
            &app,
            request(
                Method::POST,
                "/credentials/COMPANY_NAME",
                None,
                Some(r#"{"value": "Acme"}"#),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_bad_requests() {
        let (app, store) = test_app();

        for body in ["{not json", r#"{"other": "x"}"#, r#"{"value": 42}"#, r#"{"value": ""}"#] {
            let (status, json) = send(
                &app,
                request(Method::POST, "/credentials/COMPANY_NAME", Some(TOKEN), Some(body)),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert!(json["error"].is_string());
        }

        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_unknown_name() {
        let (app, _) = test_app();
        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/credentials/AWS_SECRET",
                Some(TOKEN),
                Some(r#"{"value": "x"}"#),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown key: AWS_SECRET");
    }

    #[tokio::test]
    async fn test_list_keeps_allow_list_order() {
        let (app, store) = test_app();
        store.set("COMPANY_NAME", "Acme").await.unwrap();
        store.set("BANK_ACCT", "000123456789").await.unwrap();
        store.set("COMPANY_OWNER_SSN", "123-45-6789").await.unwrap();

        let (status, body) =
            send(&app, request(Method::GET, "/credentials", Some(TOKEN), None)).await;
        assert_eq!(status, StatusCode::OK);
        let keys: Vec<&str> = body["credentials"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["COMPANY_OWNER_SSN", "BANK_ACCT", "COMPANY_NAME"]);
    }

    #[tokio::test]
    async fn test_unsupported_method_is_unknown_endpoint() {
        let (app, store) = test_app();

        let (status, body) = send(
            &app,
            request(Method::POST, "/credentials", Some(TOKEN), Some(r#"{"value": "x"}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Unknown endpoint");

        let (status, body) = send(
            &app,
            request(Method::DELETE, "/credentials/COMPANY_NAME", Some(TOKEN), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Unknown endpoint");

        let (status, _) =
            send(&app, request(Method::DELETE, "/credentials/COMPANY_NAME", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_without_content_type() {
        let (app, store) = test_app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/credentials/COMPANY_NAME")
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
            .body(Body::from(r#"{"value": "Acme2"}"#))
            .unwrap();

        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["masked_value"], "**me2");
        assert_eq!(store.get("COMPANY_NAME").await.unwrap().expose_secret(), "Acme2");
    }

    #[tokio::test]
    async fn test_post_body_error_messages() {
        let (app, _) = test_app();

        let (_, body) = send(
            &app,
            request(Method::POST, "/credentials/COMPANY_NAME", Some(TOKEN), Some("{not json")),
        )
        .await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));

        let (_, body) = send(
            &app,
            request(
                Method::POST,
                "/credentials/COMPANY_NAME",
                Some(TOKEN),
                Some(r#"{"other": "x"}"#),
            ),
        )
        .await;
        assert_eq!(body["error"], "Missing or invalid field: value");
    }

    #[tokio::test]
    async fn test_get_bad_query_is_json_error() {
        let (app, store) = test_app();
        store.set("COMPANY_NAME", "Acme").await.unwrap();

        let (status, body) = send(
            &app,
            request(Method::GET, "/credentials/COMPANY_NAME?reveal=1", Some(TOKEN), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query string"));
    }

    #[tokio::test]
    async fn test_get_bad_path_is_json_error() {
        let (app, _) = test_app();

        let (status, body) =
            send(&app, request(Method::GET, "/credentials/%FF", Some(TOKEN), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid path"));
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let store = CredentialStore::new(Arc::new(MemoryBackend::unavailable()));
        let config = ServerConfig::new(
            "127.0.0.1",
            0,
            ApiKey::resolve_from(Some(TOKEN.to_string()), None),
        );
        let app = Server::new(config, store).router();

        let (status, _) = send(
            &app,
            request(
                Method::POST,
                "/credentials/COMPANY_NAME",
                Some(TOKEN),
                Some(r#"{"value": "Acme"}"#),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
