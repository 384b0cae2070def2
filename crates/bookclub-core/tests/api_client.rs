use bookclub_core::api::client::{ApiClient, ClientConfig};
use bookclub_core::core::services::resource_service::ResourceService;
use bookclub_core::core::services::traits::{CreateService, DeleteService};
use bookclub_core::core::services::types::Resource;
use bookclub_core::error::ApiError;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(server.uri()).with_token("secret-token")).unwrap()
}

#[tokio::test]
async fn test_requests_carry_bearer_and_json_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .and(header("authorization", "Bearer secret-token"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let rows: Vec<Value> = client(&server).get("/books", &[]).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_data_envelope_is_unwrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1}],
            "meta": {"total": 1}
        })))
        .mount(&server)
        .await;

    let response = client(&server).get_raw("/books", &[]).await.unwrap();
    assert_eq!(response.data, json!([{"id": 1}]));
    assert_eq!(response.meta, Some(json!({"total": 1})));
}

#[tokio::test]
async fn test_bare_body_is_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genres"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "drama"}])))
        .mount(&server)
        .await;

    let response = client(&server).get_raw("/genres", &[]).await.unwrap();
    assert_eq!(response.data, json!([{"name": "drama"}]));
    assert_eq!(response.meta, None);
}

#[tokio::test]
async fn test_error_payload_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": "Unprocessable Entity",
            "message": "sort_by must be one of: title, createdAt",
            "statusCode": 422,
            "field": "sort_by"
        })))
        .mount(&server)
        .await;

    let err = client(&server).get_raw("/books", &[]).await.unwrap_err();
    match err {
        ApiError::Server { status, payload, .. } => {
            assert_eq!(status, 422);
            assert_eq!(payload.error, "Unprocessable Entity");
            assert_eq!(payload.message, "sort_by must be one of: title, createdAt");
            assert_eq!(payload.status_code, Some(422));
            assert_eq!(payload.extra.get("field"), Some(&json!("sort_by")));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unstructured_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = client(&server).get_raw("/books", &[]).await.unwrap_err();
    match err {
        ApiError::Server { status, payload, .. } => {
            assert_eq!(status, 500);
            assert_eq!(payload.error, "Internal Server Error");
            assert_eq!(payload.message, "upstream exploded");
            assert_eq!(payload.status_code, Some(500));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Unauthorized",
            "message": "token expired"
        })))
        .mount(&server)
        .await;

    let err = client(&server).get_raw("/books", &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { status: 401, .. }));
    assert_eq!(err.user_message(), "token expired");
}

#[tokio::test]
async fn test_forbidden_keeps_structured_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/books/3"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": "Forbidden",
            "message": "only admins may delete books",
            "statusCode": 403,
            "requiredRole": "admin"
        })))
        .mount(&server)
        .await;

    let err = client(&server).delete("/books/3").await.unwrap_err();
    match &err {
        ApiError::Unauthorized { status, payload, .. } => {
            assert_eq!(*status, 403);
            assert_eq!(payload.error, "Forbidden");
            assert_eq!(payload.status_code, Some(403));
            assert_eq!(payload.extra.get("requiredRole"), Some(&json!("admin")));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.user_message(), "only admins may delete books");
}

#[tokio::test]
async fn test_gateway_timeout_reports_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(504).set_body_json(json!({
            "error": "Gateway Timeout",
            "message": "upstream catalog down"
        })))
        .mount(&server)
        .await;

    let err = client(&server).get_raw("/books", &[]).await.unwrap_err();
    match &err {
        ApiError::ServerTimeout { status, payload, .. } => {
            assert_eq!(*status, 504);
            assert_eq!(payload.error, "Gateway Timeout");
            assert_eq!(payload.status_code, Some(504));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.status(), Some(504));
    assert_eq!(err.user_message(), "upstream catalog down");
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client(&server).get_raw("/books", &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_transport_failure() {
    let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:1").with_timeout(2)).unwrap();
    let err = client.get_raw("/books", &[]).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Transport { .. } | ApiError::Timeout { .. }
    ));
}

#[tokio::test]
async fn test_create_posts_json_body() {
    let server = MockServer::start().await;
    let body = json!({"name": "poetry", "description": "verse"});
    Mock::given(method("POST"))
        .and(path("/genres"))
        .and(body_json(&body))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"data": {"id": 9, "name": "poetry"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = ResourceService::new(client(&server), Resource::Genres);
    let created = service.create(&body).await.unwrap();
    assert_eq!(created["id"], 9);
}

#[tokio::test]
async fn test_delete_hits_item_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/books/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let service = ResourceService::new(client(&server), Resource::Books);
    service.delete(42).await.unwrap();
}
