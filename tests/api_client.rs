use dbxtf::{ApiClient, ApiError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_current_user_valid_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2.0/preview/scim/v2/Me"))
        .and(header("authorization", "Bearer valid_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "4567",
            "userName": "someone@example.com",
            "displayName": "Someone",
        })))
        .mount(&mock_server)
        .await;

    let client =
        ApiClient::with_base_url("valid_token".to_string(), mock_server.uri()).unwrap();

    let user = client.current_user().await.unwrap();
    assert_eq!(user.id, "4567");
    assert_eq!(user.user_name, "someone@example.com");
}

#[tokio::test]
async fn test_current_user_invalid_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2.0/preview/scim/v2/Me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error_code": "401",
            "message": "Invalid access token.",
        })))
        .mount(&mock_server)
        .await;

    let client =
        ApiClient::with_base_url("invalid_token".to_string(), mock_server.uri()).unwrap();

    let result = client.current_user().await;

    if let Err(ApiError::Auth { message }) = result {
        assert_eq!(message, "Invalid access token.");
    } else {
        panic!("Expected ApiError::Auth");
    }
}

#[tokio::test]
async fn test_error_does_not_contain_token() {
    let mock_server = MockServer::start().await;
    let secret_token = "dapi_super_secret_token_xyz789";

    Mock::given(method("GET"))
        .and(path("/api/2.0/preview/scim/v2/Me"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error_code": "PERMISSION_DENIED",
            "message": "Token is not authorized",
        })))
        .mount(&mock_server)
        .await;

    let client =
        ApiClient::with_base_url(secret_token.to_string(), mock_server.uri()).unwrap();

    let result = client.current_user().await;
    let error_string = format!("{:?}", result);

    assert!(
        !error_string.contains(secret_token),
        "Error output must not contain the token"
    );
}

#[tokio::test]
async fn test_scim_not_found_uses_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2.0/preview/scim/v2/Groups/123"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:Error"],
            "detail": "Group with id 123 not found.",
            "status": "404",
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_base_url("t".to_string(), mock_server.uri()).unwrap();

    let err = client
        .get("/api/2.0/preview/scim/v2/Groups/123", &[])
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Group with id 123 not found.");
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/2.0/preview/scim/v2/Groups/123"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_base_url("t".to_string(), mock_server.uri()).unwrap();

    let body = client
        .patch(
            "/api/2.0/preview/scim/v2/Groups/123",
            &json!({"Operations": [{"op": "add", "value": {"members": [{"value": "4567"}]}}]}),
        )
        .await
        .unwrap();

    assert!(body.is_null());
}

#[tokio::test]
async fn test_delete_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/2.0/preview/scim/v2/Groups/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_base_url("t".to_string(), mock_server.uri()).unwrap();

    let body = client
        .delete("/api/2.0/preview/scim/v2/Groups/123", None)
        .await
        .unwrap();

    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2.0/clusters/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_base_url("t".to_string(), mock_server.uri()).unwrap();

    let err = client.get("/api/2.0/clusters/list", &[]).await.unwrap_err();
    match err {
        ApiError::Api {
            error_code,
            message,
            ..
        } => {
            assert_eq!(error_code, "INVALID_RESPONSE");
            assert!(message.starts_with("Failed to parse response"));
        }
        other => panic!("Expected ApiError::Api, got {:?}", other),
    }
}

#[tokio::test]
async fn test_network_error() {
    let client =
        ApiClient::with_base_url("t".to_string(), "http://127.0.0.1:1".to_string()).unwrap();

    let err = client.get("/api/2.0/clusters/list", &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
