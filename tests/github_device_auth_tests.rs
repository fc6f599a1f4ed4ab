mod auth_support;

use chrono::{Duration, Utc};
use ggi::auth::{AuthError, AuthorizationSession, Credential, GitHubDeviceAuth, PollOutcome};
use serde_json::json;
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_support::{closed_base_url, github_auth, ACCESS_TOKEN_PATH, DEVICE_CODE_PATH, USER_PATH};

fn active_session() -> AuthorizationSession {
    AuthorizationSession::new(
        "device-code-1",
        "ABCD-1234",
        "https://github.com/login/device",
        5,
        Utc::now() + Duration::minutes(15),
    )
}

#[tokio::test]
async fn device_code_request_sends_only_client_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DEVICE_CODE_PATH))
        .and(header("accept", "application/json"))
        .and(body_string("client_id=Iv1.c83e19acec653315"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_code": "D1",
            "user_code": "ABCD-1234",
            "verification_uri": "https://example/activate",
            "expires_in": 900,
            "interval": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = github_auth(&server)
        .request_device_code()
        .await
        .expect("device code");

    assert_eq!(session.user_code(), "ABCD-1234");
    assert_eq!(session.verification_uri(), "https://example/activate");
    assert_eq!(session.poll_interval().as_secs(), 5);
    assert!(session.expires_at() > Utc::now());
}

#[tokio::test]
async fn device_code_response_missing_interval_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DEVICE_CODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_code": "D1",
            "user_code": "ABCD-1234",
            "verification_uri": "https://example/activate"
        })))
        .mount(&server)
        .await;

    let result = github_auth(&server).request_device_code().await;
    assert!(
        matches!(result, Err(AuthError::Protocol(message)) if message == "malformed device-code response")
    );
}

#[tokio::test]
async fn device_code_http_error_is_server_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DEVICE_CODE_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let result = github_auth(&server).request_device_code().await;
    assert!(matches!(
        result,
        Err(AuthError::Server { status: 404, body }) if body == "Not Found"
    ));
}

#[tokio::test]
async fn device_code_transport_failure_is_network_error() {
    let closed = closed_base_url();
    let auth = GitHubDeviceAuth::with_base_urls(&closed, &closed);

    let result = auth.request_device_code().await;
    assert!(matches!(result, Err(AuthError::Network(_))));
}

#[tokio::test]
async fn exchange_sends_device_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ACCESS_TOKEN_PATH))
        .and(header("accept", "application/json"))
        .and(body_string_contains("client_id=Iv1.c83e19acec653315"))
        .and(body_string_contains("device_code=device-code-1"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Adevice_code",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "gho_abc",
            "token_type": "bearer",
            "scope": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = github_auth(&server)
        .exchange_device_code(&active_session())
        .await
        .expect("exchange");

    match outcome {
        PollOutcome::Success(credential) => assert_eq!(credential.expose(), "gho_abc"),
        other => panic!("expected Success, got {other:?}"),
    }
}

#[tokio::test]
async fn exchange_pending_classifies_as_pending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ACCESS_TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "authorization_pending",
            "error_description": "The authorization request is still pending."
        })))
        .mount(&server)
        .await;

    let outcome = github_auth(&server)
        .exchange_device_code(&active_session())
        .await
        .expect("exchange");
    assert!(matches!(outcome, PollOutcome::Pending));
}

#[tokio::test]
async fn exchange_server_failure_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ACCESS_TOKEN_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = github_auth(&server)
        .exchange_device_code(&active_session())
        .await;
    assert!(matches!(result, Err(AuthError::Server { status: 500, .. })));
}

#[tokio::test]
async fn fetch_login_presents_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .and(header("authorization", "Bearer gho_abc"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "id": 583231
        })))
        .expect(1)
        .mount(&server)
        .await;

    let login = github_auth(&server)
        .fetch_login(&Credential::new("gho_abc"))
        .await
        .expect("login");
    assert_eq!(login, "octocat");
}

#[tokio::test]
async fn fetch_login_unauthorized_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials"
        })))
        .mount(&server)
        .await;

    let result = github_auth(&server)
        .fetch_login(&Credential::new("revoked"))
        .await;
    assert!(matches!(result, Err(AuthError::Unauthorized)));
}

#[tokio::test]
async fn fetch_login_without_login_field_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .mount(&server)
        .await;

    let result = github_auth(&server)
        .fetch_login(&Credential::new("gho_abc"))
        .await;
    assert!(matches!(result, Err(AuthError::Protocol(_))));
}
