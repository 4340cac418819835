use super::*;
use crate::test_helpers::ScriptedTransport;

// =============================================================
// extract_detail
// =============================================================

#[test]
fn extract_detail_reads_string_detail() {
    assert_eq!(extract_detail(r#"{"detail":"Falscher PIN"}"#), Some("Falscher PIN".to_owned()));
}

#[test]
fn extract_detail_joins_validation_messages() {
    let body = r#"{"detail":[{"loc":["body","pin"],"msg":"field required"},{"msg":"too short"}]}"#;
    assert_eq!(extract_detail(body), Some("field required; too short".to_owned()));
}

#[test]
fn extract_detail_ignores_unusable_bodies() {
    assert_eq!(extract_detail(""), None);
    assert_eq!(extract_detail("<html>502</html>"), None);
    assert_eq!(extract_detail(r#"{"detail":"  "}"#), None);
    assert_eq!(extract_detail(r#"{"detail":42}"#), None);
    assert_eq!(extract_detail(r#"{"message":"x"}"#), None);
}

// =============================================================
// ApiError
// =============================================================

#[test]
fn user_message_falls_back_to_generic_text() {
    let err = ApiError::Status { status: 502, detail: None };
    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    assert_eq!(ApiError::Decode("eof".into()).user_message(), GENERIC_ERROR_MESSAGE);
}

#[test]
fn user_message_for_transport_errors_names_the_failure() {
    let err = ApiError::Transport(TransportError::Timeout);
    assert_eq!(err.user_message(), "request timed out");
    assert_eq!(err.status(), None);
    assert_eq!(err.detail(), None);
}

// =============================================================
// ApiClient
// =============================================================

#[test]
fn endpoint_joins_base_and_path() {
    let client = ApiClient::new(ScriptedTransport::new(), "/api/");
    assert_eq!(client.endpoint("/auth/status"), "/api/auth/status");
    assert_eq!(client.endpoint("documents/4"), "/api/documents/4");

    let bare = ApiClient::new(ScriptedTransport::new(), "");
    assert_eq!(bare.endpoint("/health"), "/health");
}

#[tokio::test]
async fn client_without_invalidator_still_reports_unauthorized() {
    let transport = ScriptedTransport::new();
    transport.reply(Method::Get, "/api/stats", 401, serde_json::json!({}));
    let client = ApiClient::new(transport, "/api");

    let err = client.get_json::<serde_json::Value>("/stats").await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn decode_error_on_schema_mismatch() {
    let transport = ScriptedTransport::new();
    transport.reply(Method::Get, "/api/auth/status", 200, serde_json::json!({"pin_enabled": "yes"}));
    let client = ApiClient::new(transport, "/api");

    let err = fetch_auth_status(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn success_passes_body_through() {
    let transport = ScriptedTransport::new();
    transport.reply(Method::Get, "/api/auth/status", 200, serde_json::json!({"pin_enabled": true, "authenticated": false}));
    let client = ApiClient::new(transport, "/api");

    let status = fetch_auth_status(&client).await.unwrap();
    assert_eq!(status, AuthStatus { pin_enabled: true, authenticated: false });
}

#[tokio::test]
async fn post_json_sends_body_to_prefixed_endpoint() {
    let transport = ScriptedTransport::new();
    transport.reply(Method::Post, "/api/auth/login", 200, serde_json::json!({"success": true}));
    let client = ApiClient::new(transport.clone(), "/api");

    let response = submit_pin(&client, "4711").await.unwrap();

    assert!(response.success);
    assert_eq!(
        transport.requests(),
        vec![HttpRequest::new(Method::Post, "/api/auth/login", Some(serde_json::json!({"pin": "4711"})))]
    );
}

#[tokio::test]
async fn post_empty_sends_no_body() {
    let transport = ScriptedTransport::new();
    transport.reply(Method::Post, "/api/auth/logout", 200, serde_json::json!({}));
    let client = ApiClient::new(transport.clone(), "/api");

    end_session(&client).await.unwrap();

    assert_eq!(transport.requests(), vec![HttpRequest::new(Method::Post, "/api/auth/logout", None)]);
}
