use super::*;

use zettelwirtschaft::net::api::ApiClient;
use zettelwirtschaft::net::transport::Method;

#[test]
fn offline_transport_fails_as_network_error() {
    let transport = browser_transport(Duration::from_secs(1));
    let result = futures::executor::block_on(transport.send(HttpRequest::new(Method::Get, "/api/auth/status", None)));
    assert!(matches!(result, Err(TransportError::Network(_))));
}

#[test]
fn api_client_surfaces_offline_failure_as_transport_error() {
    let api = ApiClient::new(browser_transport(Duration::from_secs(1)), "/api");
    let err = futures::executor::block_on(api.get_json::<serde_json::Value>("/documents")).unwrap_err();
    assert!(!err.is_unauthorized());
    assert_eq!(err.status(), None);
}
