use serde_json::json;

use crate::config::ProbeFailurePolicy;
use crate::net::api::ApiError;
use crate::net::transport::Method;
use crate::router::intent::NavigationIntent;
use crate::test_helpers::{Harness, LOGIN, harness, harness_with};

async fn authenticate(h: &Harness) {
    h.transport.reply(Method::Post, LOGIN, 200, json!({"success": true}));
    assert!(h.ctx.session.login("1234").await.is_accepted());
}

#[tokio::test]
async fn unauthorized_resets_and_replaces_once() {
    let h = harness_with(ProbeFailurePolicy::FailOpen, "/suche");
    authenticate(&h).await;
    h.transport.reply(Method::Get, "/api/search", 401, json!({"detail": "Nicht angemeldet"}));

    let err = h.ctx.api.get_json::<serde_json::Value>("/search").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.detail(), Some("Nicht angemeldet"));
    assert!(!h.ctx.session.snapshot().is_authenticated);
    assert_eq!(h.navigator.replacements(), vec![NavigationIntent::pin_entry("/pin", "/suche")]);
}

#[tokio::test]
async fn unauthorized_keeps_query_of_current_path() {
    let h = harness_with(ProbeFailurePolicy::FailOpen, "/dokumente?tag=steuer");
    h.transport.reply(Method::Get, "/api/documents", 401, json!({}));

    let _ = h.ctx.api.get_json::<serde_json::Value>("/documents").await;

    let replacements = h.navigator.replacements();
    assert_eq!(replacements.len(), 1);
    assert_eq!(replacements[0].redirect, "/dokumente?tag=steuer");
}

#[tokio::test]
async fn unauthorized_on_pin_route_does_not_navigate() {
    let h = harness_with(ProbeFailurePolicy::FailOpen, "/pin?redirect=%2Fsuche");
    h.transport.reply(Method::Get, "/api/stats", 401, json!({}));

    let err = h.ctx.api.get_json::<serde_json::Value>("/stats").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(h.navigator.replacements().is_empty());
}

#[tokio::test]
async fn second_unauthorized_after_redirect_is_idempotent() {
    let h = harness_with(ProbeFailurePolicy::FailOpen, "/garantien");
    h.transport.reply(Method::Get, "/api/warranties", 401, json!({}));
    h.transport.reply(Method::Get, "/api/warranties/stats", 401, json!({}));

    let _ = h.ctx.api.get_json::<serde_json::Value>("/warranties").await;
    let _ = h.ctx.api.get_json::<serde_json::Value>("/warranties/stats").await;

    assert_eq!(h.navigator.replacements().len(), 1);
}

#[tokio::test]
async fn other_errors_leave_session_alone() {
    let h = harness_with(ProbeFailurePolicy::FailOpen, "/steuer");
    authenticate(&h).await;
    h.transport.reply(Method::Get, "/api/tax/years", 500, json!({"detail": "Datenbank nicht erreichbar"}));

    let err = h.ctx.api.get_json::<serde_json::Value>("/tax/years").await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Status { status: 500, detail: Some("Datenbank nicht erreichbar".to_owned()) }
    );
    assert_eq!(err.user_message(), "Datenbank nicht erreichbar");
    assert!(h.ctx.session.snapshot().is_authenticated);
    assert!(h.navigator.replacements().is_empty());
}

#[tokio::test]
async fn unauthorized_without_navigation_still_reaches_caller() {
    let h = harness();
    h.transport.reply(Method::Post, "/api/system/backup", 401, json!({}));

    let err = h.ctx.api.post_empty("/system/backup").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(h.navigator.replacements().len(), 1);
    assert_eq!(h.navigator.replacements()[0].redirect, "/");
}
