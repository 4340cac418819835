use super::*;
use crate::config::ProbeFailurePolicy;
use crate::net::transport::{Method, TransportError};
use crate::test_helpers::{STATUS, harness, harness_with, json_reply, status_body};

fn snapshot(pin_enabled: bool, is_authenticated: bool) -> SessionSnapshot {
    SessionSnapshot { pin_enabled, is_authenticated, loading: false, probed: true }
}

// =============================================================
// evaluate
// =============================================================

#[test]
fn public_routes_never_redirect() {
    for pin in [false, true] {
        for auth in [false, true] {
            assert_eq!(evaluate(snapshot(pin, auth), Visibility::Public, "/pin", "/pin"), GateDecision::Allow);
        }
    }
}

#[test]
fn pin_disabled_allows_without_authentication() {
    assert_eq!(evaluate(snapshot(false, false), Visibility::Gated, "/suche", "/pin"), GateDecision::Allow);
}

#[test]
fn authenticated_session_is_allowed() {
    assert_eq!(evaluate(snapshot(true, true), Visibility::Gated, "/suche", "/pin"), GateDecision::Allow);
}

#[test]
fn missing_session_redirects_with_full_path() {
    let decision = evaluate(snapshot(true, false), Visibility::Gated, "/dokumente/42?tab=ocr", "/pin");
    assert_eq!(
        decision,
        GateDecision::Redirect(NavigationIntent::pin_entry("/pin", "/dokumente/42?tab=ocr"))
    );
}

// =============================================================
// NavigationGate::decide
// =============================================================

#[tokio::test]
async fn public_route_decides_without_probing() {
    let h = harness();
    assert_eq!(h.ctx.gate.decide("/pin?redirect=%2F").await, GateDecision::Allow);
    assert_eq!(h.transport.calls(STATUS), 0);
}

#[tokio::test]
async fn first_gated_navigation_probes_then_redirects() {
    let h = harness();
    h.transport.reply(Method::Get, STATUS, 200, status_body(true, false));

    let decision = h.ctx.gate.decide("/documents/42").await;

    assert_eq!(decision, GateDecision::Redirect(NavigationIntent::pin_entry("/pin", "/documents/42")));
    assert_eq!(h.transport.calls(STATUS), 1);
}

#[tokio::test]
async fn pin_disabled_server_allows_everything() {
    let h = harness();
    h.transport.reply(Method::Get, STATUS, 200, status_body(false, true));

    assert_eq!(h.ctx.gate.decide("/documents/42").await, GateDecision::Allow);
    assert_eq!(h.ctx.gate.decide("/einstellungen").await, GateDecision::Allow);
    assert_eq!(h.transport.calls(STATUS), 1);
}

#[tokio::test]
async fn concurrent_first_navigations_share_one_probe() {
    let h = harness();
    let release = h.transport.defer(Method::Get, STATUS);
    let gate = h.ctx.gate.clone();

    let (a, b, c, ()) = futures::join!(gate.decide("/dokumente"), gate.decide("/suche"), gate.decide("/steuer"), async move {
        let _ = release.send(json_reply(200, status_body(true, false)));
    });

    assert_eq!(h.transport.calls(STATUS), 1);
    for (decision, path) in [(a, "/dokumente"), (b, "/suche"), (c, "/steuer")] {
        assert_eq!(decision, GateDecision::Redirect(NavigationIntent::pin_entry("/pin", path)));
    }
}

#[tokio::test]
async fn failed_probe_fails_open_by_default() {
    let h = harness();
    h.transport.fail(Method::Get, STATUS, TransportError::Network("offline".into()));

    assert_eq!(h.ctx.gate.decide("/upload").await, GateDecision::Allow);
}

#[tokio::test]
async fn failed_probe_redirects_when_failing_closed() {
    let h = harness_with(ProbeFailurePolicy::FailClosed, "/");
    h.transport.fail(Method::Get, STATUS, TransportError::Timeout);

    assert_eq!(
        h.ctx.gate.decide("/upload").await,
        GateDecision::Redirect(NavigationIntent::pin_entry("/pin", "/upload"))
    );
}

#[tokio::test]
async fn decision_follows_later_login() {
    let h = harness();
    h.transport.reply(Method::Get, STATUS, 200, status_body(true, false));
    h.transport.reply(Method::Post, "/api/auth/login", 200, serde_json::json!({"success": true}));

    assert!(matches!(h.ctx.gate.decide("/scan").await, GateDecision::Redirect(_)));
    assert!(h.ctx.session.login("1234").await.is_accepted());
    assert_eq!(h.ctx.gate.decide("/scan").await, GateDecision::Allow);
}

// =============================================================
// initial_phase
// =============================================================

#[tokio::test]
async fn initial_phase_is_probing_until_the_probe_lands() {
    let h = harness();
    assert_eq!(h.ctx.gate.initial_phase("/suche"), GatePhase::Probing);
    assert_eq!(h.ctx.gate.initial_phase("/pin"), GatePhase::Decided(GateDecision::Allow));

    h.transport.reply(Method::Get, STATUS, 200, status_body(true, true));
    h.ctx.session.ensure_probed().await;

    assert_eq!(h.ctx.gate.initial_phase("/suche"), GatePhase::Decided(GateDecision::Allow));
}
