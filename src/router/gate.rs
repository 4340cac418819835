//! Per-transition admission decision.
//!
//! Each navigation moves `Start -> (Probing) -> Decided{Allow | Redirect}`.
//! Public routes decide immediately. Gated routes wait for the bootstrap
//! probe when the session has not been probed yet, then apply [`evaluate`].
//! Callers must not render gated content before a decision and must apply a
//! redirect as a replacing navigation.

use std::rc::Rc;

use super::intent::NavigationIntent;
use super::route::{RouteTable, Visibility};
use crate::session::Session;
use crate::session::state::SessionSnapshot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(NavigationIntent),
}

/// Observable progress of one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatePhase {
    Probing,
    Decided(GateDecision),
}

/// The admission rule, without any I/O.
#[must_use]
pub fn evaluate(snapshot: SessionSnapshot, visibility: Visibility, full_path: &str, pin_path: &str) -> GateDecision {
    match visibility {
        Visibility::Public => GateDecision::Allow,
        Visibility::Gated if snapshot.pin_enabled && !snapshot.is_authenticated => {
            GateDecision::Redirect(NavigationIntent::pin_entry(pin_path, full_path))
        }
        Visibility::Gated => GateDecision::Allow,
    }
}

#[derive(Clone)]
pub struct NavigationGate {
    session: Session,
    routes: Rc<RouteTable>,
}

impl NavigationGate {
    #[must_use]
    pub fn new(session: Session, routes: RouteTable) -> Self {
        Self { session, routes: Rc::new(routes) }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Phase to show before [`NavigationGate::decide`] resolves.
    #[must_use]
    pub fn initial_phase(&self, full_path: &str) -> GatePhase {
        let snapshot = self.session.snapshot();
        if self.routes.visibility(full_path) == Visibility::Gated && !snapshot.probed {
            GatePhase::Probing
        } else {
            GatePhase::Decided(self.evaluate_now(full_path, snapshot))
        }
    }

    /// Decide whether navigation to `full_path` may proceed.
    pub async fn decide(&self, full_path: &str) -> GateDecision {
        let visibility = self.routes.visibility(full_path);
        if visibility == Visibility::Public {
            return GateDecision::Allow;
        }
        if !self.session.snapshot().probed {
            self.session.ensure_probed().await;
        }
        let decision = self.evaluate_now(full_path, self.session.snapshot());
        if let GateDecision::Redirect(intent) = &decision {
            tracing::debug!(path = %full_path, to = %intent.href(), "navigation gated");
        }
        decision
    }

    fn evaluate_now(&self, full_path: &str, snapshot: SessionSnapshot) -> GateDecision {
        evaluate(snapshot, self.routes.visibility(full_path), full_path, self.routes.pin_route().path)
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
