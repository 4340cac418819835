//! Session operations: probe, login, logout, reset.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`Session`] owns the primitive operations over the [`SessionStore`]. The
//! navigation gate reads through it (probing first when needed); the
//! [`SessionInvalidator`](invalidator::SessionInvalidator) writes to the same
//! store from the response pipeline.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here returns an error. A failed probe falls back to the
//! configured [`ProbeFailurePolicy`], a failed login becomes
//! [`LoginResult::Rejected`], and a failed logout is logged and ignored.

pub mod invalidator;
pub mod probe;
pub mod state;

use std::rc::Rc;

use futures::FutureExt;

use crate::config::ProbeFailurePolicy;
use crate::net::api::{self, ApiClient};
use probe::ProbeLatch;
use state::{SessionSnapshot, SessionStore};

/// Shown when the server rejects a PIN without saying why.
pub const WRONG_PIN_MESSAGE: &str = "Falscher PIN";
/// Shown when the login call itself failed.
pub const LOGIN_FAILED_MESSAGE: &str = "Fehler bei der Anmeldung";

/// Outcome of [`Session::login`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginResult {
    Accepted,
    Rejected { detail: String },
}

impl LoginResult {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Cheap-to-clone handle over the store, the API client and the probe latch.
#[derive(Clone)]
pub struct Session {
    store: SessionStore,
    api: ApiClient,
    latch: Rc<ProbeLatch>,
    policy: ProbeFailurePolicy,
}

impl Session {
    #[must_use]
    pub fn new(store: SessionStore, api: ApiClient, policy: ProbeFailurePolicy) -> Self {
        Self { store, api, latch: Rc::new(ProbeLatch::new()), policy }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot()
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Ask the server for the session picture and record it.
    ///
    /// Always hits the network; use [`Session::ensure_probed`] for the
    /// once-per-process bootstrap.
    pub async fn probe(&self) {
        run_probe(self.store.clone(), self.api.clone(), self.policy).await;
    }

    /// Run the bootstrap probe at most once; concurrent callers share it.
    pub async fn ensure_probed(&self) {
        let store = self.store.clone();
        let api = self.api.clone();
        let policy = self.policy;
        self.latch
            .get_or_start(move || run_probe(store, api, policy).boxed_local())
            .await;
    }

    /// Submit a PIN. Never fails; rejections come back as a result value.
    pub async fn login(&self, pin: &str) -> LoginResult {
        let _loading = self.store.begin_login();
        let ticket = self.store.issue_ticket();

        match api::submit_pin(&self.api, pin).await {
            Ok(response) if response.success => {
                self.store.apply_login(ticket);
                tracing::info!("pin accepted");
                LoginResult::Accepted
            }
            Ok(response) => LoginResult::Rejected {
                detail: response.detail.unwrap_or_else(|| WRONG_PIN_MESSAGE.to_owned()),
            },
            Err(e) => {
                tracing::warn!(error = %e, "login request failed");
                LoginResult::Rejected { detail: e.detail().unwrap_or(LOGIN_FAILED_MESSAGE).to_owned() }
            }
        }
    }

    /// Clear the session locally, then tell the server. The local clear
    /// stands whatever the server call does.
    pub async fn logout(&self) {
        self.store.reset();
        if let Err(e) = api::end_session(&self.api).await {
            tracing::warn!(error = %e, "logout request failed; session cleared locally");
        }
    }

    /// Clear the authenticated flag without contacting the server.
    pub fn reset(&self) {
        self.store.reset();
    }
}

async fn run_probe(store: SessionStore, api: ApiClient, policy: ProbeFailurePolicy) {
    let ticket = store.current_ticket();
    let (pin_enabled, authenticated) = match api::fetch_auth_status(&api).await {
        Ok(status) => (status.pin_enabled, status.authenticated),
        Err(e) => {
            tracing::warn!(error = %e, ?policy, "auth status probe failed");
            policy.fallback()
        }
    };
    store.apply_probe(ticket, pin_enabled, authenticated);
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
