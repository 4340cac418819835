//! Global reaction to server-side session rejection.
//!
//! SYSTEM CONTEXT
//! ==============
//! Installed on the [`ApiClient`](crate::net::api::ApiClient) response
//! pipeline. Runs for every 401, on any endpoint, before the error reaches
//! the view that issued the request.

use std::rc::Rc;

use super::state::SessionStore;
use crate::router::intent::{NavigationIntent, path_only};
use crate::router::navigator::Navigator;

pub struct SessionInvalidator {
    store: SessionStore,
    navigator: Rc<dyn Navigator>,
    pin_path: String,
}

impl SessionInvalidator {
    #[must_use]
    pub fn new(store: SessionStore, navigator: Rc<dyn Navigator>, pin_path: impl Into<String>) -> Self {
        Self { store, navigator, pin_path: pin_path.into() }
    }

    /// Reset the session and move the user to the PIN route.
    ///
    /// Returns the issued intent, or `None` when the user is already on the
    /// PIN route (no navigation, so repeated 401s cannot loop).
    pub fn on_unauthorized(&self) -> Option<NavigationIntent> {
        self.store.reset();

        let current = self.navigator.current_path();
        if path_only(&current) == self.pin_path {
            tracing::debug!(%current, "401 while on PIN route; no redirect");
            return None;
        }

        let intent = NavigationIntent::pin_entry(&self.pin_path, &current);
        tracing::info!(from = %current, to = %intent.href(), "session rejected; redirecting to PIN entry");
        self.navigator.replace(&intent);
        Some(intent)
    }
}

#[cfg(test)]
#[path = "invalidator_test.rs"]
mod tests;
