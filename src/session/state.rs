//! Session store: the authentication picture shared by the gate and the
//! response pipeline.
//!
//! DESIGN
//! ======
//! Two asynchronous flows write here without coordinating: the probe/login
//! path and the 401 invalidation path. Writes that complete after a network
//! round trip carry a [`Ticket`] taken when they started. Logins, logouts and
//! resets advance the epoch; probes only read it. A result whose ticket is no
//! longer current is stale and may not set `is_authenticated`.

use std::cell::RefCell;
use std::rc::Rc;

/// Copyable view of the session for readers and UI mirrors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Whether the server requires a PIN at all.
    pub pin_enabled: bool,
    /// Whether the server currently accepts this client's session.
    pub is_authenticated: bool,
    /// True while a login is in flight. Advisory only.
    pub loading: bool,
    /// Latched once the initial probe finished, successfully or not.
    pub probed: bool,
}

/// Sequence token captured by an operation when it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

type Listener = Rc<dyn Fn(SessionSnapshot)>;

#[derive(Default)]
struct StoreInner {
    snapshot: SessionSnapshot,
    epoch: u64,
    logins_in_flight: u32,
    listeners: Vec<Listener>,
}

/// Shared handle to the session picture. Clones point at the same state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.borrow().snapshot
    }

    /// Register a callback invoked with the new snapshot after every mutation.
    pub fn subscribe(&self, listener: impl Fn(SessionSnapshot) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    /// Start a probe or login cycle. Anything still in flight becomes stale.
    pub(crate) fn issue_ticket(&self) -> Ticket {
        let mut inner = self.inner.borrow_mut();
        inner.epoch += 1;
        Ticket(inner.epoch)
    }

    /// Ticket for the current epoch, without invalidating anything in flight.
    pub(crate) fn current_ticket(&self) -> Ticket {
        Ticket(self.inner.borrow().epoch)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.inner.borrow().epoch == ticket.0
    }

    /// Record a probe result. Returns `false` when the ticket was stale, in
    /// which case only `pin_enabled` and the `probed` latch were updated.
    ///
    /// A current probe may grant authentication but never revoke it; only
    /// [`SessionStore::reset`] clears the flag, and it advances the epoch.
    pub(crate) fn apply_probe(&self, ticket: Ticket, pin_enabled: bool, authenticated: bool) -> bool {
        let current = self.mutate(|inner| {
            let current = inner.epoch == ticket.0;
            inner.snapshot.pin_enabled = pin_enabled;
            inner.snapshot.probed = true;
            if current && authenticated {
                inner.snapshot.is_authenticated = true;
            }
            current
        });
        if !current {
            tracing::debug!(?ticket, "stale probe result; authentication flag left untouched");
        }
        current
    }

    /// Mark the session authenticated after an accepted login.
    /// Returns `false` if a logout or reset happened meanwhile.
    pub(crate) fn apply_login(&self, ticket: Ticket) -> bool {
        let current = self.mutate(|inner| {
            let current = inner.epoch == ticket.0;
            if current {
                inner.snapshot.is_authenticated = true;
            }
            current
        });
        if !current {
            tracing::debug!(?ticket, "login accepted after session was cleared; ignoring");
        }
        current
    }

    /// Clear the authenticated flag without contacting the server.
    pub fn reset(&self) {
        self.mutate(|inner| {
            inner.epoch += 1;
            inner.snapshot.is_authenticated = false;
        });
    }

    /// Raise `loading` until the returned guard is dropped.
    pub(crate) fn begin_login(&self) -> LoadingGuard {
        self.mutate(|inner| {
            inner.logins_in_flight += 1;
            inner.snapshot.loading = true;
        });
        LoadingGuard { store: self.clone() }
    }

    fn end_login(&self) {
        self.mutate(|inner| {
            inner.logins_in_flight = inner.logins_in_flight.saturating_sub(1);
            inner.snapshot.loading = inner.logins_in_flight > 0;
        });
    }

    /// Apply `f` and notify listeners once the borrow is released.
    fn mutate<R>(&self, f: impl FnOnce(&mut StoreInner) -> R) -> R {
        let (result, snapshot, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let result = f(&mut inner);
            (result, inner.snapshot, inner.listeners.clone())
        };
        for listener in &listeners {
            listener(snapshot);
        }
        result
    }
}

/// Clears the in-flight login count on drop, including early returns and
/// cancelled futures.
pub(crate) struct LoadingGuard {
    store: SessionStore,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.store.end_login();
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
