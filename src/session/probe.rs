//! Bootstrap latch for the status probe.
//!
//! The first caller creates the probe future and caches it as a
//! [`Shared`] handle; every later caller, before or after it settles, awaits
//! that same handle. There is no flag checked across an await, so concurrent
//! first navigations cannot issue two probes.

use std::cell::RefCell;

use futures::future::{FutureExt, LocalBoxFuture, Shared};

pub type PendingProbe = Shared<LocalBoxFuture<'static, ()>>;

#[derive(Default)]
pub struct ProbeLatch {
    pending: RefCell<Option<PendingProbe>>,
}

impl ProbeLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached probe, creating it with `start` on first use.
    pub fn get_or_start<F>(&self, start: F) -> PendingProbe
    where
        F: FnOnce() -> LocalBoxFuture<'static, ()>,
    {
        let mut pending = self.pending.borrow_mut();
        if let Some(probe) = pending.as_ref() {
            tracing::debug!("joining cached status probe");
            return probe.clone();
        }
        let probe = start().shared();
        *pending = Some(probe.clone());
        probe
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

#[cfg(test)]
#[path = "probe_test.rs"]
mod tests;
