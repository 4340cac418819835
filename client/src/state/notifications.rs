//! Toast notifications.
//!
//! DESIGN
//! ======
//! [`NotificationState`] is plain data plus one [`TimerGuard`] per toast that
//! auto-dismisses. Dropping a guard cancels its timer, so removing a toast
//! early (close button, logout) never leaves a timer behind that would later
//! remove an unrelated entry. [`Notifier`] wraps the state in a local signal
//! and owns the browser timers.

use std::collections::HashMap;
use std::time::Duration;

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    /// How long a toast of this kind stays up by default.
    #[must_use]
    pub fn default_duration(self) -> Duration {
        match self {
            Self::Error => Duration::from_secs(6),
            Self::Success | Self::Info => Duration::from_secs(4),
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
            Self::Info => "toast toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// Cancels a pending timer when dropped.
pub struct TimerGuard {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerGuard {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Release the guard without cancelling (the timer already fired).
    pub fn disarm(mut self) {
        self.cancel = None;
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[derive(Default)]
pub struct NotificationState {
    toasts: Vec<Toast>,
    timers: HashMap<u64, TimerGuard>,
    next_id: u64,
}

impl NotificationState {
    /// Visible toasts, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Append a toast and return its id. Ids start at 1 and only grow.
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, message: message.into(), kind });
        id
    }

    /// Attach the auto-dismiss timer for `id`. A guard for a toast that is
    /// already gone is dropped, which cancels it.
    pub fn arm(&mut self, id: u64, guard: TimerGuard) {
        if self.toasts.iter().any(|t| t.id == id) {
            self.timers.insert(id, guard);
        }
    }

    /// Dismiss a toast before its timer fires. Returns whether it existed.
    pub fn remove(&mut self, id: u64) -> bool {
        self.timers.remove(&id);
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Timer callback for `id`.
    pub fn expire(&mut self, id: u64) {
        if let Some(guard) = self.timers.remove(&id) {
            guard.disarm();
        }
        self.toasts.retain(|t| t.id != id);
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

/// Context handle for posting and dismissing toasts.
#[derive(Clone, Copy)]
pub struct Notifier {
    state: RwSignal<NotificationState, LocalStorage>,
}

impl Notifier {
    pub fn provide() -> Self {
        let notifier = Self { state: RwSignal::new_local(NotificationState::default()) };
        provide_context(notifier);
        notifier
    }

    /// Post a toast. `None` or a zero duration keeps it until dismissed.
    pub fn add(&self, message: impl Into<String>, kind: ToastKind, duration: Option<Duration>) -> u64 {
        let message = message.into();
        let mut id = 0;
        self.state.update(|s| id = s.push(message, kind));
        if let Some(after) = duration.filter(|d| !d.is_zero()) {
            self.schedule(id, after);
        }
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.add(message, ToastKind::Success, Some(ToastKind::Success.default_duration()))
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.add(message, ToastKind::Error, Some(ToastKind::Error.default_duration()))
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.add(message, ToastKind::Info, Some(ToastKind::Info.default_duration()))
    }

    pub fn remove(&self, id: u64) {
        self.state.update(|s| {
            s.remove(id);
        });
    }

    /// Tracked copy of the visible toasts.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.state.with(|s| s.toasts().to_vec())
    }

    #[cfg(feature = "csr")]
    fn schedule(&self, id: u64, after: Duration) {
        let (sleep, handle) = futures::future::abortable(gloo_timers::future::sleep(after));
        self.state.update(|s| s.arm(id, TimerGuard::new(move || handle.abort())));
        let state = self.state;
        leptos::task::spawn_local(async move {
            if sleep.await.is_ok() {
                state.update(|s| s.expire(id));
            }
        });
    }

    #[cfg(not(feature = "csr"))]
    fn schedule(&self, _id: u64, _after: Duration) {}
}

#[cfg(test)]
#[path = "notifications_test.rs"]
mod tests;
