//! Navigation seam used by the invalidator and the gate's callers.

use std::cell::RefCell;

use super::intent::NavigationIntent;

/// Access to the application's router.
pub trait Navigator {
    /// Full path (with query) of the route currently displayed.
    fn current_path(&self) -> String;

    /// Navigate to `intent`, replacing the current history entry so the user
    /// cannot go back into the view that was just left.
    fn replace(&self, intent: &NavigationIntent);
}

/// Router without a browser: tracks the current path and records every
/// replacement. Used by the CLI and tests.
#[derive(Debug)]
pub struct MemoryNavigator {
    current: RefCell<String>,
    history: RefCell<Vec<NavigationIntent>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self { current: RefCell::new(initial.into()), history: RefCell::new(Vec::new()) }
    }

    /// Simulate a user navigation (no gate, no history record).
    pub fn visit(&self, path: impl Into<String>) {
        *self.current.borrow_mut() = path.into();
    }

    /// Replacing navigations issued so far, oldest first.
    #[must_use]
    pub fn replacements(&self) -> Vec<NavigationIntent> {
        self.history.borrow().clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.current.borrow().clone()
    }

    fn replace(&self, intent: &NavigationIntent) {
        *self.current.borrow_mut() = intent.href();
        self.history.borrow_mut().push(intent.clone());
    }
}
