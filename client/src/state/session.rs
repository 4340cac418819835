//! Session handle for views.
//!
//! SYSTEM CONTEXT
//! ==============
//! The core `SessionContext` is `Rc`-based and lives on the UI thread, so it
//! is kept in local arena storage. A `RwSignal<SessionSnapshot>` mirrors the
//! store through its listener hook, which lets views react to login, logout
//! and 401 resets without polling.

use std::rc::Rc;

use leptos::prelude::*;
use zettelwirtschaft::router::navigator::Navigator;
use zettelwirtschaft::router::route::RouteTable;
use zettelwirtschaft::session::state::SessionSnapshot;
use zettelwirtschaft::{GateConfig, SessionContext};

use crate::net::transport::browser_transport;

#[derive(Clone, Copy)]
pub struct SessionHandle {
    context: StoredValue<SessionContext, LocalStorage>,
    snapshot: RwSignal<SessionSnapshot>,
}

impl SessionHandle {
    /// Build the session context and provide the handle to descendants.
    ///
    /// Must run under the `<Router>` that `navigator` drives.
    pub fn install(navigator: Rc<dyn Navigator>) -> Self {
        let config = GateConfig::default();
        let transport = browser_transport(config.request_timeout);
        let context = SessionContext::new(&config, RouteTable::standard(), transport, navigator);

        let snapshot = RwSignal::new(context.session.snapshot());
        context.session.store().subscribe(move |next| snapshot.set(next));

        let handle = Self { context: StoredValue::new_local(context), snapshot };
        provide_context(handle);
        handle
    }

    #[must_use]
    pub fn context(&self) -> SessionContext {
        self.context.get_value()
    }

    /// Reactive view of the session store.
    #[must_use]
    pub fn snapshot(&self) -> ReadSignal<SessionSnapshot> {
        self.snapshot.read_only()
    }
}
