//! Startup wiring for the session gate.
//!
//! The context is built once and handed to the router integration and to
//! every view that issues requests. Nothing is looked up through globals.

use std::rc::Rc;

use crate::config::GateConfig;
use crate::net::api::ApiClient;
use crate::net::transport::Transport;
use crate::router::gate::NavigationGate;
use crate::router::navigator::Navigator;
use crate::router::route::RouteTable;
use crate::session::Session;
use crate::session::invalidator::SessionInvalidator;
use crate::session::state::SessionStore;

#[derive(Clone)]
pub struct SessionContext {
    pub session: Session,
    pub gate: NavigationGate,
    pub api: ApiClient,
}

impl SessionContext {
    #[must_use]
    pub fn new(
        config: &GateConfig,
        routes: RouteTable,
        transport: Rc<dyn Transport>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let store = SessionStore::new();
        let invalidator = SessionInvalidator::new(store.clone(), navigator, routes.pin_route().path);
        let api = ApiClient::new(transport, &config.api_base).with_invalidator(invalidator);
        let session = Session::new(store, api.clone(), config.probe_failure);
        let gate = NavigationGate::new(session.clone(), routes);
        Self { session, gate, api }
    }

    #[must_use]
    pub fn pin_path(&self) -> &'static str {
        self.gate.routes().pin_route().path
    }
}
