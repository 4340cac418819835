//! Scripted transport and wiring shared by unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use futures::channel::oneshot;

use crate::config::{GateConfig, ProbeFailurePolicy};
use crate::context::SessionContext;
use crate::net::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
use crate::router::navigator::MemoryNavigator;
use crate::router::route::RouteTable;

type Reply = Result<HttpResponse, TransportError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

/// Answers requests from per-endpoint queues. Unscripted endpoints get 404.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    scripts: RefCell<HashMap<(Method, String), VecDeque<Scripted>>>,
    log: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.scripts
            .borrow_mut()
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(scripted);
    }

    pub(crate) fn reply(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.push(method, path, Scripted::Ready(Ok(HttpResponse::new(status, body.to_string()))));
    }

    pub(crate) fn fail(&self, method: Method, path: &str, error: TransportError) {
        self.push(method, path, Scripted::Ready(Err(error)));
    }

    /// Hold the next request to `path` until the returned sender fires.
    pub(crate) fn defer(&self, method: Method, path: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Scripted::Deferred(rx));
        tx
    }

    pub(crate) fn calls(&self, path: &str) -> usize {
        self.log.borrow().iter().filter(|r| r.path == path).count()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.log.borrow().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Reply {
        let next = self
            .scripts
            .borrow_mut()
            .get_mut(&(request.method, request.path.clone()))
            .and_then(VecDeque::pop_front);
        self.log.borrow_mut().push(request);

        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(rx)) => rx.await.unwrap_or(Err(TransportError::Network("dropped".into()))),
            None => Ok(HttpResponse::new(404, r#"{"detail":"Not Found"}"#)),
        }
    }
}

pub(crate) fn json_reply(status: u16, body: serde_json::Value) -> Reply {
    Ok(HttpResponse::new(status, body.to_string()))
}

pub(crate) struct Harness {
    pub ctx: SessionContext,
    pub transport: Rc<ScriptedTransport>,
    pub navigator: Rc<MemoryNavigator>,
}

pub(crate) fn harness() -> Harness {
    harness_with(ProbeFailurePolicy::FailOpen, "/")
}

pub(crate) fn harness_with(policy: ProbeFailurePolicy, start_path: &str) -> Harness {
    let transport = ScriptedTransport::new();
    let navigator = Rc::new(MemoryNavigator::new(start_path));
    let config = GateConfig { probe_failure: policy, ..GateConfig::default() };
    let ctx = SessionContext::new(&config, RouteTable::standard(), transport.clone(), navigator.clone());
    Harness { ctx, transport, navigator }
}

pub(crate) const STATUS: &str = "/api/auth/status";
pub(crate) const LOGIN: &str = "/api/auth/login";
pub(crate) const LOGOUT: &str = "/api/auth/logout";

pub(crate) fn status_body(pin_enabled: bool, authenticated: bool) -> serde_json::Value {
    serde_json::json!({ "pin_enabled": pin_enabled, "authenticated": authenticated })
}
