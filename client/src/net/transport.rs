//! HTTP transport for the browser build.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API client in `zettelwirtschaft` is transport-agnostic. In the browser
//! requests go through `fetch` via `gloo-net`, so the session cookie is
//! attached by the browser itself. Each request races a `gloo-timers` timeout.
//!
//! Native builds (tests, `cargo check` without `csr`) get [`OfflineTransport`],
//! which fails every request with a network error.

use std::rc::Rc;
use std::time::Duration;

use zettelwirtschaft::net::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// Transport used by the app for this build.
#[must_use]
pub fn browser_transport(timeout: Duration) -> Rc<dyn Transport> {
    #[cfg(feature = "csr")]
    {
        Rc::new(GlooTransport::new(timeout))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = timeout;
        Rc::new(OfflineTransport)
    }
}

#[cfg(feature = "csr")]
pub struct GlooTransport {
    timeout: Duration,
}

#[cfg(feature = "csr")]
impl GlooTransport {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn timeout_millis(&self) -> u32 {
        u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX)
    }
}

#[cfg(feature = "csr")]
#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        use futures::future::{Either, select};
        use gloo_net::http::Request;
        use zettelwirtschaft::net::transport::Method;

        let builder = match request.method {
            Method::Get => Request::get(&request.path),
            Method::Post => Request::post(&request.path),
            Method::Patch => Request::patch(&request.path),
            Method::Delete => Request::delete(&request.path),
        };
        let built = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Build(e.to_string()))?;

        let sent = Box::pin(built.send());
        let timer = Box::pin(gloo_timers::future::TimeoutFuture::new(self.timeout_millis()));
        let response = match select(sent, timer).await {
            Either::Left((result, _)) => result.map_err(|e| TransportError::Network(e.to_string()))?,
            Either::Right(((), _)) => return Err(TransportError::Timeout),
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

/// Stand-in for builds without a browser.
#[cfg(not(feature = "csr"))]
pub struct OfflineTransport;

#[cfg(not(feature = "csr"))]
#[async_trait::async_trait(?Send)]
impl Transport for OfflineTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Network("not available outside the browser".to_owned()))
    }
}

#[cfg(all(test, not(feature = "csr")))]
#[path = "transport_test.rs"]
mod tests;
