//! Native [`Transport`] over `reqwest` with a cookie jar for the session cookie.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};

use super::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// Cookie the server sets after an accepted PIN.
pub const SESSION_COOKIE: &str = "zw_session";

const CONNECT_TIMEOUT_SECS: u64 = 10;

pub struct ReqwestTransport {
    http: reqwest::Client,
    origin: Url,
    jar: Arc<Jar>,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if `origin` is not a URL or the
    /// client cannot be constructed.
    pub fn new(origin: &str, timeout: Duration) -> Result<Self, TransportError> {
        let origin = Url::parse(origin).map_err(|e| TransportError::Build(format!("invalid origin {origin}: {e}")))?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { http, origin, jar })
    }

    /// Reuse a session token obtained earlier (e.g. from a previous `login`).
    pub fn seed_session_cookie(&self, token: &str) {
        self.jar
            .add_cookie_str(&format!("{SESSION_COOKIE}={token}; Path=/"), &self.origin);
    }

    /// Current session token held in the jar, if any.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        let header = self.jar.cookies(&self.origin)?;
        let raw = header.to_str().ok()?;
        raw.split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.to_owned())
    }
}

fn map_error(e: &reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_builder() {
        TransportError::Build(e.to_string())
    } else {
        TransportError::Network(e.to_string())
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self
            .origin
            .join(&request.path)
            .map_err(|e| TransportError::Build(format!("invalid path {}: {e}", request.path)))?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| map_error(&e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| map_error(&e))?;
        Ok(HttpResponse { status, body })
    }
}
