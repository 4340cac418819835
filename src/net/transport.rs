//! Transport seam between the session core and the HTTP stack.
//!
//! DESIGN
//! ======
//! The core never talks to `reqwest` or `gloo-net` directly. Each runtime
//! supplies a [`Transport`]: reqwest on native builds, `gloo-net` in the
//! browser, and a scripted fake in tests. Futures are `?Send` because the
//! browser runtime is single-threaded and its fetch futures are not `Send`.

/// HTTP verbs used by the API client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Outbound request. `path` is origin-relative (e.g. `/api/auth/status`).
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self { method, path: path.into(), body }
    }
}

/// Raw response: status code and undecoded body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure before any HTTP status was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection, DNS, or body read failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The underlying HTTP client or request could not be constructed.
    #[error("request build failed: {0}")]
    Build(String),
}

/// Sends one request and returns the raw response.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no HTTP response was obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
