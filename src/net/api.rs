//! REST client shared by every request the application issues.
//!
//! SYSTEM CONTEXT
//! ==============
//! All traffic, including the auth endpoints, goes through [`ApiClient::send`]
//! so the attached [`SessionInvalidator`] observes every 401 regardless of
//! which view issued the request.
//!
//! ERROR HANDLING
//! ==============
//! A 401 produces two independent effects: the global invalidation (state
//! reset plus a replacing navigation to the PIN route) and the
//! [`ApiError::Unauthorized`] returned to the caller. Callers should stop
//! their own spinners on that error but must not assume their view is still
//! mounted. Other non-2xx statuses only produce an [`ApiError::Status`]
//! carrying the server's `detail` when present.

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
use super::types::{AuthStatus, LoginRequest, LoginResponse};
use crate::session::invalidator::SessionInvalidator;

/// Fallback message when the server gave no usable `detail`.
pub const GENERIC_ERROR_MESSAGE: &str = "Ein Fehler ist aufgetreten";

pub const AUTH_STATUS_PATH: &str = "/auth/status";
pub const AUTH_LOGIN_PATH: &str = "/auth/login";
pub const AUTH_LOGOUT_PATH: &str = "/auth/logout";

// =============================================================================
// ERROR
// =============================================================================

/// Errors returned by [`ApiClient`] calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No HTTP response was received.
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    /// The server rejected the session (HTTP 401).
    #[error("session rejected by server")]
    Unauthorized { detail: Option<String> },

    /// Any other non-2xx status.
    #[error("server returned status {status}")]
    Status { status: u16, detail: Option<String> },

    /// A 2xx body did not match the expected schema.
    #[error("response parse failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-supplied `detail`, if the response carried one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Status { detail, .. } => detail.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// HTTP status, when a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Human-readable message for toasts and inline errors.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(e) => e.to_string(),
            Self::Unauthorized { detail } | Self::Status { detail, .. } => {
                detail.clone().unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_owned())
            }
            Self::Decode(_) => GENERIC_ERROR_MESSAGE.to_owned(),
        }
    }
}

/// Pull a readable message out of an error body.
///
/// Accepts `{"detail": "..."}` and the validation shape
/// `{"detail": [{"msg": "..."}, ...]}` (messages joined with `"; "`).
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() { None } else { Some(messages.join("; ")) }
        }
        _ => None,
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Cheap-to-clone handle over a [`Transport`] with the 401 pipeline attached.
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
    api_base: Rc<str>,
    invalidator: Option<Rc<SessionInvalidator>>,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Rc<dyn Transport>, api_base: &str) -> Self {
        Self { transport, api_base: Rc::from(api_base.trim_end_matches('/')), invalidator: None }
    }

    /// Attach the global 401 handler. Every subsequent response passes through it.
    #[must_use]
    pub fn with_invalidator(mut self, invalidator: SessionInvalidator) -> Self {
        self.invalidator = Some(Rc::new(invalidator));
        self
    }

    /// Origin-relative URL for an API path (`"/auth/status"` -> `"/api/auth/status"`).
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.api_base)
    }

    /// Send a request through the response pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response arrived,
    /// [`ApiError::Unauthorized`] on 401 (after the global invalidation ran),
    /// and [`ApiError::Status`] for any other non-2xx status.
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest::new(method, self.endpoint(path), body);
        let url = request.path.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(method = method.as_str(), %url, error = %e, "api request failed");
                return Err(ApiError::Transport(e));
            }
        };

        if response.is_success() {
            return Ok(response);
        }

        let detail = extract_detail(&response.body);
        if response.status == 401 {
            if let Some(invalidator) = &self.invalidator {
                invalidator.on_unauthorized();
            }
            return Err(ApiError::Unauthorized { detail });
        }

        let error = ApiError::Status { status: response.status, detail };
        tracing::warn!(
            method = method.as_str(),
            %url,
            status = response.status,
            message = %error.user_message(),
            "api request failed"
        );
        Err(error)
    }

    /// `GET` and decode a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; additionally [`ApiError::Decode`] on a schema mismatch.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::Get, path, None).await?;
        decode(&response)
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; additionally [`ApiError::Decode`] when the body
    /// cannot be serialized or the response does not match `T`.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self.send(Method::Post, path, Some(body)).await?;
        decode(&response)
    }

    /// `POST` without a body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post_empty(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send(Method::Post, path, None).await
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

// =============================================================================
// AUTH ENDPOINTS
// =============================================================================

/// `GET /api/auth/status`.
///
/// # Errors
///
/// Any [`ApiError`]; the caller decides the fallback.
pub async fn fetch_auth_status(api: &ApiClient) -> Result<AuthStatus, ApiError> {
    api.get_json(AUTH_STATUS_PATH).await
}

/// `POST /api/auth/login`.
///
/// # Errors
///
/// Any [`ApiError`]; a wrong PIN is a successful call with `success: false`.
pub async fn submit_pin(api: &ApiClient, pin: &str) -> Result<LoginResponse, ApiError> {
    api.post_json(AUTH_LOGIN_PATH, &LoginRequest { pin }).await
}

/// `POST /api/auth/logout`.
///
/// # Errors
///
/// Any [`ApiError`]; callers treat logout as best effort.
pub async fn end_session(api: &ApiClient) -> Result<(), ApiError> {
    api.post_empty(AUTH_LOGOUT_PATH).await.map(|_| ())
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
