//! Wire schema for the `/api/auth/*` endpoints.

use serde::{Deserialize, Serialize};

/// `GET /api/auth/status` response body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthStatus {
    pub pin_enabled: bool,
    pub authenticated: bool,
}

/// `POST /api/auth/login` request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub pin: &'a str,
}

/// `POST /api/auth/login` response body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub detail: Option<String>,
}
