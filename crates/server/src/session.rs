// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! The session token is read from the `sb-access-token` cookie, or from an
//! `Authorization: Bearer <token>` header for non-browser clients.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use saferay_ops_api::{AuthenticationService, SESSION_COOKIE, SESSION_TTL_SECONDS};
use saferay_ops_persistence::OperatorData;
use tracing::{debug, warn};

use crate::AppState;

/// Extractor for the signed-in operator.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionOperator(operator, token): SessionOperator,
/// ) -> Result<Json<Response>, HttpError> {
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 when no token is sent, or the token is unknown or
/// expired.
pub struct SessionOperator(pub OperatorData, pub String);

impl FromRequestParts<AppState> for SessionOperator {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = session_token(&parts.headers).ok_or_else(|| {
            debug!("Request carries no session token");
            SessionError::MissingToken
        })?;

        let mut persistence = state.persistence.lock().await;
        let operator: OperatorData =
            AuthenticationService::validate_session(&mut persistence, &token).map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(operator_id = operator.operator_id, "Session validated");
        Ok(Self(operator, token))
    }
}

/// Reads the session token from the cookie, then the bearer header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie: Option<String> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string());

    from_cookie.filter(|t| !t.is_empty()).or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string)
    })
}

/// The `Set-Cookie` value that stores `token`.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Max-Age={SESSION_TTL_SECONDS}; Path=/")
}

/// The `Set-Cookie` value that clears the session cookie.
pub fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Max-Age=0; Path=/")
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Neither the cookie nor a bearer header was sent.
    MissingToken,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingToken => String::from("Not signed in"),
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
        };
        crate::error::HttpError::new(StatusCode::UNAUTHORIZED, message).into_response()
    }
}
