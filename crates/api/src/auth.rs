// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-based operator authentication.

use saferay_ops_domain::{format_timestamp, parse_timestamp, utc_now};
use saferay_ops_persistence::{OperatorData, PersistenceError, SessionData, SqlitePersistence};
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info, warn};

use crate::error::{ApiError, AuthError};
use crate::password_policy::PasswordPolicy;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "sb-access-token";

/// Lifetime of a session, and the cookie's `Max-Age`.
pub const SESSION_TTL_SECONDS: i64 = 7200;

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    const SESSION_EXPIRATION: Duration = Duration::seconds(SESSION_TTL_SECONDS);

    /// Checks credentials and creates a session.
    ///
    /// Unknown emails and wrong passwords produce the same failure reason.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The operator email, matched case-insensitively
    /// * `password` - The plaintext password
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong or the session cannot
    /// be stored.
    pub fn login(
        persistence: &mut SqlitePersistence,
        email: &str,
        password: &str,
    ) -> Result<(String, OperatorData), AuthError> {
        let operator: OperatorData = persistence
            .get_operator_by_email(email)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(Self::invalid_credentials)?;

        let password_ok: bool = persistence
            .verify_password(password, &operator.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_ok {
            warn!(operator_id = operator.operator_id, "Rejected sign-in");
            return Err(Self::invalid_credentials());
        }

        let session_token: String = Self::generate_session_token();
        let expires_at: PrimitiveDateTime = utc_now() + Self::SESSION_EXPIRATION;

        persistence
            .create_session(
                &session_token,
                operator.operator_id,
                &format_timestamp(expires_at),
            )
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(operator.operator_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        info!(operator_id = operator.operator_id, "Operator signed in");
        Ok((session_token, operator))
    }

    /// Validates a session token and returns its operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or its
    /// operator no longer exists.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<OperatorData, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: PrimitiveDateTime =
            parse_timestamp(&session.expires_at).map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if utc_now() > expires_at {
            debug!(session_id = session.session_id, "Session expired");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let operator: OperatorData = persistence
            .get_operator_by_id(session.operator_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Operator not found"),
            })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok(operator)
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        info!("Operator signed out");
        Ok(())
    }

    /// Changes an operator's password.
    ///
    /// The current password must verify. Every other session of the
    /// operator is ended; `current_session` stays valid.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `operator` - The signed-in operator
    /// * `current_session` - The token of the session making the change
    /// * `current_password` - The password being replaced
    /// * `new_password` - The replacement
    /// * `confirmation` - The replacement, typed again
    ///
    /// # Errors
    ///
    /// Returns an error if the current password is wrong, the new password
    /// violates the policy, or the update fails.
    pub fn change_password(
        persistence: &mut SqlitePersistence,
        operator: &OperatorData,
        current_session: &str,
        current_password: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), ApiError> {
        let current_ok: bool = persistence
            .verify_password(current_password, &operator.password_hash)
            .map_err(|e| ApiError::Internal {
                message: e.to_string(),
            })?;
        if !current_ok {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Current password is incorrect"),
            });
        }

        PasswordPolicy::default().validate(new_password, confirmation, &operator.email)?;

        persistence
            .update_password(operator.operator_id, new_password)
            .map_err(crate::error::translate_persistence_error)?;

        let ended: usize = persistence
            .delete_sessions_for_operator(operator.operator_id)
            .map_err(crate::error::translate_persistence_error)?;

        let expires_at: PrimitiveDateTime = utc_now() + Self::SESSION_EXPIRATION;
        persistence
            .create_session(
                current_session,
                operator.operator_id,
                &format_timestamp(expires_at),
            )
            .map_err(crate::error::translate_persistence_error)?;

        info!(
            operator_id = operator.operator_id,
            ended_sessions = ended.saturating_sub(1),
            "Password changed"
        );
        Ok(())
    }

    /// Generates a session token from the clock and a random suffix.
    fn generate_session_token() -> String {
        let timestamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
        format!("session_{timestamp}_{:016x}", rand::random::<u64>())
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid email or password"),
        }
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionNotFound(msg) | PersistenceError::OperatorNotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
