// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use saferay_ops_api::{ApiError, Notice, NoticeKind, translate_persistence_error};
use saferay_ops_domain::FieldErrors;
use saferay_ops_persistence::PersistenceError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
    /// Per-field messages for rejected forms.
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub fields: FieldErrors,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
    pub fields: FieldErrors,
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            fields: FieldErrors::new(),
        }
    }

    /// Turns a controller notice into an error response.
    pub fn from_notice(notice: Notice) -> Self {
        let status: StatusCode = match notice.kind {
            NoticeKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            NoticeKind::Network => StatusCode::SERVICE_UNAVAILABLE,
            NoticeKind::Storage => StatusCode::BAD_GATEWAY,
            NoticeKind::Server | NoticeKind::Success => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: notice.message,
            fields: notice.fields,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            fields: self.fields,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let fields: FieldErrors = match &err {
            ApiError::ValidationFailed { fields } => fields.clone(),
            ApiError::InvalidInput { field, message } => {
                let mut fields: FieldErrors = FieldErrors::new();
                fields.insert(field.clone(), message.clone());
                fields
            }
            _ => FieldErrors::new(),
        };
        Self {
            status,
            message: err.to_string(),
            fields,
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self::from(translate_persistence_error(err))
    }
}
