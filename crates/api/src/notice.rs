// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User-facing notices.
//!
//! Every failure a screen can surface is folded into one of four kinds.
//! Validation notices also carry the per-field messages.

use saferay_ops_domain::FieldErrors;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    /// Input was rejected before reaching the store.
    Validation,
    /// A list or lookup fetch failed.
    Network,
    /// The store rejected a write.
    Server,
    /// File upload or removal failed.
    Storage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub fields: FieldErrors,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: FieldErrors::new(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    #[must_use]
    pub fn validation(fields: FieldErrors) -> Self {
        Self {
            kind: NoticeKind::Validation,
            message: String::from("Please fix the highlighted fields"),
            fields,
        }
    }

    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Network, message)
    }

    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Server, message)
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Storage, message)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind != NoticeKind::Success
    }
}

impl From<&ApiError> for Notice {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::ValidationFailed { fields } => Self::validation(fields.clone()),
            ApiError::InvalidInput { field, message } => {
                let mut fields = FieldErrors::new();
                fields.insert(field.clone(), message.clone());
                Self::validation(fields)
            }
            ApiError::PasswordPolicyViolation { message } => {
                Self::new(NoticeKind::Validation, message.clone())
            }
            ApiError::Storage { .. } => Self::storage(err.to_string()),
            ApiError::AuthenticationFailed { .. }
            | ApiError::ResourceNotFound { .. }
            | ApiError::Internal { .. } => Self::server(err.to_string()),
        }
    }
}
