// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A dashboard operator account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorData {
    pub operator_id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Stored theme preference, `light` or `dark`.
    pub theme: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// An id and display label used to fill a select input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: i64,
    pub label: String,
}

/// The columns of a ticket the dashboard aggregates over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketStat {
    pub status: Option<String>,
    pub site_id: Option<i64>,
}
