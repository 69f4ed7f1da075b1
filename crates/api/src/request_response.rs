// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use saferay_ops_domain::{Site, Theme, TicketListing};
use serde::{Deserialize, Serialize};

use crate::detail::{DetailRow, SiteMedia};
use crate::forms::{FormValues, SiteFileSlot};
use crate::notice::Notice;

// ========================================================================
// Authentication
// ========================================================================

/// API request to sign in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// API response for a successful sign-in.
///
/// The session token travels in the `sb-access-token` cookie and is also
/// returned here for non-browser clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session_token: String,
    pub email: String,
    pub theme: Theme,
    /// Seconds until the session expires.
    pub expires_in: i64,
}

/// API response for the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub email: String,
    /// Account creation timestamp.
    pub created_at: String,
    /// Previous sign-in, if any.
    pub last_login_at: Option<String>,
    pub theme: Theme,
}

/// API request to change the signed-in operator's password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// Generic message response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// API request to store the theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetThemeRequest {
    pub theme: Theme,
}

/// Query parameters of the shell endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellQuery {
    /// The route being rendered, used to mark the active link.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub mobile_open: bool,
}

// ========================================================================
// Lists and forms
// ========================================================================

/// Query parameters of the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// Rows of a list screen after search filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResponse<T> {
    pub rows: Vec<T>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// A file chosen in a site form, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    pub slot: SiteFileSlot,
    pub file_name: String,
    pub content_base64: String,
}

/// A form submission: field values plus, for sites, chosen files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmitRequest {
    pub values: FormValues,
    /// Multi-select choices to toggle, applied after `values`.
    #[serde(default)]
    pub toggles: Vec<ChoiceToggle>,
    #[serde(default)]
    pub files: Vec<FileUpload>,
}

/// One checkbox of a multi-select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceToggle {
    pub field: String,
    pub item: String,
    pub checked: bool,
}

/// API response for a saved record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveResponse {
    pub id: i64,
    pub notice: Notice,
}

// ========================================================================
// Detail views
// ========================================================================

/// Query parameters of the site detail endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDetailQuery {
    #[serde(default)]
    pub show_pv: bool,
    #[serde(default)]
    pub show_bess: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDetailResponse {
    pub site: Site,
    pub general: Vec<DetailRow>,
    pub pv: Option<Vec<DetailRow>>,
    pub bess: Option<Vec<DetailRow>>,
    pub media: SiteMedia,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketDetailResponse {
    pub ticket: TicketListing,
    pub attributes: Vec<DetailRow>,
    pub photo_url: Option<String>,
    pub document_url: Option<String>,
}
