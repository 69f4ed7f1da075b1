// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Screen controllers for the operations dashboard.
//!
//! Each screen of the dashboard is modelled as plain state plus operations
//! that talk to the store through the traits in `saferay_ops_persistence`.
//! The HTTP server drives these controllers; nothing here knows about HTTP.

mod auth;
pub mod dashboard;
pub mod detail;
mod error;
pub mod forms;
pub mod list;
pub mod media;
mod notice;
mod password_policy;
pub mod report;
mod request_response;
pub mod shell;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, SESSION_COOKIE, SESSION_TTL_SECONDS};
pub use dashboard::DashboardSummary;
pub use detail::{DeleteReport, DetailRow, SiteDetail, TicketDetail};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use forms::{
    ClientForm, EntityForm, FormSchema, FormValues, Section, SiteFileSlot, SiteForm,
    SubmitOutcome, TeamForm, TicketForm, TicketFormOptions,
};
pub use list::ListScreen;
pub use media::MediaUrls;
pub use notice::{Notice, NoticeKind};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use report::TicketReport;
pub use request_response::{
    ChangePasswordRequest, ChoiceToggle, FileUpload, FormSubmitRequest, ListQuery, ListResponse,
    LoginRequest, LoginResponse, MessageResponse, ProfileResponse, SaveResponse,
    SetThemeRequest, ShellQuery, SiteDetailQuery, SiteDetailResponse, TicketDetailResponse,
};
pub use shell::{ShellState, ShellView, ThemeContext};
