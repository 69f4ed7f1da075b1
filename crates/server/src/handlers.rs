// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers.
//!
//! Every handler takes the persistence lock once, drives the matching screen
//! controller from `saferay_ops_api`, and releases the lock before the
//! response is built.

use axum::{
    Json,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use saferay_ops_api::forms::SiteSchema;
use saferay_ops_api::{
    ApiError, AuthenticationService, ChangePasswordRequest, DashboardSummary, DeleteReport,
    EntityForm, FormSchema, FormSubmitRequest, FormValues, ListQuery, ListResponse, ListScreen,
    LoginRequest, LoginResponse, MessageResponse, Notice, ProfileResponse, SESSION_TTL_SECONDS,
    SaveResponse, SetThemeRequest, ShellQuery, ShellState, ShellView, SiteDetail,
    SiteDetailQuery, SiteDetailResponse, SiteForm, SubmitOutcome, ThemeContext, TicketDetail,
    TicketDetailResponse, TicketFormOptions, TicketReport, translate_domain_error,
};
use saferay_ops_domain::{Entity, Site, SiteKind, Theme, Ticket, TicketListing, utc_now};
use saferay_ops_persistence::{BlobStore, EntityStore, Persistence};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::AppState;
use crate::error::HttpError;
use crate::session::{SessionOperator, cleared_session_cookie, session_cookie};

/// The route the shell highlights when the client names none.
const DEFAULT_SHELL_PATH: &str = "/dashboard";

fn not_found(table: &str, id: i64) -> HttpError {
    HttpError::new(
        StatusCode::NOT_FOUND,
        format!("No row {id} in {table}"),
    )
}

/// Runs `job` on the blocking pool with the persistence lock held.
///
/// Used by every handler that touches the file store.
async fn with_file_store<T, F>(app_state: &AppState, job: F) -> Result<T, HttpError>
where
    T: Send + 'static,
    F: FnOnce(&mut Persistence, &dyn BlobStore) -> Result<T, HttpError> + Send + 'static,
{
    let persistence: Arc<Mutex<Persistence>> = Arc::clone(&app_state.persistence);
    let blobs: Arc<dyn BlobStore> = Arc::clone(&app_state.blobs);
    tokio::task::spawn_blocking(move || {
        let mut persistence = persistence.blocking_lock();
        job(&mut *persistence, blobs.as_ref())
    })
    .await
    .map_err(|e| {
        HttpError::from(ApiError::Internal {
            message: format!("File store task failed: {e}"),
        })
    })?
}

// ============================================================================
// Auth and profile
// ============================================================================

/// Handler for POST `/login`.
///
/// Sets the session cookie and also returns the token in the body.
pub async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, HttpError> {
    debug!(email = %req.email, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let (session_token, operator) =
        AuthenticationService::login(&mut persistence, &req.email, &req.password)
            .map_err(ApiError::from)?;
    drop(persistence);

    let cookie: String = session_cookie(&session_token);
    let body: LoginResponse = LoginResponse {
        session_token,
        email: operator.email.clone(),
        theme: ThemeContext::from_operator(&operator).theme(),
        expires_in: SESSION_TTL_SECONDS,
    };
    Ok(([(header::SET_COOKIE, cookie)], Json(body)).into_response())
}

/// Handler for POST `/logout`.
pub async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(operator, token): SessionOperator,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, &token).map_err(ApiError::from)?;
    drop(persistence);

    info!(operator_id = operator.operator_id, "Session cleared");
    let body: MessageResponse = MessageResponse {
        message: String::from("Signed out"),
    };
    Ok(([(header::SET_COOKIE, cleared_session_cookie())], Json(body)).into_response())
}

/// Handler for GET `/profile`.
pub async fn handle_get_profile(
    SessionOperator(operator, _): SessionOperator,
) -> Json<ProfileResponse> {
    let theme: Theme = ThemeContext::from_operator(&operator).theme();
    Json(ProfileResponse {
        email: operator.email,
        created_at: operator.created_at,
        last_login_at: operator.last_login_at,
        theme,
    })
}

/// Handler for POST `/profile/password`.
pub async fn handle_change_password(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(operator, token): SessionOperator,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::change_password(
        &mut persistence,
        &operator,
        &token,
        &req.current_password,
        &req.new_password,
        &req.new_password_confirmation,
    )?;
    drop(persistence);

    Ok(Json(MessageResponse {
        message: String::from("Password updated"),
    }))
}

// ============================================================================
// Shell and dashboard
// ============================================================================

/// Handler for GET `/shell`.
pub async fn handle_get_shell(
    SessionOperator(operator, _): SessionOperator,
    Query(query): Query<ShellQuery>,
) -> Json<ShellView> {
    let state: ShellState = ShellState {
        collapsed: query.collapsed,
        mobile_open: query.mobile_open,
    };
    let path: &str = query.path.as_deref().unwrap_or(DEFAULT_SHELL_PATH);
    Json(ShellView::new(&operator, path, state))
}

/// Handler for POST `/shell/theme`.
pub async fn handle_set_theme(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(operator, _): SessionOperator,
    Json(req): Json<SetThemeRequest>,
) -> Result<Json<ThemeContext>, HttpError> {
    let mut context: ThemeContext = ThemeContext::from_operator(&operator);
    context.set(req.theme);

    let mut persistence = app_state.persistence.lock().await;
    context.persist(&mut persistence, operator.operator_id)?;
    drop(persistence);

    Ok(Json(context))
}

/// Handler for GET `/dashboard`.
pub async fn handle_get_dashboard(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(operator, _): SessionOperator,
) -> Result<Json<DashboardSummary>, HttpError> {
    let theme: Theme = ThemeContext::from_operator(&operator).theme();

    let mut persistence = app_state.persistence.lock().await;
    let summary: DashboardSummary = DashboardSummary::load(&mut *persistence, theme)?;
    drop(persistence);

    Ok(Json(summary))
}

// ============================================================================
// Lists
// ============================================================================

/// Handler for GET on an entity collection.
///
/// A failed fetch answers 503 with an empty row list and the notice.
pub async fn handle_list<E>(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(query): Query<ListQuery>,
) -> (StatusCode, Json<ListResponse<E::Listing>>)
where
    E: Entity + Send + 'static,
    E::Listing: Serialize + Send,
    Persistence: EntityStore<E>,
{
    let mut persistence = app_state.persistence.lock().await;
    let mut screen: ListScreen<E> = ListScreen::new();
    screen.load(&mut *persistence);
    drop(persistence);

    screen.set_search(query.search.as_deref().unwrap_or_default());
    let rows: Vec<E::Listing> = screen.filtered().into_iter().cloned().collect();
    let notice: Option<Notice> = screen.take_notice();

    let status: StatusCode = if notice.as_ref().is_some_and(Notice::is_error) {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (
        status,
        Json(ListResponse {
            total: rows.len(),
            rows,
            notice,
        }),
    )
}

// ============================================================================
// Forms
// ============================================================================

/// Pairs submitted values with their fields in form order, so derived
/// fields see their inputs already set.
fn ordered_values<'a>(
    fields: &'static [&'static str],
    values: &'a FormValues,
) -> Result<Vec<(&'static str, &'a str)>, ApiError> {
    if let Some(unknown) = values.keys().find(|key| !fields.contains(&key.as_str())) {
        return Err(ApiError::InvalidInput {
            field: unknown.clone(),
            message: format!("Unknown field '{unknown}'"),
        });
    }
    Ok(fields
        .iter()
        .filter_map(|field| values.get(*field).map(|value| (*field, value.as_str())))
        .collect())
}

fn fill_form<S: FormSchema>(
    form: &mut EntityForm<S>,
    req: &FormSubmitRequest,
) -> Result<(), ApiError> {
    if !req.files.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("files"),
            message: String::from("This form takes no file uploads"),
        });
    }
    for (field, value) in ordered_values(S::FIELDS, &req.values)? {
        form.set_field(field, value)?;
    }
    for toggle in &req.toggles {
        form.toggle_choice(&toggle.field, &toggle.item, toggle.checked)?;
    }
    Ok(())
}

fn fill_site_form(form: &mut SiteForm, req: FormSubmitRequest) -> Result<(), ApiError> {
    for (field, value) in ordered_values(SiteSchema::FIELDS, &req.values)? {
        form.set_field(field, value)?;
    }
    for toggle in &req.toggles {
        if toggle.field != "type" {
            return Err(ApiError::InvalidInput {
                field: toggle.field.clone(),
                message: String::from("Only the site type takes multiple choices"),
            });
        }
        let kind: SiteKind = toggle.item.parse().map_err(translate_domain_error)?;
        form.toggle_type(kind, toggle.checked)?;
    }
    for file in req.files {
        let bytes: Vec<u8> =
            STANDARD
                .decode(file.content_base64.as_bytes())
                .map_err(|e| ApiError::InvalidInput {
                    field: file.slot.field().to_string(),
                    message: format!("File content is not valid base64: {e}"),
                })?;
        form.attach(file.slot, &file.file_name, bytes);
    }
    Ok(())
}

fn save_response(
    outcome: SubmitOutcome,
    notice: Option<&Notice>,
    saved_status: StatusCode,
) -> Result<(StatusCode, Json<SaveResponse>), HttpError> {
    match outcome {
        SubmitOutcome::Saved { id } => Ok((
            saved_status,
            Json(SaveResponse {
                id,
                notice: notice.cloned().unwrap_or_else(|| Notice::success("Saved")),
            }),
        )),
        SubmitOutcome::Invalid | SubmitOutcome::Failed => Err(HttpError::from_notice(
            notice
                .cloned()
                .unwrap_or_else(|| Notice::server("Could not save")),
        )),
    }
}

/// Handler for POST on the team, client, and ticket collections.
pub async fn handle_create<S>(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Json(req): Json<FormSubmitRequest>,
) -> Result<(StatusCode, Json<SaveResponse>), HttpError>
where
    S: FormSchema + 'static,
    S::Record: Send,
    Persistence: EntityStore<S::Record>,
{
    let mut persistence = app_state.persistence.lock().await;
    let mut form: EntityForm<S> = EntityForm::open(None);
    fill_form(&mut form, &req)?;
    let outcome: SubmitOutcome = form.submit(&mut *persistence, utc_now());
    drop(persistence);

    save_response(outcome, form.notice(), StatusCode::CREATED)
}

/// Handler for PUT on a team member, client, or ticket.
pub async fn handle_update<S>(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Path(id): Path<i64>,
    Json(req): Json<FormSubmitRequest>,
) -> Result<(StatusCode, Json<SaveResponse>), HttpError>
where
    S: FormSchema + 'static,
    S::Record: Send,
    Persistence: EntityStore<S::Record>,
{
    let mut persistence = app_state.persistence.lock().await;
    let existing: S::Record = <Persistence as EntityStore<S::Record>>::get(&mut persistence, id)?
        .ok_or_else(|| not_found(<S::Record as Entity>::TABLE, id))?;
    let mut form: EntityForm<S> = EntityForm::open(Some(existing));
    fill_form(&mut form, &req)?;
    let outcome: SubmitOutcome = form.submit(&mut *persistence, utc_now());
    drop(persistence);

    save_response(outcome, form.notice(), StatusCode::OK)
}

/// Handler for POST `/sites`.
pub async fn handle_create_site(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Json(req): Json<FormSubmitRequest>,
) -> Result<(StatusCode, Json<SaveResponse>), HttpError> {
    let mut form: SiteForm = SiteForm::open(None);
    fill_site_form(&mut form, req)?;

    let (outcome, form) = with_file_store(&app_state, move |persistence, blobs| {
        let outcome: SubmitOutcome = form.submit(persistence, blobs, utc_now());
        Ok((outcome, form))
    })
    .await?;

    save_response(outcome, form.form().notice(), StatusCode::CREATED)
}

/// Handler for PUT `/sites/{id}`.
pub async fn handle_update_site(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Path(id): Path<i64>,
    Json(req): Json<FormSubmitRequest>,
) -> Result<(StatusCode, Json<SaveResponse>), HttpError> {
    let (outcome, form) = with_file_store(&app_state, move |persistence, blobs| {
        let existing: Site = <Persistence as EntityStore<Site>>::get(persistence, id)?
            .ok_or_else(|| not_found(Site::TABLE, id))?;
        let mut form: SiteForm = SiteForm::open(Some(existing));
        fill_site_form(&mut form, req)?;
        let outcome: SubmitOutcome = form.submit(persistence, blobs, utc_now());
        Ok((outcome, form))
    })
    .await?;

    save_response(outcome, form.form().notice(), StatusCode::OK)
}

/// Handler for GET `/tickets/options`.
pub async fn handle_ticket_options(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
) -> Result<Json<TicketFormOptions>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let options: TicketFormOptions = TicketFormOptions::load(&mut *persistence)?;
    drop(persistence);

    Ok(Json(options))
}

// ============================================================================
// Details and deletes
// ============================================================================

fn delete_response(report: DeleteReport) -> (StatusCode, Json<DeleteReport>) {
    let status: StatusCode = if report.deleted {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(report))
}

fn find_ticket(persistence: &mut Persistence, id: i64) -> Result<TicketListing, HttpError> {
    persistence
        .get_ticket_listing(id)?
        .ok_or_else(|| not_found(Ticket::TABLE, id))
}

/// Handler for DELETE on a team member or client.
///
/// Runs the list screen's confirm-delete flow for the id.
pub async fn handle_delete<E>(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<DeleteReport>), HttpError>
where
    E: Entity + Send + 'static,
    E::Listing: Send,
    Persistence: EntityStore<E>,
{
    let mut persistence = app_state.persistence.lock().await;
    if <Persistence as EntityStore<E>>::get(&mut persistence, id)?.is_none() {
        return Err(not_found(E::TABLE, id));
    }

    let mut screen: ListScreen<E> = ListScreen::new();
    screen.request_delete(id);
    let deleted: bool = screen.confirm_delete(&mut *persistence).is_ok();
    drop(persistence);

    Ok(delete_response(DeleteReport {
        deleted,
        notices: screen.take_notice().into_iter().collect(),
    }))
}

/// Handler for GET `/sites/{id}`.
pub async fn handle_get_site(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Path(id): Path<i64>,
    Query(query): Query<SiteDetailQuery>,
) -> Result<Json<SiteDetailResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let site: Site = <Persistence as EntityStore<Site>>::get(&mut persistence, id)?
        .ok_or_else(|| not_found(Site::TABLE, id))?;
    drop(persistence);

    let mut detail: SiteDetail = SiteDetail::new(site);
    detail.set_show_pv(query.show_pv);
    detail.set_show_bess(query.show_bess);

    Ok(Json(SiteDetailResponse {
        general: detail.general(),
        pv: detail.pv(),
        bess: detail.bess(),
        media: detail.media(&app_state.media_urls),
        site: detail.site().clone(),
    }))
}

/// Handler for DELETE `/sites/{id}`.
///
/// Removes the site's files before the row.
pub async fn handle_delete_site(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<DeleteReport>), HttpError> {
    let report: DeleteReport = with_file_store(&app_state, move |persistence, blobs| {
        let site: Site = <Persistence as EntityStore<Site>>::get(persistence, id)?
            .ok_or_else(|| not_found(Site::TABLE, id))?;
        Ok(SiteDetail::new(site).delete(persistence, blobs))
    })
    .await?;

    Ok(delete_response(report))
}

/// Handler for GET `/tickets/{id}`.
pub async fn handle_get_ticket(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Path(id): Path<i64>,
) -> Result<Json<TicketDetailResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let listing: TicketListing = find_ticket(&mut persistence, id)?;
    drop(persistence);

    let detail: TicketDetail = TicketDetail::new(listing.clone());
    Ok(Json(TicketDetailResponse {
        attributes: detail.attributes(),
        photo_url: detail.photo_url(&app_state.media_urls),
        document_url: detail.document_url(&app_state.media_urls),
        ticket: listing,
    }))
}

/// Handler for DELETE `/tickets/{id}`.
pub async fn handle_delete_ticket(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<DeleteReport>), HttpError> {
    let report: DeleteReport = with_file_store(&app_state, move |persistence, blobs| {
        let listing: TicketListing = find_ticket(persistence, id)?;
        Ok(TicketDetail::new(listing).delete(persistence, blobs))
    })
    .await?;

    Ok(delete_response(report))
}

/// The report file name as a header-safe ASCII string.
fn attachment_name(file_name: &str) -> String {
    let stem: &str = file_name.strip_suffix(".pdf").unwrap_or(file_name);
    let safe: String = stem
        .chars()
        .filter(|c| (c.is_ascii_graphic() || *c == ' ') && *c != '"' && *c != '\\')
        .collect();
    let safe: &str = safe.trim();
    if safe.is_empty() {
        String::from("ticket.pdf")
    } else {
        format!("{safe}.pdf")
    }
}

/// Handler for GET `/tickets/{id}/report.pdf`.
pub async fn handle_ticket_report(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Path(id): Path<i64>,
) -> Result<Response, HttpError> {
    let (file_name, pdf) = with_file_store(&app_state, move |persistence, blobs| {
        let listing: TicketListing = find_ticket(persistence, id)?;
        let report: TicketReport = TicketDetail::new(listing).report(blobs);
        let pdf: Vec<u8> = report.render()?;
        Ok((attachment_name(report.file_name()), pdf))
    })
    .await?;

    let disposition: String = format!("attachment; filename=\"{file_name}\"");
    info!(id, file = %file_name, "Rendered ticket report");

    Ok((
        [
            (header::CONTENT_TYPE, String::from("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}
