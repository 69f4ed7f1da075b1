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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use clap::Parser;
use saferay_ops_api::MediaUrls;
use saferay_ops_api::forms::{ClientSchema, TeamSchema, TicketSchema};
use saferay_ops_domain::{Client, Site, TeamMember, Ticket};
use saferay_ops_persistence::{BlobStore, LocalBlobStore, PersistenceError, SqlitePersistence};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::handlers::{
    handle_change_password, handle_create, handle_create_site, handle_delete, handle_delete_site,
    handle_delete_ticket, handle_get_dashboard, handle_get_profile, handle_get_shell,
    handle_get_site, handle_get_ticket, handle_list, handle_login, handle_logout,
    handle_set_theme, handle_ticket_options, handle_ticket_report, handle_update,
    handle_update_site,
};

/// Request bodies may carry base64 site documents.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Saferay Ops Server - HTTP server for the operations dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "SAFERAY_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "SAFERAY_PORT", default_value_t = 3000)]
    port: u16,

    /// Directory holding uploaded site and ticket files
    #[arg(long, env = "SAFERAY_STORAGE_DIR", default_value = "./storage")]
    storage_dir: PathBuf,

    /// Prefix of public media URLs, followed by `/{bucket}/{path}`
    #[arg(long, env = "SAFERAY_MEDIA_BASE_URL", default_value = "/storage")]
    media_base_url: String,

    /// Operator created at startup when no account has this email
    #[arg(long, env = "SAFERAY_SEED_EMAIL", requires = "seed_password")]
    seed_email: Option<String>,

    /// Password for the seed operator
    #[arg(long, env = "SAFERAY_SEED_PASSWORD", requires = "seed_email")]
    seed_password: Option<String>,
}

/// Application state shared across handlers.
///
/// Store calls are serialized through the persistence mutex.
#[derive(Clone)]
pub struct AppState {
    pub persistence: Arc<Mutex<SqlitePersistence>>,
    pub blobs: Arc<dyn BlobStore>,
    pub media_urls: MediaUrls,
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/profile", get(handle_get_profile))
        .route("/profile/password", post(handle_change_password))
        .route("/shell", get(handle_get_shell))
        .route("/shell/theme", post(handle_set_theme))
        .route("/dashboard", get(handle_get_dashboard))
        .route(
            "/team",
            get(handle_list::<TeamMember>).post(handle_create::<TeamSchema>),
        )
        .route(
            "/team/{id}",
            put(handle_update::<TeamSchema>).delete(handle_delete::<TeamMember>),
        )
        .route(
            "/clients",
            get(handle_list::<Client>).post(handle_create::<ClientSchema>),
        )
        .route(
            "/clients/{id}",
            put(handle_update::<ClientSchema>).delete(handle_delete::<Client>),
        )
        .route(
            "/sites",
            get(handle_list::<Site>).post(handle_create_site),
        )
        .route(
            "/sites/{id}",
            get(handle_get_site)
                .put(handle_update_site)
                .delete(handle_delete_site),
        )
        .route(
            "/tickets",
            get(handle_list::<Ticket>).post(handle_create::<TicketSchema>),
        )
        .route("/tickets/options", get(handle_ticket_options))
        .route(
            "/tickets/{id}",
            get(handle_get_ticket)
                .put(handle_update::<TicketSchema>)
                .delete(handle_delete_ticket),
        )
        .route("/tickets/{id}/report.pdf", get(handle_ticket_report))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state)
}

/// Creates the seed operator unless the email is already registered.
fn seed_operator(
    persistence: &mut SqlitePersistence,
    email: &str,
    password: &str,
) -> Result<(), PersistenceError> {
    if persistence.get_operator_by_email(email)?.is_some() {
        info!(email, "Seed operator already exists");
        return Ok(());
    }
    let operator_id: i64 = persistence.create_operator(email, password)?;
    info!(operator_id, email, "Created seed operator");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Saferay Ops Server");

    let mut persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let expired: usize = persistence.delete_expired_sessions()?;
    info!(expired, "Removed expired sessions");

    if let (Some(email), Some(password)) = (&args.seed_email, &args.seed_password) {
        seed_operator(&mut persistence, email, password)?;
    }

    info!(storage_dir = %args.storage_dir.display(), "Using local file storage");
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        blobs: Arc::new(LocalBlobStore::new(args.storage_dir)),
        media_urls: MediaUrls::new(&args.media_base_url),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
