// src/config.rs

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};
use tera::Tera;

use crate::{
    db::{CompanyRepository, DashboardRepository, InvoiceRepository},
    services::{
        document_service::DocumentService, invoice_service::InvoiceService, session::SessionStore,
    },
};

// The shared state accessible throughout the application
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub templates: Arc<Tera>,
    pub sessions: SessionStore,
    pub cookie_key: Key,
    pub admin_user: String,
    pub admin_pass: String,
    pub upload_dir: String,
    pub port: u16,
    pub company_repo: CompanyRepository,
    pub dashboard_repo: DashboardRepository,
    pub invoice_repo: InvoiceRepository,
    pub invoice_service: InvoiceService,
    pub document_service: DocumentService,
}

impl AppState {
    // Loads the configuration and assembles the dependency graph
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let session_secret = env::var("SESSION_SECRET").expect("SESSION_SECRET must be set");
        let admin_user = env::var("ADMIN_USER").expect("ADMIN_USER must be set");
        let admin_pass = env::var("ADMIN_PASS").expect("ADMIN_PASS must be set");
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "public/uploads".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Database connection established!");

        let templates = Arc::new(Tera::new("templates/**/*.html")?);

        // The cookie signing key wants 64 bytes; stretch whatever secret
        // was configured through SHA-512.
        let cookie_key = Key::from(Sha512::digest(session_secret.as_bytes()).as_slice());

        // --- Wire the dependency graph ---
        let company_repo = CompanyRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let invoice_repo = InvoiceRepository::new(db_pool.clone());
        let invoice_service = InvoiceService::new(invoice_repo.clone(), db_pool.clone());
        let document_service = DocumentService::new(
            invoice_repo.clone(),
            company_repo.clone(),
            upload_dir.clone(),
        );

        Ok(Self {
            db_pool,
            templates,
            sessions: SessionStore::new(),
            cookie_key,
            admin_user,
            admin_pass,
            upload_dir,
            port,
            company_repo,
            dashboard_repo,
            invoice_repo,
            invoice_service,
            document_service,
        })
    }
}

// Lets SignedCookieJar pull its key straight out of the shared state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
