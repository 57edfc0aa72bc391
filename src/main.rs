// src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() is right here: if configuration fails the app must not start.
    let app_state = AppState::new()
        .await
        .expect("Failed to initialize application state.");

    // Run pending SQLx migrations on startup
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Failed to run database migrations.");

    tracing::info!("✅ Database migrations applied successfully!");

    // Public routes: the login flow (logout included, it only tears down)
    let auth_routes = Router::new()
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout));

    // Everything else sits behind the session guard
    let protected_routes = Router::new()
        .route("/", get(handlers::dashboard::home))
        .route("/invoices", get(handlers::invoices::list_invoices))
        .route(
            "/create-invoice",
            get(handlers::invoices::create_invoice_page)
                .post(handlers::invoices::create_invoice_form),
        )
        .route(
            "/api/create-invoice",
            post(handlers::invoices::create_invoice_api),
        )
        .route(
            "/invoice/{id}/pdf",
            get(handlers::invoices::download_invoice_pdf),
        )
        .route(
            "/invoice/{id}/edit",
            get(handlers::invoices::edit_invoice_page)
                .post(handlers::invoices::update_invoice_form),
        )
        .route(
            "/company",
            get(handlers::company::company_page).post(handlers::company::save_company),
        )
        .route(
            "/account",
            get(handlers::account::account_page).post(handlers::account::save_account),
        )
        // Room above the 2 MiB per-file cap so the explicit check governs
        .layer(DefaultBodyLimit::max(4 * 1024 * 1024))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combine everything into the main router
    let app = Router::new()
        .merge(auth_routes)
        .merge(protected_routes)
        .nest_service("/uploads", ServeDir::new(&app_state.upload_dir))
        .fallback(handle_404)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state.clone());

    // Start the server
    let addr = format!("0.0.0.0:{}", app_state.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!("🚀 Server listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Axum server error");
}

async fn handle_404() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Page not found")
}
