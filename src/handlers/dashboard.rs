// src/handlers/dashboard.rs

use axum::{extract::State, response::Html};

use crate::{
    common::{error::AppError, view},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::dashboard::DashboardMetrics,
};

/// Home page with the business metrics. Aggregation failures are logged
/// and degrade to zeroed metrics and an empty series; the page always
/// renders.
pub async fn home(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Html<String>, AppError> {
    let metrics = app_state.dashboard_repo.get_metrics().await;
    let revenue = app_state.dashboard_repo.get_revenue_by_date().await;

    let (metrics, revenue_data) = match (metrics, revenue) {
        (Ok(metrics), Ok(revenue_data)) => (metrics, revenue_data),
        (metrics, revenue) => {
            tracing::error!(
                "Dashboard metrics error: {:?}",
                metrics.err().or(revenue.err())
            );
            (DashboardMetrics::default(), Vec::new())
        }
    };

    let mut ctx = view::page_context(&app_state, Some(&user)).await;
    ctx.insert("metrics", &metrics);
    ctx.insert("revenue_data", &revenue_data);
    view::render(&app_state, "dashboard.html", &ctx)
}
