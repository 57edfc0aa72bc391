// src/db/dashboard_repo.rs

use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardMetrics, RevenuePoint},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Headline counters, read inside one transaction for a consistent
    /// snapshot.
    pub async fn get_metrics(&self) -> Result<DashboardMetrics, AppError> {
        let mut tx = self.pool.begin().await?;

        let total_customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&mut *tx)
            .await?;

        let total_invoices: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&mut *tx)
            .await?;

        let total_revenue: Decimal =
            sqlx::query_scalar("SELECT COALESCE(SUM(total), 0) FROM invoices")
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        let avg_invoice = if total_invoices > 0 {
            (total_revenue / Decimal::from(total_invoices))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        } else {
            Decimal::ZERO
        };

        Ok(DashboardMetrics {
            total_customers,
            total_invoices,
            total_revenue,
            avg_invoice,
        })
    }

    /// Revenue summed per invoice date, oldest first.
    pub async fn get_revenue_by_date(&self) -> Result<Vec<RevenuePoint>, AppError> {
        let points = sqlx::query_as::<_, RevenuePoint>(
            r#"
            SELECT invoice_date::text AS date,
                   COALESCE(SUM(total), 0) AS revenue
              FROM invoices
             GROUP BY invoice_date
             ORDER BY invoice_date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }
}
