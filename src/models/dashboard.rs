// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Aggregate counters for the home page. The zeroed default is what the
/// dashboard falls back to when aggregation fails.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardMetrics {
    pub total_customers: i64,
    pub total_invoices: i64,
    pub total_revenue: Decimal,
    pub avg_invoice: Decimal,
}

/// One point of the revenue-by-date series.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RevenuePoint {
    pub date: String,
    pub revenue: Decimal,
}
