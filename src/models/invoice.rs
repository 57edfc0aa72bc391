// src/models/invoice.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invoice_status", rename_all = "PascalCase")]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
}

impl InvoiceStatus {
    /// Normalizes a submitted status value. Anything that is not exactly
    /// "Paid" is coerced to Unpaid.
    pub fn from_form(value: &str) -> Self {
        if value == "Paid" {
            Self::Paid
        } else {
            Self::Unpaid
        }
    }
}

// --- Row structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: i32,
    pub customer_id: i32,
    pub company_id: Option<i32>,
    pub invoice_date: NaiveDate,
    pub subtotal: Decimal,
    pub gst: Decimal,
    pub qst: Decimal,
    pub total: Decimal,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceItem {
    pub id: i32,
    pub invoice_id: i32,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// One row of the paginated invoice list, joined with the customer name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InvoiceSummary {
    pub id: i32,
    pub invoice_date: NaiveDate,
    pub total: Decimal,
    pub status: InvoiceStatus,
    pub customer_name: String,
}

/// One invoice with its customer and ordered items, as loaded for the edit
/// page and the PDF export.
#[derive(Debug, Clone)]
pub struct InvoiceDetail {
    pub invoice: Invoice,
    pub customer: Customer,
    pub items: Vec<InvoiceItem>,
}

// --- Input types ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewCustomer {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
}

/// A validated line item, ready to be priced and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvoiceItem {
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Derived invoice figures, computed once at creation time and stored.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub gst: Decimal,
    pub qst: Decimal,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paid_is_the_only_accepted_status() {
        assert_eq!(InvoiceStatus::from_form("Paid"), InvoiceStatus::Paid);
        assert_eq!(InvoiceStatus::from_form("Unpaid"), InvoiceStatus::Unpaid);
    }

    #[test]
    fn unknown_status_values_coerce_to_unpaid() {
        assert_eq!(InvoiceStatus::from_form("paid"), InvoiceStatus::Unpaid);
        assert_eq!(InvoiceStatus::from_form("PAID"), InvoiceStatus::Unpaid);
        assert_eq!(InvoiceStatus::from_form("void"), InvoiceStatus::Unpaid);
        assert_eq!(InvoiceStatus::from_form(""), InvoiceStatus::Unpaid);
    }
}
