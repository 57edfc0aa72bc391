// src/db/invoice_repo.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::invoice::{
        Customer, Invoice, InvoiceDetail, InvoiceItem, InvoiceStatus, InvoiceSummary, InvoiceTotals,
        NewCustomer, NewInvoiceItem,
    },
};

/// Fixed page size of the invoice list.
pub const PAGE_SIZE: i64 = 10;

#[derive(Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new customer row. Every invoice submission creates a fresh
    /// customer; there is no dedup or lookup by existing customer.
    pub async fn add_customer<'e, E>(
        &self,
        executor: E,
        customer: &NewCustomer,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, phone, email, vehicle_make, vehicle_model, vehicle_year)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.vehicle_make)
        .bind(&customer.vehicle_model)
        .bind(&customer.vehicle_year)
        .fetch_one(executor)
        .await?;

        Ok(customer)
    }

    /// Creates the invoice and its items as one atomic unit. A failure
    /// between the invoice insert and the last item insert rolls the whole
    /// group back; partial invoices are never visible to readers.
    pub async fn create_invoice<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
        items: &[NewInvoiceItem],
        totals: &InvoiceTotals,
        invoice_date: NaiveDate,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (customer_id, invoice_date, subtotal, gst, qst, total)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(invoice_date)
        .bind(totals.subtotal)
        .bind(totals.gst)
        .bind(totals.qst)
        .bind(totals.total)
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (invoice_id, description, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(invoice.id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(invoice)
    }

    /// One page of invoice summaries, newest first, plus the total row
    /// count for the pagination footer. Pages past the end come back empty.
    pub async fn get_invoices_paged(
        &self,
        page: i64,
    ) -> Result<(Vec<InvoiceSummary>, i64), AppError> {
        let offset = (page - 1) * PAGE_SIZE;

        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query_as::<_, InvoiceSummary>(
            r#"
            SELECT i.id, i.invoice_date, i.total, i.status, c.name AS customer_name
              FROM invoices i
              JOIN customers c ON c.id = i.customer_id
             ORDER BY i.id DESC
             LIMIT $1 OFFSET $2
            "#,
        )
        .bind(PAGE_SIZE)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((rows, total))
    }

    /// Loads one invoice with its customer and ordered items. `None` means
    /// the id does not exist; store failures surface as errors.
    pub async fn get_invoice_detail(
        &self,
        invoice_id: i32,
    ) -> Result<Option<InvoiceDetail>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(invoice) = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(invoice_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(invoice.customer_id)
            .fetch_one(&mut *tx)
            .await?;

        let items = sqlx::query_as::<_, InvoiceItem>(
            "SELECT * FROM invoice_items WHERE invoice_id = $1 ORDER BY id",
        )
        .bind(invoice_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(InvoiceDetail {
            invoice,
            customer,
            items,
        }))
    }

    /// Persists a status change. Unknown ids update zero rows; the save
    /// flow is idempotent and treats that as success.
    pub async fn update_status(
        &self,
        invoice_id: i32,
        status: InvoiceStatus,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE invoices SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(invoice_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
