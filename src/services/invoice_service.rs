// src/services/invoice_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::str::FromStr;

use crate::{
    common::error::AppError,
    db::InvoiceRepository,
    models::invoice::{Invoice, NewCustomer, NewInvoiceItem},
    services::totals::calc_totals,
};

#[derive(Clone)]
pub struct InvoiceService {
    repo: InvoiceRepository,
    pool: PgPool,
}

impl InvoiceService {
    pub fn new(repo: InvoiceRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Creates the customer and the invoice-with-items group inside one
    /// transaction. Items must already be validated and non-empty; the
    /// totals are computed here, once, and stored for good.
    pub async fn create_invoice(
        &self,
        customer: &NewCustomer,
        items: &[NewInvoiceItem],
        invoice_date: Option<NaiveDate>,
    ) -> Result<Invoice, AppError> {
        let invoice_date = invoice_date.unwrap_or_else(|| chrono::Local::now().date_naive());
        let totals = calc_totals(items);

        let mut tx = self.pool.begin().await?;

        let new_customer = self.repo.add_customer(&mut *tx, customer).await?;
        let invoice = self
            .repo
            .create_invoice(&mut *tx, new_customer.id, items, &totals, invoice_date)
            .await?;

        tx.commit().await?;

        Ok(invoice)
    }
}

/// Zips the parallel description/quantity/unit-price arrays into typed line
/// items, zipping by index and dropping every row with an empty
/// description or a non-positive or unparseable quantity/price.
pub fn collect_items(
    descriptions: &[String],
    quantities: &[String],
    unit_prices: &[String],
) -> Vec<NewInvoiceItem> {
    descriptions
        .iter()
        .enumerate()
        .filter_map(|(i, description)| {
            let description = description.trim();
            if description.is_empty() {
                return None;
            }
            let quantity: i32 = quantities.get(i)?.trim().parse().ok()?;
            let unit_price = Decimal::from_str(unit_prices.get(i)?.trim()).ok()?;
            if quantity <= 0 || unit_price <= Decimal::ZERO {
                return None;
            }
            Some(NewInvoiceItem {
                description: description.to_string(),
                quantity,
                unit_price,
            })
        })
        .collect()
}

/// Drops invalid rows from an already-typed item list (the JSON API path
/// arrives typed but still unchecked).
pub fn valid_items(items: Vec<NewInvoiceItem>) -> Vec<NewInvoiceItem> {
    items
        .into_iter()
        .filter(|item| {
            !item.description.trim().is_empty()
                && item.quantity > 0
                && item.unit_price > Decimal::ZERO
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_only_fully_valid_rows() {
        let items = collect_items(
            &strings(&["Oil change", "", "Brakes", "Wipers"]),
            &strings(&["1", "2", "0", "abc"]),
            &strings(&["49.99", "10.00", "200.00", "15.00"]),
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Oil change");
        assert_eq!(items[0].quantity, 1);
    }

    #[test]
    fn all_invalid_rows_normalize_to_nothing() {
        let items = collect_items(
            &strings(&["", "  ", "Tires"]),
            &strings(&["1", "2", "-4"]),
            &strings(&["10.00", "20.00", "30.00"]),
        );
        assert!(items.is_empty());
    }

    #[test]
    fn rows_missing_a_column_are_dropped() {
        // three descriptions, only two quantities/prices submitted
        let items = collect_items(
            &strings(&["A", "B", "C"]),
            &strings(&["1", "1"]),
            &strings(&["5.00", "5.00"]),
        );
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn negative_and_zero_prices_are_dropped() {
        let items = collect_items(
            &strings(&["A", "B"]),
            &strings(&["1", "1"]),
            &strings(&["0", "-9.99"]),
        );
        assert!(items.is_empty());
    }

    #[test]
    fn typed_items_are_filtered_the_same_way() {
        let items = valid_items(vec![
            NewInvoiceItem {
                description: "Good".to_string(),
                quantity: 2,
                unit_price: Decimal::new(500, 2),
            },
            NewInvoiceItem {
                description: "   ".to_string(),
                quantity: 2,
                unit_price: Decimal::new(500, 2),
            },
            NewInvoiceItem {
                description: "Bad qty".to_string(),
                quantity: 0,
                unit_price: Decimal::new(500, 2),
            },
        ]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Good");
    }
}
