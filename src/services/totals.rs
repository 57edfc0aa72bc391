// src/services/totals.rs

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::invoice::{InvoiceTotals, NewInvoiceItem};

fn gst_rate() -> Decimal {
    Decimal::new(5, 2) // 5%
}

fn qst_rate() -> Decimal {
    Decimal::new(9975, 5) // 9.975%
}

/// Computes subtotal/GST/QST/total for a list of validated line items.
///
/// The subtotal accumulates unrounded; the tax components and the grand
/// total derive from that raw sum. Every stored figure is rounded to two
/// fractional digits, half away from zero. Callers guarantee non-empty,
/// positive-valued items, so there are no failure modes here.
pub fn calc_totals(items: &[NewInvoiceItem]) -> InvoiceTotals {
    let round = |d: Decimal| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let subtotal: Decimal = items
        .iter()
        .map(|item| Decimal::from(item.quantity) * item.unit_price)
        .sum();

    let gst = round(subtotal * gst_rate());
    let qst = round(subtotal * qst_rate());
    let total = round(subtotal + gst + qst);

    InvoiceTotals {
        subtotal: round(subtotal),
        gst,
        qst,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn item(quantity: i32, unit_price: &str) -> NewInvoiceItem {
        NewInvoiceItem {
            description: "Labour".to_string(),
            quantity,
            unit_price: Decimal::from_str(unit_price).unwrap(),
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn computes_the_worked_example() {
        // 125 x 0.09975 = 12.46875, which rounds up to 12.47
        let totals = calc_totals(&[item(2, "50.00"), item(1, "25.00")]);
        assert_eq!(totals.subtotal, dec("125.00"));
        assert_eq!(totals.gst, dec("6.25"));
        assert_eq!(totals.qst, dec("12.47"));
        assert_eq!(totals.total, dec("143.72"));
    }

    #[test]
    fn total_is_the_sum_of_the_parts() {
        let totals = calc_totals(&[item(3, "19.99"), item(1, "4.50")]);
        assert_eq!(totals.total, totals.subtotal + totals.gst + totals.qst);
        assert!(totals.total >= totals.subtotal);
    }

    #[test]
    fn rounds_midpoints_away_from_zero() {
        // gst on 0.10 is exactly 0.005
        let totals = calc_totals(&[item(1, "0.10")]);
        assert_eq!(totals.gst, dec("0.01"));
    }

    #[test]
    fn single_item_invoice() {
        let totals = calc_totals(&[item(4, "100.00")]);
        assert_eq!(totals.subtotal, dec("400.00"));
        assert_eq!(totals.gst, dec("20.00"));
        assert_eq!(totals.qst, dec("39.90"));
        assert_eq!(totals.total, dec("459.90"));
    }
}
