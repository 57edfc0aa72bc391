// src/services/document_service.rs

use genpdf::{elements, style, Alignment, Element, Scale};
use rust_decimal::Decimal;
use std::path::Path;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, InvoiceRepository},
    models::{company::Company, invoice::InvoiceDetail},
};

// Placeholder branding used when no company row exists at all
const FALLBACK_NAME: &str = "ServicesAutomann Inc.";
const FALLBACK_ADDRESS: &str = "1234 Main St\nAnyTown, QC H0H 0H0";

#[derive(Clone)]
pub struct DocumentService {
    invoice_repo: InvoiceRepository,
    company_repo: CompanyRepository,
    upload_dir: String,
}

impl DocumentService {
    pub fn new(
        invoice_repo: InvoiceRepository,
        company_repo: CompanyRepository,
        upload_dir: String,
    ) -> Self {
        Self {
            invoice_repo,
            company_repo,
            upload_dir,
        }
    }

    /// Renders one invoice into a PDF byte buffer. Company branding comes
    /// from the invoice's explicit company link when set, then the first
    /// company row, then hardcoded placeholders.
    pub async fn generate_invoice_pdf(&self, invoice_id: i32) -> Result<Vec<u8>, AppError> {
        let detail = self
            .invoice_repo
            .get_invoice_detail(invoice_id)
            .await?
            .ok_or(AppError::InvoiceNotFound)?;

        let company = match detail.invoice.company_id {
            Some(company_id) => self.company_repo.get_by_id(company_id).await?,
            None => self.company_repo.get().await?,
        };

        self.render(&detail, company.as_ref())
    }

    fn render(&self, detail: &InvoiceDetail, company: Option<&Company>) -> Result<Vec<u8>, AppError> {
        // Loads the font family from the 'fonts/' directory
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("No Roboto family under ./fonts".to_string()))?;

        let invoice = &detail.invoice;
        let customer = &detail.customer;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Invoice #{}", invoice.id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- COMPANY HEADER ---
        // A missing or unreadable logo file never aborts the export; the
        // header simply renders without it.
        if let Some(logo) = company.and_then(|c| non_empty(c.logo.as_deref())) {
            let path = Path::new(&self.upload_dir).join("company").join(logo);
            match image::open(&path) {
                Ok(img) => match elements::Image::from_dynamic_image(img) {
                    Ok(pdf_image) => doc.push(pdf_image.with_scale(Scale::new(0.5, 0.5))),
                    Err(e) => tracing::warn!("Skipping logo, not renderable as PDF image: {e}"),
                },
                Err(e) => tracing::warn!("Skipping logo {}: {e}", path.display()),
            }
        }

        let small = style::Style::new().with_font_size(10);

        let name = company
            .and_then(|c| non_empty(c.name.as_deref()))
            .unwrap_or(FALLBACK_NAME);
        doc.push(
            elements::Paragraph::new(name)
                .aligned(Alignment::Right)
                .styled(style::Style::new().bold().with_font_size(18)),
        );

        let address = company
            .and_then(|c| non_empty(c.address.as_deref()))
            .unwrap_or(FALLBACK_ADDRESS);
        for line in address.lines() {
            doc.push(
                elements::Paragraph::new(line)
                    .aligned(Alignment::Right)
                    .styled(small),
            );
        }

        let tin = company
            .and_then(|c| non_empty(c.tin.as_deref()))
            .unwrap_or("—");
        doc.push(
            elements::Paragraph::new(format!("TIN: {tin}"))
                .aligned(Alignment::Right)
                .styled(small),
        );

        let phone = company
            .and_then(|c| non_empty(c.phone.as_deref()))
            .unwrap_or("—");
        doc.push(
            elements::Paragraph::new(format!("Phone: {phone}"))
                .aligned(Alignment::Right)
                .styled(small),
        );

        doc.push(elements::Break::new(1.5));

        // --- INVOICE + BILL-TO ---
        let bold = style::Style::new().bold();
        doc.push(elements::Paragraph::new(format!("Invoice #{}", invoice.id)).styled(bold));
        doc.push(elements::Paragraph::new(format!("Date: {}", invoice.invoice_date)));
        doc.push(elements::Break::new(1));

        doc.push(elements::Paragraph::new("Bill To").styled(bold));
        doc.push(elements::Paragraph::new(customer.name.as_str()));
        if let Some(email) = non_empty(customer.email.as_deref()) {
            doc.push(elements::Paragraph::new(email));
        }
        if let Some(phone) = non_empty(customer.phone.as_deref()) {
            doc.push(elements::Paragraph::new(phone));
        }
        let vehicle = format!(
            "{} {} {}",
            customer.vehicle_year.as_deref().unwrap_or(""),
            customer.vehicle_make.as_deref().unwrap_or(""),
            customer.vehicle_model.as_deref().unwrap_or("")
        );
        let vehicle = vehicle.split_whitespace().collect::<Vec<_>>().join(" ");
        if !vehicle.is_empty() {
            doc.push(elements::Paragraph::new(vehicle));
        }

        doc.push(elements::Break::new(2));

        // --- ITEMS TABLE ---
        // Column weights: description (4), qty (1), unit price (2), line (2)
        let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        table
            .row()
            .element(elements::Paragraph::new("Description").styled(bold))
            .element(elements::Paragraph::new("Qty").styled(bold))
            .element(elements::Paragraph::new("Unit $").styled(bold))
            .element(elements::Paragraph::new("Line $").styled(bold))
            .push()
            .map_err(table_error)?;

        for item in &detail.items {
            // Line totals are recomputed at render time, never read back
            // from storage.
            let line_total = Decimal::from(item.quantity) * item.unit_price;
            table
                .row()
                .element(elements::Paragraph::new(item.description.as_str()))
                .element(
                    elements::Paragraph::new(item.quantity.to_string()).aligned(Alignment::Right),
                )
                .element(
                    elements::Paragraph::new(format!("{:.2}", item.unit_price))
                        .aligned(Alignment::Right),
                )
                .element(
                    elements::Paragraph::new(format!("{line_total:.2}")).aligned(Alignment::Right),
                )
                .push()
                .map_err(table_error)?;
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTALS ---
        doc.push(
            elements::Paragraph::new(format!("Subtotal: {:.2}", invoice.subtotal))
                .aligned(Alignment::Right),
        );
        doc.push(
            elements::Paragraph::new(format!("GST (5%): {:.2}", invoice.gst))
                .aligned(Alignment::Right),
        );
        doc.push(
            elements::Paragraph::new(format!("QST (9.975%): {:.2}", invoice.qst))
                .aligned(Alignment::Right),
        );
        doc.push(
            elements::Paragraph::new(format!("TOTAL: {:.2}", invoice.total))
                .aligned(Alignment::Right)
                .styled(style::Style::new().bold().with_font_size(12)),
        );

        // Render into memory; the handler streams the buffer out
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| anyhow::anyhow!("PDF rendering failed: {e}"))?;

        Ok(buffer)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn table_error(e: genpdf::error::Error) -> AppError {
    AppError::InternalServerError(anyhow::anyhow!("Table layout error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_company_fields_fall_back() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(Some(" Garage Roy ")), Some("Garage Roy"));
    }
}
