// src/handlers/invoices.rs

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::Form;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        view,
    },
    config::AppState,
    db::invoice_repo::PAGE_SIZE,
    middleware::auth::AuthenticatedUser,
    models::invoice::{InvoiceStatus, NewCustomer, NewInvoiceItem},
    services::{invoice_service, session::SessionUser},
};

/* ---------- list (pagination) ---------- */

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// Floors the page parameter to 1 for anything non-numeric or smaller.
fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Total page count for the pagination footer.
fn page_count(total: i64) -> i64 {
    (total + PAGE_SIZE - 1) / PAGE_SIZE
}

/// GET /invoices?page=n
pub async fn list_invoices(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let page = parse_page(query.page.as_deref());
    let (invoices, total) = app_state.invoice_repo.get_invoices_paged(page).await?;

    let mut ctx = view::page_context(&app_state, Some(&user)).await;
    ctx.insert("invoices", &invoices);
    ctx.insert("page", &page);
    ctx.insert("pages", &page_count(total));
    view::render(&app_state, "invoice_list.html", &ctx)
}

/* ---------- create via HTML form ---------- */

#[derive(Debug, Default, Deserialize)]
pub struct InvoiceForm {
    #[serde(default)]
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
    pub invoice_date: Option<String>,
    // Item rows arrive as parallel arrays, either with the `[]` suffix or
    // as bare repeated names; both shapes are accepted.
    #[serde(default, rename = "description[]")]
    pub description_arr: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default, rename = "quantity[]")]
    pub quantity_arr: Vec<String>,
    #[serde(default)]
    pub quantity: Vec<String>,
    #[serde(default, rename = "unit_price[]")]
    pub unit_price_arr: Vec<String>,
    #[serde(default)]
    pub unit_price: Vec<String>,
}

impl InvoiceForm {
    fn customer(&self) -> NewCustomer {
        NewCustomer {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            vehicle_make: self.vehicle_make.clone(),
            vehicle_model: self.vehicle_model.clone(),
            vehicle_year: self.vehicle_year.clone(),
        }
    }

    fn items(&self) -> Vec<NewInvoiceItem> {
        invoice_service::collect_items(
            pick(&self.description_arr, &self.description),
            pick(&self.quantity_arr, &self.quantity),
            pick(&self.unit_price_arr, &self.unit_price),
        )
    }
}

/// The array-suffixed field shape wins whenever it was submitted.
fn pick<'a>(array: &'a [String], bare: &'a [String]) -> &'a [String] {
    if array.is_empty() {
        bare
    } else {
        array
    }
}

/// Empty or missing dates default to today at creation time; anything else
/// must parse as YYYY-MM-DD.
fn parse_invoice_date(raw: Option<&str>) -> Result<Option<NaiveDate>, chrono::ParseError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Some),
    }
}

async fn render_create_form(
    app_state: &AppState,
    user: &SessionUser,
    error: Option<&str>,
    current_date: &str,
) -> Result<Html<String>, AppError> {
    let mut ctx = view::page_context(app_state, Some(user)).await;
    ctx.insert("error", &error);
    ctx.insert("current_date", current_date);
    ctx.insert("edit", &false);
    view::render(app_state, "invoice_form.html", &ctx)
}

/// GET /create-invoice
pub async fn create_invoice_page(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Html<String>, AppError> {
    let today = chrono::Local::now().date_naive().to_string();
    render_create_form(&app_state, &user, None, &today).await
}

/// POST /create-invoice
pub async fn create_invoice_form(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Form(form): Form<InvoiceForm>,
) -> Result<Response, AppError> {
    // The submitted date is echoed back on every re-render
    let submitted_date = form.invoice_date.clone().unwrap_or_default();

    let Ok(invoice_date) = parse_invoice_date(form.invoice_date.as_deref()) else {
        let page =
            render_create_form(&app_state, &user, Some("Invalid invoice date."), &submitted_date)
                .await?;
        return Ok(page.into_response());
    };

    let items = form.items();
    if items.is_empty() {
        let page = render_create_form(
            &app_state,
            &user,
            Some("Add at least one valid item."),
            &submitted_date,
        )
        .await?;
        return Ok(page.into_response());
    }

    // Validation is done; only now do any rows get written
    match app_state
        .invoice_service
        .create_invoice(&form.customer(), &items, invoice_date)
        .await
    {
        Ok(_) => Ok(Redirect::to("/invoices").into_response()),
        Err(e) => {
            tracing::error!("Create invoice error: {e:?}");
            let page =
                render_create_form(&app_state, &user, Some("Server error"), &submitted_date)
                    .await?;
            Ok(page.into_response())
        }
    }
}

/* ---------- JSON API ---------- */

#[derive(Debug, Deserialize, Validate)]
pub struct ApiInvoicePayload {
    #[validate(nested)]
    pub customer: NewCustomer,
    pub items: Vec<NewInvoiceItem>,
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
}

/// POST /api/create-invoice
pub async fn create_invoice_api(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    payload: Result<Json<ApiInvoicePayload>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Ok(Json(payload)) = payload else {
        return Err(AppError::Validation("Invalid payload".to_string()).to_api_error());
    };

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error())?;

    let items = invoice_service::valid_items(payload.items);
    if items.is_empty() {
        return Err(AppError::Validation("Add at least one valid item.".to_string()).to_api_error());
    }

    let invoice = app_state
        .invoice_service
        .create_invoice(&payload.customer, &items, payload.invoice_date)
        .await
        .map_err(AppError::to_api_error)?;

    Ok(Json(json!({
        "message": "Invoice created",
        "invoice": invoice,
    })))
}

/* ---------- PDF download ---------- */

/// GET /invoice/{id}/pdf
pub async fn download_invoice_pdf(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(invoice_id): Path<i32>,
) -> Result<Response, AppError> {
    let pdf_bytes = app_state
        .document_service
        .generate_invoice_pdf(invoice_id)
        .await?;

    // Headers so the browser downloads the document
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"invoice-{invoice_id}.pdf\""),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}

/* ---------- edit page + save ---------- */

/// GET /invoice/{id}/edit
pub async fn edit_invoice_page(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(invoice_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let detail = app_state
        .invoice_repo
        .get_invoice_detail(invoice_id)
        .await?
        .ok_or(AppError::InvoiceNotFound)?;

    let mut ctx = view::page_context(&app_state, Some(&user)).await;
    ctx.insert("error", &Option::<&str>::None);
    ctx.insert("current_date", &detail.invoice.invoice_date.to_string());
    ctx.insert("edit", &true);
    ctx.insert("inv", &detail.invoice);
    ctx.insert("customer", &detail.customer);
    ctx.insert("items", &detail.items);
    view::render(&app_state, "invoice_form.html", &ctx)
}

#[derive(Debug, Deserialize)]
pub struct EditInvoiceForm {
    #[serde(default)]
    pub status: String,
}

/// POST /invoice/{id}/edit
///
/// Only the status is editable; everything else about an invoice is frozen
/// at creation. The redirect happens regardless of the prior status.
pub async fn update_invoice_form(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(invoice_id): Path<i32>,
    Form(form): Form<EditInvoiceForm>,
) -> Result<Redirect, AppError> {
    let status = InvoiceStatus::from_form(&form.status);
    app_state
        .invoice_repo
        .update_status(invoice_id, status)
        .await?;

    Ok(Redirect::to("/invoices"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("4")), 4);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(10), 1);
        assert_eq!(page_count(11), 2);
        assert_eq!(page_count(95), 10);
    }

    #[test]
    fn array_suffixed_fields_win_over_bare_names() {
        let form = InvoiceForm {
            description_arr: vec!["From array".to_string()],
            quantity_arr: vec!["1".to_string()],
            unit_price_arr: vec!["10.00".to_string()],
            description: vec!["From bare".to_string()],
            quantity: vec!["2".to_string()],
            unit_price: vec!["20.00".to_string()],
            ..InvoiceForm::default()
        };
        let items = form.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "From array");
    }

    #[test]
    fn bare_names_are_accepted_when_no_array_shape_was_sent() {
        let form = InvoiceForm {
            description: vec!["Bare".to_string()],
            quantity: vec!["3".to_string()],
            unit_price: vec!["5.00".to_string()],
            ..InvoiceForm::default()
        };
        let items = form.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn blank_dates_default_and_malformed_dates_are_rejected() {
        assert_eq!(parse_invoice_date(None), Ok(None));
        assert_eq!(parse_invoice_date(Some("")), Ok(None));
        assert_eq!(parse_invoice_date(Some("  ")), Ok(None));
        assert_eq!(
            parse_invoice_date(Some("2026-02-14")),
            Ok(NaiveDate::from_ymd_opt(2026, 2, 14))
        );
        assert!(parse_invoice_date(Some("14/02/2026")).is_err());
    }
}
