pub mod document_service;
pub mod invoice_service;
pub mod session;
pub mod totals;
pub mod upload_service;
