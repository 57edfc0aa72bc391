pub mod company_repo;
pub mod dashboard_repo;
pub mod invoice_repo;

pub use company_repo::CompanyRepository;
pub use dashboard_repo::DashboardRepository;
pub use invoice_repo::InvoiceRepository;
