pub mod company;
pub mod dashboard;
pub mod invoice;
