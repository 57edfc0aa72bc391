// src/models/company.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The issuing business profile. At most one row is authoritative: the
/// first one, unless an invoice links a company explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i32,
    pub name: Option<String>,
    pub tin: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub logo: Option<String>,
}

/// Form input for creating or updating the profile. A `None` logo keeps
/// whatever file reference is already stored.
#[derive(Debug, Clone, Default)]
pub struct CompanyInput {
    pub name: Option<String>,
    pub tin: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub logo: Option<String>,
}
