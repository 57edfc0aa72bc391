// src/db/company_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::company::{Company, CompanyInput},
};

// Repository for the (conventionally single-row) company profile
#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The authoritative profile row: the first one, by id.
    pub async fn get(&self) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY id LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(company)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(company)
    }

    pub async fn create(&self, input: &CompanyInput) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, tin, address, phone, logo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.tin)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.logo)
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }

    /// Updates the profile. The logo column only changes when a new file
    /// was uploaded; COALESCE keeps the stored reference otherwise.
    pub async fn update(&self, id: i32, input: &CompanyInput) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
               SET name = $1,
                   tin = $2,
                   address = $3,
                   phone = $4,
                   logo = COALESCE($5, logo)
             WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.tin)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.logo)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }
}
