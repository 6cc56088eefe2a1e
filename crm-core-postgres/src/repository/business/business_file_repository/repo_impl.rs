use crm_core_db::models::business::BusinessFileModel;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::error::Error;

use postgres_unit_of_work::Executor;
use crate::utils::TryFromRow;

pub struct BusinessFileRepositoryImpl {
    pub executor: Executor,
}

impl BusinessFileRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for BusinessFileModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(BusinessFileModel {
            id: row.try_get("id")?,
            business_id: row.try_get("business_id")?,
            stored_file_id: row.try_get("stored_file_id")?,
            filename: row.try_get("filename")?,
            file_type: row.try_get("file_type")?,
            public_url: row.try_get("public_url")?,
            uploaded_by: row.try_get("uploaded_by")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
