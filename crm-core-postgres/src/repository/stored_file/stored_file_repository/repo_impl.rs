use crm_core_db::models::stored_file::StoredFileModel;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::error::Error;

use postgres_unit_of_work::Executor;
use crate::utils::TryFromRow;

pub struct StoredFileRepositoryImpl {
    pub executor: Executor,
}

impl StoredFileRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for StoredFileModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(StoredFileModel {
            id: row.try_get("id")?,
            public_url: row.try_get("public_url")?,
            storage_path: row.try_get("storage_path")?,
            document_type: row.try_get("document_type")?,
            uploaded_by: row.try_get("uploaded_by")?,
            created_at: row.try_get("created_at")?,
            deleted_at: row.try_get("deleted_at")?,
            deleted_by: row.try_get("deleted_by")?,
        })
    }
}
