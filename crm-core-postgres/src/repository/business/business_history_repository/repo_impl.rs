use crm_core_db::models::audit::AuditValue;
use crm_core_db::models::business::BusinessHistoryModel;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::Row;
use std::error::Error;

use postgres_unit_of_work::Executor;
use crate::utils::TryFromRow;

/// Append-only store of per-field business changes.
pub struct BusinessHistoryRepositoryImpl {
    pub executor: Executor,
}

impl BusinessHistoryRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for BusinessHistoryModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let Json(old_value) = row.try_get::<Json<AuditValue>, _>("old_value")?;
        let Json(new_value) = row.try_get::<Json<AuditValue>, _>("new_value")?;
        Ok(BusinessHistoryModel {
            id: row.try_get("id")?,
            business_id: row.try_get("business_id")?,
            audit_log_id: row.try_get("audit_log_id")?,
            field: row.try_get("field")?,
            old_value,
            new_value,
            changed_by: row.try_get("changed_by")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
