use crm_core_db::models::deal_stage::DealStageModel;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::error::Error;

use postgres_unit_of_work::Executor;
use crate::utils::TryFromRow;

pub struct DealStageRepositoryImpl {
    pub executor: Executor,
}

impl DealStageRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for DealStageModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(DealStageModel {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            position: row.try_get("position")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
