use crm_core_db::models::deal_stage::DealStageModel;
use std::error::Error;

use crate::utils::{map_rows, TryFromRow};

use super::repo_impl::DealStageRepositoryImpl;

impl DealStageRepositoryImpl {
    pub async fn find_all(&self) -> Result<Vec<DealStageModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM deal_stage ORDER BY position ASC, id ASC"#)
                .fetch_all(&mut **transaction)
                .await?
        };
        map_rows(&rows)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<DealStageModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM deal_stage WHERE name = $1"#)
                .bind(name)
                .fetch_optional(&mut **transaction)
                .await?
        };
        row.as_ref().map(DealStageModel::try_from_row).transpose()
    }
}
