use async_trait::async_trait;
use crm_core_db::models::deal_stage::DealStageModel;
use crm_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::DealStageRepositoryImpl;

impl DealStageRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &DealStageRepositoryImpl,
        items: Vec<DealStageModel>,
    ) -> Result<Vec<DealStageModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(r#"UPDATE deal_stage SET name = $2, position = $3 WHERE id = $1"#)
                .bind(item.id)
                .bind(&item.name)
                .bind(item.position)
                .execute(&mut **transaction)
                .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, DealStageModel> for DealStageRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<DealStageModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<DealStageModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
