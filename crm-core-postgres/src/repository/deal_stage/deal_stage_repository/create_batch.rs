use async_trait::async_trait;
use crm_core_db::models::deal_stage::DealStageModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::DealStageRepositoryImpl;

impl DealStageRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &DealStageRepositoryImpl,
        items: Vec<DealStageModel>,
    ) -> Result<Vec<DealStageModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO deal_stage (id, name, position, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(item.id)
            .bind(&item.name)
            .bind(item.position)
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, DealStageModel> for DealStageRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<DealStageModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<DealStageModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load::Load;
    use super::super::test_utils::test_utils::create_test_deal_stage;

    #[tokio::test]
    async fn test_create_deal_stage() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let stage_repo = &ctx.deal_stage_repos().deal_stage_repository;

        let stage = create_test_deal_stage(3);
        stage_repo.create_batch(vec![stage.clone()], None).await?;

        let loaded = stage_repo.load(stage.id).await?.unwrap();
        assert_eq!(loaded.name, stage.name);
        assert_eq!(loaded.position, 3);

        Ok(())
    }
}
