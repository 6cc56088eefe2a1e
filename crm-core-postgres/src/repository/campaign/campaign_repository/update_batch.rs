use async_trait::async_trait;
use crm_core_db::models::campaign::CampaignModel;
use crm_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{bind_columns, title_hash, CampaignRepositoryImpl};

impl CampaignRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &CampaignRepositoryImpl,
        items: Vec<CampaignModel>,
    ) -> Result<Vec<CampaignModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let query = sqlx::query(
                r#"
                UPDATE campaign SET
                    channel = $2, total_budget = $3, creative_link = $4, start_date = $5,
                    campaign_type = $6, title = $7, title_hash = $8, description = $9,
                    status = $10, responsible_name = $11, daily_budget = $12, webhook_url = $13,
                    cost_per_click = $14, clicks_to_date = $15, created_at = $16, updated_at = $17
                WHERE id = $1
                "#,
            )
            .bind(item.id);
            bind_columns(query, item, title_hash(&item.title)?)
                .execute(&mut **transaction)
                .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, CampaignModel> for CampaignRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<CampaignModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<CampaignModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
