use async_trait::async_trait;
use crm_core_db::models::campaign::CampaignModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{bind_columns, title_hash, CampaignRepositoryImpl};

impl CampaignRepositoryImpl {
    pub(super) async fn create_batch_impl(
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
                INSERT INTO campaign (
                    id, channel, total_budget, creative_link, start_date, campaign_type,
                    title, title_hash, description, status, responsible_name, daily_budget,
                    webhook_url, cost_per_click, clicks_to_date, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
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
impl CreateBatch<Postgres, CampaignModel> for CampaignRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<CampaignModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<CampaignModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
