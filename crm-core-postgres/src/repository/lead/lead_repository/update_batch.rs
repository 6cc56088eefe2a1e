use async_trait::async_trait;
use crm_core_db::models::lead::LeadModel;
use crm_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{bind_columns, lead_email_hash, LeadRepositoryImpl};

impl LeadRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &LeadRepositoryImpl,
        items: Vec<LeadModel>,
    ) -> Result<Vec<LeadModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let query = sqlx::query(
                r#"
                UPDATE lead SET
                    business_id = $2, lead_status = $3, first_name = $4, last_name = $5,
                    email = $6, email_hash = $7, cpf_cnpj = $8, phone = $9, phone2 = $10,
                    person_type = $11, device_used = $12, campaign_id = $13, photo_url = $14,
                    interest_reason = $15, estimated_average_ticket = $16, entry_date = $17,
                    updated_at = $18
                WHERE id = $1
                "#,
            )
            .bind(item.id);
            bind_columns(query, item, lead_email_hash(item)?)
                .execute(&mut **transaction)
                .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, LeadModel> for LeadRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<LeadModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<LeadModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
