use async_trait::async_trait;
use crm_core_db::models::business::BusinessModel;
use crm_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{bind_columns, BusinessRepositoryImpl};

impl BusinessRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &BusinessRepositoryImpl,
        items: Vec<BusinessModel>,
    ) -> Result<Vec<BusinessModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let query = sqlx::query(
                r#"
                UPDATE business SET
                    lead_id = $2, property_id = $3, stage_id = $4, title = $5,
                    description = $6, business_origin = $7, status = $8,
                    estimated_margin = $9, closing_value = $10, payment_method = $11,
                    loss_reason = $12, commission_responsible = $13, sale_responsible = $14,
                    scheduled_meetings = $15, time_in_stage = $16, expected_closing_date = $17,
                    document_pending = $18, observation = $19, created_by = $20,
                    created_date = $21, updated_at = $22, audit_log_id = $23
                WHERE id = $1
                "#,
            )
            .bind(item.id);
            let result = bind_columns(query, item).execute(&mut **transaction).await?;
            if result.rows_affected() == 0 {
                return Err(format!("Business {} not found for update", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, BusinessModel> for BusinessRepositoryImpl {
    /// The audit log id is already carried by each item; the parameter is ignored.
    async fn update_batch(
        &self,
        items: Vec<BusinessModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<BusinessModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
