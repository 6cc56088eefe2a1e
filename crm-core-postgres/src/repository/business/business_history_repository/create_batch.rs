use async_trait::async_trait;
use crm_core_db::models::business::BusinessHistoryModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::types::Json;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::BusinessHistoryRepositoryImpl;

impl BusinessHistoryRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &BusinessHistoryRepositoryImpl,
        items: Vec<BusinessHistoryModel>,
    ) -> Result<Vec<BusinessHistoryModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO business_history (
                    id, business_id, audit_log_id, field, old_value, new_value, changed_by, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(item.business_id)
            .bind(item.audit_log_id)
            .bind(&item.field)
            .bind(Json(&item.old_value))
            .bind(Json(&item.new_value))
            .bind(item.changed_by)
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, BusinessHistoryModel> for BusinessHistoryRepositoryImpl {
    /// Entries carry their own `audit_log_id`.
    async fn create_batch(
        &self,
        items: Vec<BusinessHistoryModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<BusinessHistoryModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
