use async_trait::async_trait;
use crm_core_db::models::audit::AuditLogModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::AuditLogRepositoryImpl;

impl AuditLogRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &AuditLogRepositoryImpl,
        items: Vec<AuditLogModel>,
    ) -> Result<Vec<AuditLogModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO audit_log (id, updated_at, updated_by)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(item.id)
            .bind(item.updated_at)
            .bind(item.updated_by)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, AuditLogModel> for AuditLogRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<AuditLogModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<AuditLogModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
