use async_trait::async_trait;
use crm_core_db::models::audit::AuditLogModel;
use crm_core_db::repository::load_batch::LoadBatch;
use sqlx::Postgres;
use uuid::Uuid;

use super::repo_impl::AuditLogRepositoryImpl;

impl AuditLogRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &AuditLogRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<AuditLogModel>>, Box<dyn std::error::Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let query = sqlx::query_as::<_, AuditLogModel>(
            r#"
            SELECT id, updated_at, updated_by
            FROM audit_log
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids);

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            query.fetch_all(&mut **transaction).await?
        };

        let mut map: std::collections::HashMap<Uuid, AuditLogModel> = rows
            .into_iter()
            .map(|model| (model.id, model))
            .collect();

        Ok(ids.iter().map(|id| map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, AuditLogModel> for AuditLogRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<AuditLogModel>>, Box<dyn std::error::Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
