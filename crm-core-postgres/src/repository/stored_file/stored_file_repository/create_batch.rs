use async_trait::async_trait;
use crm_core_db::models::stored_file::StoredFileModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StoredFileRepositoryImpl;

impl StoredFileRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &StoredFileRepositoryImpl,
        items: Vec<StoredFileModel>,
    ) -> Result<Vec<StoredFileModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO stored_file (
                    id, public_url, storage_path, document_type, uploaded_by, created_at, deleted_at, deleted_by
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(&item.public_url)
            .bind(&item.storage_path)
            .bind(item.document_type.as_deref())
            .bind(item.uploaded_by)
            .bind(item.created_at)
            .bind(item.deleted_at)
            .bind(item.deleted_by)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, StoredFileModel> for StoredFileRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<StoredFileModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<StoredFileModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
