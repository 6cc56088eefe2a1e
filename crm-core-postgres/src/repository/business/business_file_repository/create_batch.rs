use async_trait::async_trait;
use crm_core_db::models::business::BusinessFileModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::BusinessFileRepositoryImpl;

impl BusinessFileRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &BusinessFileRepositoryImpl,
        items: Vec<BusinessFileModel>,
    ) -> Result<Vec<BusinessFileModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO business_file (
                    id, business_id, stored_file_id, filename, file_type, public_url, uploaded_by, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(item.business_id)
            .bind(item.stored_file_id)
            .bind(&item.filename)
            .bind(item.file_type.as_deref())
            .bind(item.public_url.as_deref())
            .bind(item.uploaded_by)
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, BusinessFileModel> for BusinessFileRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<BusinessFileModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<BusinessFileModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
