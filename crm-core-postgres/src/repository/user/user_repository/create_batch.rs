use async_trait::async_trait;
use crm_core_db::models::user::UserModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::UserRepositoryImpl;

impl UserRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &UserRepositoryImpl,
        items: Vec<UserModel>,
    ) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO users (
                    id, email, password_hash, name, user_type, is_active,
                    created_by, deleted_by, deleted_at, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(item.id)
            .bind(&item.email)
            .bind(&item.password_hash)
            .bind(item.name.as_deref())
            .bind(item.user_type)
            .bind(item.is_active)
            .bind(item.created_by)
            .bind(item.deleted_by)
            .bind(item.deleted_at)
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, UserModel> for UserRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<UserModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
