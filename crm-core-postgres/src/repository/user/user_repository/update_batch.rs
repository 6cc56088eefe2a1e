use async_trait::async_trait;
use crm_core_db::models::user::UserModel;
use crm_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::UserRepositoryImpl;

impl UserRepositoryImpl {
    pub(super) async fn update_batch_impl(
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
                UPDATE users SET
                    email = $2, password_hash = $3, name = $4, user_type = $5,
                    is_active = $6, deleted_by = $7, deleted_at = $8
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(&item.email)
            .bind(&item.password_hash)
            .bind(item.name.as_deref())
            .bind(item.user_type)
            .bind(item.is_active)
            .bind(item.deleted_by)
            .bind(item.deleted_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, UserModel> for UserRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<UserModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
