use chrono::{DateTime, Utc};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::UserRepositoryImpl;

impl UserRepositoryImpl {
    /// Soft delete. Returns false when no user has `id`.
    pub async fn deactivate(
        &self,
        id: Uuid,
        deleted_by: Uuid,
        deleted_at: DateTime<Utc>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query(
            r#"UPDATE users SET is_active = FALSE, deleted_by = $2, deleted_at = $3 WHERE id = $1"#,
        )
        .bind(id)
        .bind(deleted_by)
        .bind(deleted_at)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use chrono::Utc;
    use crm_core_db::models::user::UserType;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load::Load;
    use uuid::Uuid;
    use super::super::test_utils::test_utils::create_test_user;

    #[tokio::test]
    async fn test_deactivate() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.user_repos().user_repository;

        let admin = create_test_user(UserType::Internal);
        let target = create_test_user(UserType::Internal);
        user_repo.create_batch(vec![admin.clone(), target.clone()], None).await?;

        assert!(user_repo.deactivate(target.id, admin.id, Utc::now()).await?);
        let loaded = user_repo.load(target.id).await?.unwrap();
        assert!(!loaded.is_active);
        assert_eq!(loaded.deleted_by, Some(admin.id));
        assert!(loaded.deleted_at.is_some());

        assert!(!user_repo.deactivate(Uuid::new_v4(), admin.id, Utc::now()).await?);

        Ok(())
    }
}
