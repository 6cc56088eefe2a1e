use async_trait::async_trait;
use crm_core_db::repository::delete_batch::DeleteBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::BusinessRepositoryImpl;

impl BusinessRepositoryImpl {
    pub(super) async fn delete_batch_impl(
        repo: &BusinessRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        // business_history is left in place; business_file rows cascade.
        let result = sqlx::query(r#"DELETE FROM business WHERE id = ANY($1)"#)
            .bind(ids)
            .execute(&mut **transaction)
            .await?;

        Ok(result.rows_affected() as usize)
    }
}

#[async_trait]
impl DeleteBatch<Postgres> for BusinessRepositoryImpl {
    async fn delete_batch(
        &self,
        ids: &[Uuid],
        _audit_log_id: Option<Uuid>,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::delete_batch::DeleteBatch;
    use crm_core_db::repository::exist_by_ids::ExistByIds;
    use uuid::Uuid;
    use super::super::test_utils::test_utils::create_test_business;

    #[tokio::test]
    async fn test_delete_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let business_repo = &ctx.business_repos().business_repository;

        let saved = business_repo
            .create_batch(
                vec![create_test_business("Keep"), create_test_business("Drop")],
                None,
            )
            .await?;

        let deleted = business_repo
            .delete_batch(&[saved[1].id, Uuid::new_v4()], None)
            .await?;
        assert_eq!(deleted, 1);

        let exist = business_repo.exist_by_ids(&[saved[0].id, saved[1].id]).await?;
        assert_eq!(exist, vec![(saved[0].id, true), (saved[1].id, false)]);

        Ok(())
    }
}
