use async_trait::async_trait;
use crm_core_db::models::business::BusinessModel;
use crm_core_db::repository::load::Load;
use crm_core_db::repository::load_batch::LoadBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use crate::utils::TryFromRow;

use super::repo_impl::BusinessRepositoryImpl;

impl BusinessRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &BusinessRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<BusinessModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = r#"SELECT * FROM business WHERE id = ANY($1)"#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).bind(ids).fetch_all(&mut **transaction).await?
        };

        let mut item_map = std::collections::HashMap::new();
        for row in rows {
            let item = BusinessModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, BusinessModel> for BusinessRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<BusinessModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[async_trait]
impl Load<Postgres, BusinessModel> for BusinessRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<BusinessModel>, Box<dyn Error + Send + Sync>> {
        Ok(Self::load_batch_impl(self, &[id]).await?.into_iter().next().flatten())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load_batch::LoadBatch;
    use uuid::Uuid;
    use super::super::test_utils::test_utils::create_test_business;

    #[tokio::test]
    async fn test_load_batch_with_non_existing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let business_repo = &ctx.business_repos().business_repository;

        let saved = business_repo
            .create_batch(vec![create_test_business("Loaded deal")], None)
            .await?;

        let ids = vec![Uuid::new_v4(), saved[0].id];
        let loaded = business_repo.load_batch(&ids).await?;

        assert_eq!(loaded.len(), 2);
        assert!(loaded[0].is_none());
        assert_eq!(loaded[1].as_ref().map(|b| b.id), Some(saved[0].id));

        Ok(())
    }
}
