use async_trait::async_trait;
use crm_core_db::models::business::BusinessFileModel;
use crm_core_db::repository::load::Load;
use crm_core_db::repository::load_batch::LoadBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use crate::utils::TryFromRow;

use super::repo_impl::BusinessFileRepositoryImpl;

impl BusinessFileRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &BusinessFileRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<BusinessFileModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM business_file WHERE id = ANY($1)"#)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut item_map = std::collections::HashMap::new();
        for row in rows {
            let item = BusinessFileModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, BusinessFileModel> for BusinessFileRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<BusinessFileModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[async_trait]
impl Load<Postgres, BusinessFileModel> for BusinessFileRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<BusinessFileModel>, Box<dyn Error + Send + Sync>> {
        Ok(Self::load_batch_impl(self, &[id]).await?.into_iter().next().flatten())
    }
}
