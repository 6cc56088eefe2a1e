use async_trait::async_trait;
use crm_core_db::models::lead::LeadModel;
use crm_core_db::repository::load::Load;
use crm_core_db::repository::load_batch::LoadBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use crate::utils::TryFromRow;

use super::repo_impl::LeadRepositoryImpl;

impl LeadRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &LeadRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<LeadModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM lead WHERE id = ANY($1)"#)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut item_map = std::collections::HashMap::new();
        for row in rows {
            let item = LeadModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, LeadModel> for LeadRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<LeadModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[async_trait]
impl Load<Postgres, LeadModel> for LeadRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<LeadModel>, Box<dyn Error + Send + Sync>> {
        Ok(Self::load_batch_impl(self, &[id]).await?.into_iter().next().flatten())
    }
}
