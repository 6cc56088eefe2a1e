use async_trait::async_trait;
use crm_core_db::repository::exist_by_ids::ExistByIds;
use sqlx::{Postgres, Row};
use std::collections::HashSet;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::BusinessRepositoryImpl;

impl BusinessRepositoryImpl {
    pub(super) async fn exist_by_ids_impl(
        repo: &BusinessRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT id FROM business WHERE id = ANY($1)"#)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut existing = HashSet::new();
        for row in rows {
            existing.insert(row.try_get::<Uuid, _>("id")?);
        }

        Ok(ids.iter().map(|id| (*id, existing.contains(id))).collect())
    }
}

#[async_trait]
impl ExistByIds<Postgres> for BusinessRepositoryImpl {
    async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        Self::exist_by_ids_impl(self, ids).await
    }
}
