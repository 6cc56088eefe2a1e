use async_trait::async_trait;
use crm_core_db::models::business::BusinessModel;
use crm_core_db::repository::load_for_update::LoadForUpdate;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use crate::utils::TryFromRow;

use super::repo_impl::BusinessRepositoryImpl;

impl BusinessRepositoryImpl {
    pub(super) async fn load_for_update_impl(
        repo: &BusinessRepositoryImpl,
        id: Uuid,
    ) -> Result<Option<BusinessModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM business WHERE id = $1 FOR UPDATE"#)
                .bind(id)
                .fetch_optional(&mut **transaction)
                .await?
        };

        row.as_ref().map(BusinessModel::try_from_row).transpose()
    }
}

#[async_trait]
impl LoadForUpdate<Postgres, BusinessModel> for BusinessRepositoryImpl {
    async fn load_for_update(&self, id: Uuid) -> Result<Option<BusinessModel>, Box<dyn Error + Send + Sync>> {
        Self::load_for_update_impl(self, id).await
    }
}
