use crm_core_api::CampaignFilter;
use crm_core_db::models::campaign::CampaignModel;
use std::error::Error;

use crate::utils::{map_rows, TryFromRow};

use super::repo_impl::{title_hash, CampaignRepositoryImpl};

impl CampaignRepositoryImpl {
    pub async fn find_by_title(&self, title: &str) -> Result<Option<CampaignModel>, Box<dyn Error + Send + Sync>> {
        let hash = title_hash(title)?;
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM campaign WHERE title_hash = $1 AND title = $2"#)
                .bind(hash)
                .bind(title)
                .fetch_optional(&mut **transaction)
                .await?
        };
        row.as_ref().map(CampaignModel::try_from_row).transpose()
    }

    /// Newest first; unset filter fields match everything.
    pub async fn find_all(&self, filter: &CampaignFilter) -> Result<Vec<CampaignModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT * FROM campaign
                WHERE ($1::text IS NULL OR status = $1)
                  AND ($2::text IS NULL OR channel = $2)
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .bind(filter.status.as_deref())
            .bind(filter.channel.as_deref())
            .fetch_all(&mut **transaction)
            .await?
        };
        map_rows(&rows)
    }
}
