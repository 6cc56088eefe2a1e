use std::error::Error;

use super::repo_impl::{title_hash, CampaignRepositoryImpl};

impl CampaignRepositoryImpl {
    /// Adds one click in a single statement. Returns the new total, or `None`
    /// when no campaign has `title`.
    pub async fn increment_clicks(&self, title: &str) -> Result<Option<i64>, Box<dyn Error + Send + Sync>> {
        let hash = title_hash(title)?;
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let clicks: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE campaign SET clicks_to_date = clicks_to_date + 1, updated_at = NOW()
            WHERE title_hash = $1 AND title = $2
            RETURNING clicks_to_date
            "#,
        )
        .bind(hash)
        .bind(title)
        .fetch_optional(&mut **transaction)
        .await?;

        Ok(clicks)
    }
}
