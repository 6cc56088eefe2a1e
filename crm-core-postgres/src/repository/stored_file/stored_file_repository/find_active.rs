use crm_core_db::models::stored_file::StoredFileModel;
use std::error::Error;

use crate::utils::map_rows;

use super::repo_impl::StoredFileRepositoryImpl;

impl StoredFileRepositoryImpl {
    /// Files that were not soft deleted, newest first.
    pub async fn find_active(&self) -> Result<Vec<StoredFileModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"SELECT * FROM stored_file WHERE deleted_at IS NULL ORDER BY created_at DESC, id DESC"#,
            )
            .fetch_all(&mut **transaction)
            .await?
        };
        map_rows(&rows)
    }
}
