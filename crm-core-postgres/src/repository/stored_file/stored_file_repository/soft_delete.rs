use chrono::{DateTime, Utc};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StoredFileRepositoryImpl;

impl StoredFileRepositoryImpl {
    /// Marks an active file as deleted. Returns false when `id` is unknown or
    /// already deleted.
    pub async fn soft_delete(
        &self,
        id: Uuid,
        deleted_by: Uuid,
        deleted_at: DateTime<Utc>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query(
            r#"
            UPDATE stored_file SET deleted_at = $2, deleted_by = $3
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(deleted_at)
        .bind(deleted_by)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use chrono::Utc;
    use crm_core_db::models::stored_file::StoredFileModel;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load::Load;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_soft_deleted_files_leave_the_active_list() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let file_repo = &ctx.stored_file_repos().stored_file_repository;

        let uploader = Uuid::new_v4();
        let file = StoredFileModel {
            id: Uuid::new_v4(),
            public_url: "http://localhost:8080/files/uploads/a.pdf".to_string(),
            storage_path: "uploads/a.pdf".to_string(),
            document_type: Some("application/pdf".to_string()),
            uploaded_by: uploader,
            created_at: Utc::now(),
            deleted_at: None,
            deleted_by: None,
        };
        file_repo.create_batch(vec![file.clone()], None).await?;
        assert!(file_repo.find_active().await?.iter().any(|f| f.id == file.id));

        assert!(file_repo.soft_delete(file.id, uploader, Utc::now()).await?);
        assert!(!file_repo.soft_delete(file.id, uploader, Utc::now()).await?);

        assert!(!file_repo.find_active().await?.iter().any(|f| f.id == file.id));
        let deleted = file_repo.load(file.id).await?.unwrap();
        assert_eq!(deleted.deleted_by, Some(uploader));

        Ok(())
    }
}
