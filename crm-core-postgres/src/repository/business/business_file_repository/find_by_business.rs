use crm_core_db::models::business::BusinessFileModel;
use std::error::Error;
use uuid::Uuid;

use crate::utils::map_rows;

use super::repo_impl::BusinessFileRepositoryImpl;

impl BusinessFileRepositoryImpl {
    pub async fn find_by_business(
        &self,
        business_id: Uuid,
    ) -> Result<Vec<BusinessFileModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"SELECT * FROM business_file WHERE business_id = $1 ORDER BY created_at DESC, id DESC"#,
            )
            .bind(business_id)
            .fetch_all(&mut **transaction)
            .await?
        };
        map_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::business::business_repository::test_utils::test_utils::create_test_business;
    use crate::test_helper::setup_test_context;
    use chrono::Utc;
    use crm_core_db::models::business::BusinessFileModel;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::delete_batch::DeleteBatch;
    use crm_core_db::repository::load::Load;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_business_files_follow_their_business() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.business_repos();

        let business = repos
            .business_repository
            .create_batch(vec![create_test_business("With files")], None)
            .await?
            .remove(0);

        let file = BusinessFileModel {
            id: Uuid::new_v4(),
            business_id: business.id,
            stored_file_id: None,
            filename: "contract.pdf".to_string(),
            file_type: Some("application/pdf".to_string()),
            public_url: Some("http://localhost/files/contract.pdf".to_string()),
            uploaded_by: None,
            created_at: Utc::now(),
        };
        repos.business_file_repository.create_batch(vec![file.clone()], None).await?;

        let found = repos.business_file_repository.find_by_business(business.id).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].filename, "contract.pdf");

        repos.business_repository.delete_batch(&[business.id], None).await?;
        assert!(repos.business_file_repository.load(file.id).await?.is_none());

        Ok(())
    }
}
