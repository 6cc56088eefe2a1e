use async_trait::async_trait;
use crm_core_db::models::business::BusinessModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{bind_columns, BusinessRepositoryImpl};

impl BusinessRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &BusinessRepositoryImpl,
        items: Vec<BusinessModel>,
    ) -> Result<Vec<BusinessModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let query = sqlx::query(
                r#"
                INSERT INTO business (
                    id, lead_id, property_id, stage_id, title, description, business_origin,
                    status, estimated_margin, closing_value, payment_method, loss_reason,
                    commission_responsible, sale_responsible, scheduled_meetings, time_in_stage,
                    expected_closing_date, document_pending, observation, created_by,
                    created_date, updated_at, audit_log_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                        $17, $18, $19, $20, $21, $22, $23)
                "#,
            )
            .bind(item.id);
            bind_columns(query, item).execute(&mut **transaction).await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, BusinessModel> for BusinessRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<BusinessModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<BusinessModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load::Load;
    use rust_decimal::Decimal;
    use super::super::test_utils::test_utils::create_test_business;

    #[tokio::test]
    async fn test_create_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let business_repo = &ctx.business_repos().business_repository;

        let mut businesses = Vec::new();
        for i in 0..3 {
            let mut business = create_test_business(&format!("Deal {i}"));
            business.closing_value = Some(Decimal::new(150_050, 2));
            businesses.push(business);
        }

        let saved = business_repo.create_batch(businesses.clone(), None).await?;
        assert_eq!(saved.len(), 3);

        let loaded = business_repo.load(saved[0].id).await?.unwrap();
        assert_eq!(loaded.title.as_deref(), Some("Deal 0"));
        assert_eq!(loaded.closing_value, Some(Decimal::new(150_050, 2)));
        assert_eq!(loaded.stage_id, businesses[0].stage_id);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_batch_empty() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let business_repo = &ctx.business_repos().business_repository;

        let saved = business_repo.create_batch(Vec::new(), None).await?;
        assert!(saved.is_empty());

        Ok(())
    }
}
