use async_trait::async_trait;
use crm_core_db::models::lead::LeadModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{bind_columns, lead_email_hash, LeadRepositoryImpl};

impl LeadRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &LeadRepositoryImpl,
        items: Vec<LeadModel>,
    ) -> Result<Vec<LeadModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let query = sqlx::query(
                r#"
                INSERT INTO lead (
                    id, business_id, lead_status, first_name, last_name, email, email_hash,
                    cpf_cnpj, phone, phone2, person_type, device_used, campaign_id, photo_url,
                    interest_reason, estimated_average_ticket, entry_date, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
                "#,
            )
            .bind(item.id);
            bind_columns(query, item, lead_email_hash(item)?)
                .execute(&mut **transaction)
                .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, LeadModel> for LeadRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<LeadModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<LeadModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load::Load;
    use rust_decimal::Decimal;
    use super::super::test_utils::test_utils::create_test_lead;

    #[tokio::test]
    async fn test_create_lead() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let lead_repo = &ctx.lead_repos().lead_repository;

        let mut lead = create_test_lead();
        lead.estimated_average_ticket = Some(Decimal::new(120_000, 2));
        lead_repo.create_batch(vec![lead.clone()], None).await?;

        let loaded = lead_repo.load(lead.id).await?.unwrap();
        assert_eq!(loaded.email, lead.email);
        assert_eq!(loaded.lead_status.as_deref(), Some("new"));
        assert_eq!(loaded.estimated_average_ticket, Some(Decimal::new(120_000, 2)));

        Ok(())
    }
}
