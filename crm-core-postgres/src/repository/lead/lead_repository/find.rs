use crm_core_db::models::lead::LeadModel;
use std::error::Error;
use uuid::Uuid;

use crate::utils::{map_rows, TryFromRow};

use super::repo_impl::{email_hash, LeadRepositoryImpl};

impl LeadRepositoryImpl {
    pub async fn find_all(&self) -> Result<Vec<LeadModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM lead ORDER BY entry_date DESC, id DESC"#)
                .fetch_all(&mut **transaction)
                .await?
        };
        map_rows(&rows)
    }

    pub async fn find_by_business(&self, business_id: Uuid) -> Result<Vec<LeadModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM lead WHERE business_id = $1 ORDER BY entry_date DESC, id DESC"#)
                .bind(business_id)
                .fetch_all(&mut **transaction)
                .await?
        };
        map_rows(&rows)
    }

    pub async fn find_by_status(&self, status: &str) -> Result<Vec<LeadModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM lead WHERE lead_status = $1 ORDER BY entry_date DESC, id DESC"#)
                .bind(status)
                .fetch_all(&mut **transaction)
                .await?
        };
        map_rows(&rows)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<LeadModel>, Box<dyn Error + Send + Sync>> {
        let hash = email_hash(email)?;
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM lead WHERE email_hash = $1 AND email = $2"#)
                .bind(hash)
                .bind(email)
                .fetch_optional(&mut **transaction)
                .await?
        };
        row.as_ref().map(LeadModel::try_from_row).transpose()
    }

    /// First match; cpf/cnpj is not unique at the schema level.
    pub async fn find_by_cpf_cnpj(&self, cpf_cnpj: &str) -> Result<Option<LeadModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM lead WHERE cpf_cnpj = $1 ORDER BY entry_date DESC, id DESC LIMIT 1"#)
                .bind(cpf_cnpj)
                .fetch_optional(&mut **transaction)
                .await?
        };
        row.as_ref().map(LeadModel::try_from_row).transpose()
    }

    /// Another lead (not `exclude_id`) already using `email` or `cpf_cnpj`.
    pub async fn find_conflict(
        &self,
        exclude_id: Uuid,
        email: Option<&str>,
        cpf_cnpj: Option<&str>,
    ) -> Result<Option<LeadModel>, Box<dyn Error + Send + Sync>> {
        if email.is_none() && cpf_cnpj.is_none() {
            return Ok(None);
        }
        let hash = email.map(email_hash).transpose()?;
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT * FROM lead
                WHERE id <> $1
                  AND ((email_hash = $2 AND email = $3) OR cpf_cnpj = $4)
                LIMIT 1
                "#,
            )
            .bind(exclude_id)
            .bind(hash)
            .bind(email)
            .bind(cpf_cnpj)
            .fetch_optional(&mut **transaction)
            .await?
        };
        row.as_ref().map(LeadModel::try_from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::business::business_repository::test_utils::test_utils::create_test_business;
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use heapless::String as HeaplessString;
    use std::str::FromStr;
    use uuid::Uuid;
    use super::super::test_utils::test_utils::create_test_lead;

    #[tokio::test]
    async fn test_find_by_business_and_identity() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let business = ctx
            .business_repos()
            .business_repository
            .create_batch(vec![create_test_business("Lead owner")], None)
            .await?
            .remove(0);
        let lead_repo = &ctx.lead_repos().lead_repository;

        let mut lead = create_test_lead();
        lead.business_id = Some(business.id);
        let cpf = Uuid::new_v4().simple().to_string()[..14].to_string();
        lead.cpf_cnpj = Some(HeaplessString::from_str(&cpf).unwrap());
        lead_repo.create_batch(vec![lead.clone()], None).await?;

        let owned = lead_repo.find_by_business(business.id).await?;
        assert_eq!(owned.iter().map(|l| l.id).collect::<Vec<_>>(), vec![lead.id]);

        let email = lead.email.clone().unwrap();
        assert_eq!(lead_repo.find_by_email(&email).await?.map(|l| l.id), Some(lead.id));
        assert_eq!(lead_repo.find_by_cpf_cnpj(&cpf).await?.map(|l| l.id), Some(lead.id));
        assert!(lead_repo.find_by_status("new").await?.iter().any(|l| l.id == lead.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_find_conflict_ignores_self() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let lead_repo = &ctx.lead_repos().lead_repository;

        let first = create_test_lead();
        let second = create_test_lead();
        lead_repo.create_batch(vec![first.clone(), second.clone()], None).await?;

        let first_email = first.email.as_deref();
        assert!(lead_repo.find_conflict(first.id, first_email, None).await?.is_none());
        assert_eq!(
            lead_repo.find_conflict(second.id, first_email, None).await?.map(|l| l.id),
            Some(first.id)
        );
        assert!(lead_repo.find_conflict(second.id, None, None).await?.is_none());

        Ok(())
    }
}
