use crm_core_db::models::business::BusinessModel;
use std::error::Error;

use crate::utils::map_rows;

use super::repo_impl::BusinessRepositoryImpl;

const ORDER: &str = "ORDER BY created_date DESC, id DESC";

/// Listing queries, newest first.
impl BusinessRepositoryImpl {
    async fn fetch(
        &self,
        filter: &str,
        arg: Option<&str>,
    ) -> Result<Vec<BusinessModel>, Box<dyn Error + Send + Sync>> {
        let sql = format!("SELECT * FROM business {filter} {ORDER}");
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            let mut query = sqlx::query(&sql);
            if let Some(arg) = arg {
                query = query.bind(arg);
            }
            query.fetch_all(&mut **transaction).await?
        };
        map_rows(&rows)
    }

    pub async fn find_all(&self) -> Result<Vec<BusinessModel>, Box<dyn Error + Send + Sync>> {
        self.fetch("", None).await
    }

    pub async fn find_by_stage(
        &self,
        stage_id: &str,
    ) -> Result<Vec<BusinessModel>, Box<dyn Error + Send + Sync>> {
        self.fetch("WHERE stage_id = $1", Some(stage_id)).await
    }

    pub async fn find_by_status(
        &self,
        status: &str,
    ) -> Result<Vec<BusinessModel>, Box<dyn Error + Send + Sync>> {
        self.fetch("WHERE status = $1", Some(status)).await
    }

    /// Matches either the commission or the sale responsible.
    pub async fn find_by_responsible(
        &self,
        name: &str,
    ) -> Result<Vec<BusinessModel>, Box<dyn Error + Send + Sync>> {
        self.fetch(
            "WHERE commission_responsible = $1 OR sale_responsible = $1",
            Some(name),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use chrono::{Duration, Utc};
    use crm_core_db::repository::create_batch::CreateBatch;
    use heapless::String as HeaplessString;
    use std::str::FromStr;
    use super::super::test_utils::test_utils::create_test_business;

    #[tokio::test]
    async fn test_find_filters() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let business_repo = &ctx.business_repos().business_repository;
        let marker = format!("resp-{}", uuid::Uuid::new_v4());

        let mut older = create_test_business("Older");
        older.created_date = Utc::now() - Duration::hours(1);
        older.commission_responsible = Some(marker.clone());
        older.status = Some(HeaplessString::from_str("open").unwrap());

        let mut newer = create_test_business("Newer");
        newer.sale_responsible = Some(marker.clone());
        newer.status = Some(HeaplessString::from_str("lost").unwrap());

        business_repo
            .create_batch(vec![older.clone(), newer.clone()], None)
            .await?;

        let by_responsible = business_repo.find_by_responsible(&marker).await?;
        let ids: Vec<_> = by_responsible.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);

        let stage = older.stage_id.clone().unwrap();
        let by_stage = business_repo.find_by_stage(&stage).await?;
        assert!(by_stage.iter().any(|b| b.id == older.id));

        let lost = business_repo.find_by_status("lost").await?;
        assert!(lost.iter().any(|b| b.id == newer.id));
        assert!(!lost.iter().any(|b| b.id == older.id));

        let all = business_repo.find_all().await?;
        assert!(all.len() >= 2);

        Ok(())
    }
}
