use crm_core_db::models::business::{BusinessStatistics, StageCount, StatusCount};
use rust_decimal::Decimal;
use sqlx::Row;
use std::error::Error;

use super::repo_impl::BusinessRepositoryImpl;

impl BusinessRepositoryImpl {
    /// Totals over every business; rows with a null stage or status are not grouped.
    pub async fn statistics(&self) -> Result<BusinessStatistics, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let totals = sqlx::query(
            r#"
            SELECT COUNT(*) AS total,
                   COALESCE(SUM(closing_value), 0) AS total_value,
                   COALESCE(SUM(estimated_margin), 0) AS total_margin
            FROM business
            "#,
        )
        .fetch_one(&mut **transaction)
        .await?;

        let by_stage = sqlx::query(
            r#"
            SELECT stage_id, COUNT(*) AS count FROM business
            WHERE stage_id IS NOT NULL
            GROUP BY stage_id ORDER BY stage_id
            "#,
        )
        .fetch_all(&mut **transaction)
        .await?;

        let by_status = sqlx::query(
            r#"
            SELECT status, COUNT(*) AS count FROM business
            WHERE status IS NOT NULL
            GROUP BY status ORDER BY status
            "#,
        )
        .fetch_all(&mut **transaction)
        .await?;

        let businesses_by_stage = by_stage
            .iter()
            .map(|row| {
                Ok(StageCount {
                    stage_id: row.try_get("stage_id")?,
                    count: row.try_get("count")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let businesses_by_status = by_status
            .iter()
            .map(|row| {
                Ok(StatusCount {
                    status: row.try_get("status")?,
                    count: row.try_get("count")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(BusinessStatistics {
            total_businesses: totals.try_get("total")?,
            businesses_by_stage,
            businesses_by_status,
            total_value: totals.try_get::<Decimal, _>("total_value")?,
            total_margin: totals.try_get::<Decimal, _>("total_margin")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use rust_decimal::Decimal;
    use super::super::test_utils::test_utils::create_test_business;

    #[tokio::test]
    async fn test_statistics_counts_new_rows() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let business_repo = &ctx.business_repos().business_repository;

        let before = business_repo.statistics().await?;

        let mut first = create_test_business("Stats A");
        first.closing_value = Some(Decimal::new(1000, 0));
        first.estimated_margin = Some(Decimal::new(150, 0));
        let mut second = create_test_business("Stats B");
        second.closing_value = Some(Decimal::new(2500, 0));
        second.stage_id = first.stage_id.clone();
        business_repo.create_batch(vec![first.clone(), second], None).await?;

        let after = business_repo.statistics().await?;
        assert_eq!(after.total_businesses, before.total_businesses + 2);
        assert_eq!(after.total_value - before.total_value, Decimal::new(3500, 0));
        assert_eq!(after.total_margin - before.total_margin, Decimal::new(150, 0));

        let stage = first.stage_id.unwrap().to_string();
        let stage_count = after
            .businesses_by_stage
            .iter()
            .find(|s| s.stage_id == stage)
            .map(|s| s.count);
        assert_eq!(stage_count, Some(2));

        Ok(())
    }
}
