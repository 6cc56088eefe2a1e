use crm_core_db::models::lead::{LeadBusinessCount, LeadStatistics, LeadStatusCount, PersonTypeCount};
use rust_decimal::Decimal;
use sqlx::Row;
use std::error::Error;

use super::repo_impl::LeadRepositoryImpl;

impl LeadRepositoryImpl {
    pub async fn statistics(&self) -> Result<LeadStatistics, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let totals = sqlx::query(
            r#"
            SELECT COUNT(*) AS total,
                   COALESCE(SUM(estimated_average_ticket), 0) AS total_ticket,
                   COUNT(*) FILTER (WHERE entry_date >= NOW() - INTERVAL '30 days') AS recent
            FROM lead
            "#,
        )
        .fetch_one(&mut **transaction)
        .await?;

        let by_status = sqlx::query(
            r#"
            SELECT lead_status, COUNT(*) AS count FROM lead
            WHERE lead_status IS NOT NULL
            GROUP BY lead_status ORDER BY lead_status
            "#,
        )
        .fetch_all(&mut **transaction)
        .await?;

        let by_person_type = sqlx::query(
            r#"
            SELECT person_type, COUNT(*) AS count FROM lead
            WHERE person_type IS NOT NULL
            GROUP BY person_type ORDER BY person_type
            "#,
        )
        .fetch_all(&mut **transaction)
        .await?;

        let by_business = sqlx::query(
            r#"
            SELECT business_id, COUNT(*) AS count FROM lead
            WHERE business_id IS NOT NULL
            GROUP BY business_id ORDER BY business_id
            "#,
        )
        .fetch_all(&mut **transaction)
        .await?;

        let leads_by_status = by_status
            .iter()
            .map(|row| {
                Ok(LeadStatusCount {
                    lead_status: row.try_get("lead_status")?,
                    count: row.try_get("count")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let leads_by_person_type = by_person_type
            .iter()
            .map(|row| {
                Ok(PersonTypeCount {
                    person_type: row.try_get("person_type")?,
                    count: row.try_get("count")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let leads_by_business = by_business
            .iter()
            .map(|row| {
                Ok(LeadBusinessCount {
                    business_id: row.try_get("business_id")?,
                    count: row.try_get("count")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(LeadStatistics {
            total_leads: totals.try_get("total")?,
            leads_by_status,
            leads_by_person_type,
            leads_by_business,
            total_ticket: totals.try_get::<Decimal, _>("total_ticket")?,
            recent_leads: totals.try_get("recent")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use chrono::{Duration, Utc};
    use crm_core_db::repository::create_batch::CreateBatch;
    use rust_decimal::Decimal;
    use super::super::test_utils::test_utils::create_test_lead;

    #[tokio::test]
    async fn test_recent_leads_window() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let lead_repo = &ctx.lead_repos().lead_repository;
        let before = lead_repo.statistics().await?;

        let mut fresh = create_test_lead();
        fresh.estimated_average_ticket = Some(Decimal::new(300, 0));
        let mut stale = create_test_lead();
        stale.entry_date = Utc::now() - Duration::days(45);
        lead_repo.create_batch(vec![fresh, stale], None).await?;

        let after = lead_repo.statistics().await?;
        assert_eq!(after.total_leads, before.total_leads + 2);
        assert_eq!(after.recent_leads, before.recent_leads + 1);
        assert_eq!(after.total_ticket - before.total_ticket, Decimal::new(300, 0));

        Ok(())
    }
}
