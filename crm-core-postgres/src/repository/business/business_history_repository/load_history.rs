use async_trait::async_trait;
use crm_core_db::models::business::BusinessHistoryModel;
use crm_core_db::repository::load_history::LoadHistory;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use crate::utils::map_rows;

use super::repo_impl::BusinessHistoryRepositoryImpl;

impl BusinessHistoryRepositoryImpl {
    pub(super) async fn load_history_impl(
        repo: &BusinessHistoryRepositoryImpl,
        business_id: Uuid,
    ) -> Result<Vec<BusinessHistoryModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT * FROM business_history
                WHERE business_id = $1
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .bind(business_id)
            .fetch_all(&mut **transaction)
            .await?
        };

        map_rows(&rows)
    }
}

#[async_trait]
impl LoadHistory<Postgres, BusinessHistoryModel> for BusinessHistoryRepositoryImpl {
    async fn load_history(&self, entity_id: Uuid) -> Result<Vec<BusinessHistoryModel>, Box<dyn Error + Send + Sync>> {
        Self::load_history_impl(self, entity_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use chrono::{Duration, Utc};
    use crm_core_db::models::audit::{AuditLogModel, AuditValue};
    use crm_core_db::models::business::BusinessHistoryModel;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load_history::LoadHistory;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn entry(business_id: Uuid, audit_log_id: Uuid, field: &str, old: AuditValue, new: AuditValue) -> BusinessHistoryModel {
        BusinessHistoryModel {
            id: Uuid::now_v7(),
            business_id,
            audit_log_id: Some(audit_log_id),
            field: field.to_string(),
            old_value: old,
            new_value: new,
            changed_by: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_history_roundtrips_values_newest_first() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let audit_log_repo = &ctx.audit_repos().audit_log_repository;
        let history_repo = &ctx.business_repos().business_history_repository;

        let audit_log = AuditLogModel::new(Utc::now(), None);
        audit_log_repo.create_batch(vec![audit_log.clone()], None).await?;

        // No business row is needed: history outlives its business.
        let business_id = Uuid::new_v4();
        let mut older = entry(
            business_id,
            audit_log.id,
            "status",
            AuditValue::from("open"),
            AuditValue::from("won"),
        );
        older.created_at = Utc::now() - Duration::minutes(5);
        let newer = entry(
            business_id,
            audit_log.id,
            "closingValue",
            AuditValue::Null,
            AuditValue::from(Decimal::new(5000, 0)),
        );
        history_repo
            .create_batch(vec![older.clone(), newer.clone()], None)
            .await?;

        let loaded = history_repo.load_history(business_id).await?;
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, newer.id);
        assert_eq!(loaded[0].old_value, AuditValue::Null);
        assert_eq!(loaded[0].new_value, AuditValue::Decimal(Decimal::new(5000, 0)));
        assert_eq!(loaded[1].new_value, AuditValue::Text("won".to_string()));

        assert!(history_repo.load_history(Uuid::new_v4()).await?.is_empty());

        Ok(())
    }
}
