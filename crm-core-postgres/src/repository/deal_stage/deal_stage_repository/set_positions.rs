use std::error::Error;
use uuid::Uuid;

use super::repo_impl::DealStageRepositoryImpl;

impl DealStageRepositoryImpl {
    /// Gives each stage the position `index + 1` of its id in `ordered_ids`.
    /// Returns the number of rows touched.
    pub async fn set_positions(&self, ordered_ids: &[Uuid]) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ordered_ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query(
            r#"
            UPDATE deal_stage AS s SET position = o.ordinality::INTEGER
            FROM UNNEST($1::UUID[]) WITH ORDINALITY AS o(id, ordinality)
            WHERE s.id = o.id
            "#,
        )
        .bind(ordered_ids)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected() as usize)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load_batch::LoadBatch;
    use super::super::test_utils::test_utils::create_test_deal_stage;

    #[tokio::test]
    async fn test_set_positions() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let stage_repo = &ctx.deal_stage_repos().deal_stage_repository;

        let a = create_test_deal_stage(0);
        let b = create_test_deal_stage(0);
        let c = create_test_deal_stage(0);
        stage_repo.create_batch(vec![a.clone(), b.clone(), c.clone()], None).await?;

        let touched = stage_repo.set_positions(&[c.id, a.id, b.id]).await?;
        assert_eq!(touched, 3);

        let positions: Vec<_> = stage_repo
            .load_batch(&[a.id, b.id, c.id])
            .await?
            .into_iter()
            .map(|s| s.map(|s| s.position))
            .collect();
        assert_eq!(positions, vec![Some(2), Some(3), Some(1)]);

        Ok(())
    }
}
