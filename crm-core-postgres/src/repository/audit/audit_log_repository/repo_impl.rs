use async_trait::async_trait;
use crm_core_db::models::audit::AuditLogModel;
use crm_core_db::repository::{load::Load, load_batch::LoadBatch};
use sqlx::Postgres;
use uuid::Uuid;

use postgres_unit_of_work::Executor;

pub struct AuditLogRepositoryImpl {
    pub(crate) executor: Executor,
}

impl AuditLogRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Load<Postgres, AuditLogModel> for AuditLogRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<AuditLogModel>, Box<dyn std::error::Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        Ok(results.into_iter().next().flatten())
    }
}
