use postgres_unit_of_work::Executor;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tracing::debug;

use crate::repository::{
    AuditRepoFactory, AuditRepositories, BusinessRepoFactory, BusinessRepositories, CampaignRepoFactory,
    CampaignRepositories, DealStageRepoFactory, DealStageRepositories, LeadRepoFactory, LeadRepositories,
    StoredFileRepoFactory, StoredFileRepositories, UserRepoFactory, UserRepositories,
};

/// Every repository of the CRM, all running on one session's transaction.
pub struct CrmRepositories {
    pub audit: AuditRepositories,
    pub business: BusinessRepositories,
    pub campaign: CampaignRepositories,
    pub deal_stage: DealStageRepositories,
    pub lead: LeadRepositories,
    pub stored_file: StoredFileRepositories,
    pub user: UserRepositories,
}

impl CrmRepositories {
    pub fn build(executor: &Executor) -> Self {
        Self {
            audit: AuditRepoFactory::new().build_all_repos(executor),
            business: BusinessRepoFactory::new().build_all_repos(executor),
            campaign: CampaignRepoFactory::new().build_all_repos(executor),
            deal_stage: DealStageRepoFactory::new().build_all_repos(executor),
            lead: LeadRepoFactory::new().build_all_repos(executor),
            stored_file: StoredFileRepoFactory::new().build_all_repos(executor),
            user: UserRepoFactory::new().build_all_repos(executor),
        }
    }

    pub fn audit_repos(&self) -> &AuditRepositories {
        &self.audit
    }

    pub fn business_repos(&self) -> &BusinessRepositories {
        &self.business
    }

    pub fn campaign_repos(&self) -> &CampaignRepositories {
        &self.campaign
    }

    pub fn deal_stage_repos(&self) -> &DealStageRepositories {
        &self.deal_stage
    }

    pub fn lead_repos(&self) -> &LeadRepositories {
        &self.lead
    }

    pub fn stored_file_repos(&self) -> &StoredFileRepositories {
        &self.stored_file
    }

    pub fn user_repos(&self) -> &UserRepositories {
        &self.user
    }
}

/// The transaction behind one set of [`CrmRepositories`].
///
/// Dropping a session that was never committed rolls its work back.
pub struct PostgresSession {
    executor: Executor,
}

impl PostgresSession {
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    async fn take(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.executor
            .tx
            .lock()
            .await
            .take()
            .ok_or_else(|| sqlx::Error::Protocol("Transaction has been consumed".to_string()))
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.take().await?.commit().await?;
        debug!("Session committed");
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.take().await?.rollback().await?;
        debug!("Session rolled back");
        Ok(())
    }
}

/// Entry point used by the server: one pool, one session per request.
#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    /// Opens a transaction and builds all repositories on it.
    ///
    /// The repositories see nothing until the returned session is committed;
    /// dropping the session rolls the work back.
    pub async fn create_all_repositories(&self) -> Result<(PostgresSession, CrmRepositories), sqlx::Error> {
        let tx = self.pool.begin().await?;
        let executor = Executor::new(tx);
        let repos = CrmRepositories::build(&executor);
        Ok((PostgresSession { executor }, repos))
    }
}
