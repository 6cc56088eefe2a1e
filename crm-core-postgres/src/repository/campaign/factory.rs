use std::sync::Arc;

use postgres_unit_of_work::Executor;

use super::CampaignRepositoryImpl;

/// Factory for creating campaign module repositories
#[derive(Default)]
pub struct CampaignRepoFactory {}

impl CampaignRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_campaign_repo(&self, executor: &Executor) -> Arc<CampaignRepositoryImpl> {
        Arc::new(CampaignRepositoryImpl::new(executor.clone()))
    }

    pub fn build_all_repos(&self, executor: &Executor) -> CampaignRepositories {
        CampaignRepositories {
            campaign_repository: self.build_campaign_repo(executor),
        }
    }
}

/// Container for all campaign module repositories
pub struct CampaignRepositories {
    pub campaign_repository: Arc<CampaignRepositoryImpl>,
}
