use std::sync::Arc;

use postgres_unit_of_work::Executor;

use super::DealStageRepositoryImpl;

/// Factory for creating deal stage module repositories
#[derive(Default)]
pub struct DealStageRepoFactory {}

impl DealStageRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_deal_stage_repo(&self, executor: &Executor) -> Arc<DealStageRepositoryImpl> {
        Arc::new(DealStageRepositoryImpl::new(executor.clone()))
    }

    pub fn build_all_repos(&self, executor: &Executor) -> DealStageRepositories {
        DealStageRepositories {
            deal_stage_repository: self.build_deal_stage_repo(executor),
        }
    }
}

/// Container for all deal stage module repositories
pub struct DealStageRepositories {
    pub deal_stage_repository: Arc<DealStageRepositoryImpl>,
}
