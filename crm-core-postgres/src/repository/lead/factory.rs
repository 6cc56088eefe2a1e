use std::sync::Arc;

use postgres_unit_of_work::Executor;

use super::LeadRepositoryImpl;

/// Factory for creating lead module repositories
#[derive(Default)]
pub struct LeadRepoFactory {}

impl LeadRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_lead_repo(&self, executor: &Executor) -> Arc<LeadRepositoryImpl> {
        Arc::new(LeadRepositoryImpl::new(executor.clone()))
    }

    pub fn build_all_repos(&self, executor: &Executor) -> LeadRepositories {
        LeadRepositories {
            lead_repository: self.build_lead_repo(executor),
        }
    }
}

/// Container for all lead module repositories
pub struct LeadRepositories {
    pub lead_repository: Arc<LeadRepositoryImpl>,
}
