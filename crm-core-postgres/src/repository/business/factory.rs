use std::sync::Arc;

use postgres_unit_of_work::Executor;

use super::{BusinessFileRepositoryImpl, BusinessHistoryRepositoryImpl, BusinessRepositoryImpl};

/// Factory for creating business module repositories
#[derive(Default)]
pub struct BusinessRepoFactory {}

impl BusinessRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_business_repo(&self, executor: &Executor) -> Arc<BusinessRepositoryImpl> {
        Arc::new(BusinessRepositoryImpl::new(executor.clone()))
    }

    pub fn build_business_history_repo(
        &self,
        executor: &Executor,
    ) -> Arc<BusinessHistoryRepositoryImpl> {
        Arc::new(BusinessHistoryRepositoryImpl::new(executor.clone()))
    }

    pub fn build_business_file_repo(&self, executor: &Executor) -> Arc<BusinessFileRepositoryImpl> {
        Arc::new(BusinessFileRepositoryImpl::new(executor.clone()))
    }

    pub fn build_all_repos(&self, executor: &Executor) -> BusinessRepositories {
        BusinessRepositories {
            business_repository: self.build_business_repo(executor),
            business_history_repository: self.build_business_history_repo(executor),
            business_file_repository: self.build_business_file_repo(executor),
        }
    }
}

/// Container for all business module repositories
pub struct BusinessRepositories {
    pub business_repository: Arc<BusinessRepositoryImpl>,
    pub business_history_repository: Arc<BusinessHistoryRepositoryImpl>,
    pub business_file_repository: Arc<BusinessFileRepositoryImpl>,
}
