use std::sync::Arc;

use postgres_unit_of_work::Executor;

use super::StoredFileRepositoryImpl;

/// Factory for creating stored file module repositories
#[derive(Default)]
pub struct StoredFileRepoFactory {}

impl StoredFileRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_stored_file_repo(&self, executor: &Executor) -> Arc<StoredFileRepositoryImpl> {
        Arc::new(StoredFileRepositoryImpl::new(executor.clone()))
    }

    pub fn build_all_repos(&self, executor: &Executor) -> StoredFileRepositories {
        StoredFileRepositories {
            stored_file_repository: self.build_stored_file_repo(executor),
        }
    }
}

/// Container for all stored file module repositories
pub struct StoredFileRepositories {
    pub stored_file_repository: Arc<StoredFileRepositoryImpl>,
}
