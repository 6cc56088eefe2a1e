use std::sync::Arc;

use postgres_unit_of_work::Executor;

use super::UserRepositoryImpl;

/// Factory for creating user module repositories
#[derive(Default)]
pub struct UserRepoFactory {}

impl UserRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_user_repo(&self, executor: &Executor) -> Arc<UserRepositoryImpl> {
        Arc::new(UserRepositoryImpl::new(executor.clone()))
    }

    pub fn build_all_repos(&self, executor: &Executor) -> UserRepositories {
        UserRepositories {
            user_repository: self.build_user_repo(executor),
        }
    }
}

/// Container for all user module repositories
pub struct UserRepositories {
    pub user_repository: Arc<UserRepositoryImpl>,
}
