use std::sync::Arc;

use postgres_unit_of_work::Executor;

use super::AuditLogRepositoryImpl;

/// Factory for creating audit module repositories
#[derive(Default)]
pub struct AuditRepoFactory {}

impl AuditRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    /// Build an AuditLogRepository on the session's transaction
    pub fn build_audit_log_repo(&self, executor: &Executor) -> Arc<AuditLogRepositoryImpl> {
        Arc::new(AuditLogRepositoryImpl::new(executor.clone()))
    }

    pub fn build_all_repos(&self, executor: &Executor) -> AuditRepositories {
        AuditRepositories {
            audit_log_repository: self.build_audit_log_repo(executor),
        }
    }
}

/// Container for all audit module repositories
pub struct AuditRepositories {
    pub audit_log_repository: Arc<AuditLogRepositoryImpl>,
}
