pub mod audit_log_repository;
pub mod factory;

pub use audit_log_repository::AuditLogRepositoryImpl;
pub use factory::{AuditRepoFactory, AuditRepositories};
