pub mod business_file_repository;
pub mod business_history_repository;
pub mod business_repository;
pub mod factory;

pub use business_file_repository::BusinessFileRepositoryImpl;
pub use business_history_repository::BusinessHistoryRepositoryImpl;
pub use business_repository::BusinessRepositoryImpl;
pub use factory::{BusinessRepoFactory, BusinessRepositories};
