pub mod factory;
pub mod stored_file_repository;

pub use factory::{StoredFileRepoFactory, StoredFileRepositories};
pub use stored_file_repository::StoredFileRepositoryImpl;
