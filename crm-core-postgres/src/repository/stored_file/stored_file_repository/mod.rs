pub mod repo_impl;
pub mod create_batch;
pub mod find_active;
pub mod load_batch;
pub mod soft_delete;

pub use repo_impl::StoredFileRepositoryImpl;
