pub mod repo_impl;
pub mod create_batch;
pub mod delete_batch;
pub mod find_by_business;
pub mod load_batch;

pub use repo_impl::BusinessFileRepositoryImpl;
