pub mod repo_impl;
pub mod create_batch;
pub mod load_history;

pub use repo_impl::BusinessHistoryRepositoryImpl;
