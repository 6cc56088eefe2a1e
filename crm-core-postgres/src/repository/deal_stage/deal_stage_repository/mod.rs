pub mod repo_impl;
pub mod create_batch;
pub mod delete_batch;
pub mod find;
pub mod load_batch;
pub mod set_positions;
pub mod update_batch;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::DealStageRepositoryImpl;
