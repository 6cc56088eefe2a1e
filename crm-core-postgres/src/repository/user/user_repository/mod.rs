pub mod repo_impl;
pub mod create_batch;
pub mod deactivate;
pub mod find_by_email;
pub mod find_internal;
pub mod load_batch;
pub mod update_batch;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::UserRepositoryImpl;
