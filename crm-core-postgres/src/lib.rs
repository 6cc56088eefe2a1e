pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use postgres_repositories::{CrmRepositories, PostgresRepositories, PostgresSession};
pub use postgres_unit_of_work::Executor;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helper;
