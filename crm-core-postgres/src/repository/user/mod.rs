pub mod factory;
pub mod user_repository;

pub use factory::{UserRepoFactory, UserRepositories};
pub use user_repository::UserRepositoryImpl;
