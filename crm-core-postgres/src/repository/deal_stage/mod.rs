pub mod deal_stage_repository;
pub mod factory;

pub use deal_stage_repository::DealStageRepositoryImpl;
pub use factory::{DealStageRepoFactory, DealStageRepositories};
