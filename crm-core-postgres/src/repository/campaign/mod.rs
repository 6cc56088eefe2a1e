pub mod campaign_repository;
pub mod factory;

pub use campaign_repository::CampaignRepositoryImpl;
pub use factory::{CampaignRepoFactory, CampaignRepositories};
