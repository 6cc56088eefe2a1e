pub mod audit;
pub mod business;
pub mod campaign;
pub mod db_init;
pub mod deal_stage;
pub mod lead;
pub mod stored_file;
pub mod user;

pub use audit::{AuditRepoFactory, AuditRepositories};
pub use business::{BusinessRepoFactory, BusinessRepositories};
pub use campaign::{CampaignRepoFactory, CampaignRepositories};
pub use deal_stage::{DealStageRepoFactory, DealStageRepositories};
pub use lead::{LeadRepoFactory, LeadRepositories};
pub use stored_file::{StoredFileRepoFactory, StoredFileRepositories};
pub use user::{UserRepoFactory, UserRepositories};
