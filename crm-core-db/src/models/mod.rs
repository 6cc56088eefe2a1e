pub mod identifiable;
pub mod audit;
pub mod business;
pub mod campaign;
pub mod deal_stage;
pub mod lead;
pub mod stored_file;
pub mod user;

// Re-exports
pub use identifiable::*;
pub use audit::*;
pub use business::*;
pub use campaign::*;
pub use deal_stage::*;
pub use lead::*;
pub use stored_file::*;
pub use user::*;
