pub mod auth;
pub mod business;
pub mod campaign;
pub mod deal_stage;
pub mod lead;
pub mod response;
pub mod validation;

pub use auth::*;
pub use business::*;
pub use campaign::*;
pub use deal_stage::*;
pub use lead::*;
pub use response::*;
