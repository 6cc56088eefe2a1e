pub mod models;
pub mod mutation;
pub mod repository;
pub mod utils;

pub use models::*;
pub use mutation::*;
pub use repository::*;
