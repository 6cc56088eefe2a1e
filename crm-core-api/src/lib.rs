pub mod domain;
pub mod error;

pub use error::*;
pub use domain::*;
