pub mod business;
pub mod business_field;
pub mod business_file;
pub mod business_history;
pub mod business_patch;
pub mod business_statistics;

pub use business::*;
pub use business_field::*;
pub use business_file::*;
pub use business_history::*;
pub use business_patch::*;
pub use business_statistics::*;
