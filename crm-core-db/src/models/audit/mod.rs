pub mod audit_log;
pub mod audit_value;
pub mod field_change;

pub use audit_log::*;
pub use audit_value::*;
pub use field_change::*;
