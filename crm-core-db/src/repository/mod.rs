pub mod create_batch;
pub mod delete_batch;
pub mod exist_by_ids;
pub mod load;
pub mod load_batch;
pub mod load_for_update;
pub mod load_history;
pub mod update_batch;

// Re-exports
pub use create_batch::*;
pub use delete_batch::*;
pub use exist_by_ids::*;
pub use load::*;
pub use load_batch::*;
pub use load_for_update::*;
pub use load_history::*;
pub use update_batch::*;
