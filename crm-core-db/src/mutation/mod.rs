//! Audit-tracked mutation of businesses and the read side of their history.
//!
//! Everything here is generic over the repository traits so the same code runs
//! against PostgreSQL in production and against in-memory fakes in tests.

pub mod business_mutator;
pub mod diff;
pub mod history_reader;

#[cfg(test)]
pub(crate) mod fakes;

pub use business_mutator::BusinessMutator;
pub use diff::compute_changes;
pub use history_reader::HistoryReader;
