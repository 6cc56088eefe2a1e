use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for reading the append-only history of an entity
///
/// Implementations return entries newest first: creation time descending,
/// ties broken by entry id descending.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The history entry type
#[async_trait]
pub trait LoadHistory<DB: Database, T: Identifiable>: Send + Sync {
    /// Load every history entry recorded for `entity_id`
    async fn load_history(&self, entity_id: Uuid) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
