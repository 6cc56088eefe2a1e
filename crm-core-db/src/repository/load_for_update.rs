use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Loads an entity and locks its row until the surrounding transaction ends.
///
/// Read-diff-write sequences use this so the "old" side of every computed
/// change is the last committed state, not a stale snapshot.
#[async_trait]
pub trait LoadForUpdate<DB: Database, T: Identifiable>: Send + Sync {
    /// # Returns
    /// * `Ok(Some(T))` - The locked entity
    /// * `Ok(None)` - If no entity has this id
    /// * `Err` - An error if the query could not be executed
    async fn load_for_update(&self, id: Uuid) -> Result<Option<T>, Box<dyn std::error::Error + Send + Sync>>;
}
