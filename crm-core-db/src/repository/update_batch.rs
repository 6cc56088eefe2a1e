use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for updating multiple entities in a batch
/// 
/// Every item is written as a whole row on the caller's transaction.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl UpdateBatch<Postgres, BusinessModel> for BusinessRepositoryImpl {
///     async fn update_batch(&self, items: Vec<BusinessModel>, audit_log_id: Option<Uuid>) -> Result<Vec<BusinessModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait UpdateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Update multiple items
    ///
    /// # Arguments
    /// * `items` - A vector of entities to update
    /// * `audit_log_id` - The audit log of this mutation, `None` when nothing audited changed
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - A vector of updated entities
    /// * `Err` - An error if the transaction could not be executed
    async fn update_batch(
        &self,
        items: Vec<T>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}