use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Identifiable;

/// # Documentation
/// - One audit log per mutation request; every history entry written by that
///   request references the same audit log.
/// - `updated_by` is `None` for system-initiated or unattributed changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AuditLogModel {
    pub id: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

impl AuditLogModel {
    /// Creates an audit log with a time-ordered (v7) identifier.
    pub fn new(updated_at: DateTime<Utc>, updated_by: Option<Uuid>) -> Self {
        Self {
            id: Uuid::now_v7(),
            updated_at,
            updated_by,
        }
    }
}

impl Identifiable for AuditLogModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
