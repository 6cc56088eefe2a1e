use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::audit::AuditValue;
use crate::models::identifiable::Identifiable;

/// Database model for one append-only history entry of a business.
///
/// `business_id` has no foreign key: entries survive deletion of the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHistoryModel {
    pub id: Uuid,
    pub business_id: Uuid,
    pub audit_log_id: Option<Uuid>,
    pub field: String,
    pub old_value: AuditValue,
    pub new_value: AuditValue,
    pub changed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for BusinessHistoryModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// A history entry enriched with the display identity of its actor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHistoryView {
    pub id: Uuid,
    pub business_id: Uuid,
    pub field: String,
    pub old_value: serde_json::Value,
    pub new_value: serde_json::Value,
    pub changed_by: Option<Uuid>,
    pub changed_by_name: Option<String>,
    pub changed_by_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BusinessHistoryView {
    pub fn new(
        entry: BusinessHistoryModel,
        changed_by_name: Option<String>,
        changed_by_email: Option<String>,
    ) -> Self {
        Self {
            id: entry.id,
            business_id: entry.business_id,
            field: entry.field,
            old_value: entry.old_value.to_json(),
            new_value: entry.new_value.to_json(),
            changed_by: entry.changed_by,
            changed_by_name,
            changed_by_email,
            created_at: entry.created_at,
        }
    }
}
