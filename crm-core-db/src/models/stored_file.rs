use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Object written to storage through the upload endpoint. Deletion is soft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFileModel {
    pub id: Uuid,
    pub public_url: String,
    #[serde(skip_serializing)]
    pub storage_path: String,
    /// MIME type reported by the client
    pub document_type: Option<String>,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl Identifiable for StoredFileModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
