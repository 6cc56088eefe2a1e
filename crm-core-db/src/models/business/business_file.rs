use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Attachment associated with a business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessFileModel {
    pub id: Uuid,
    pub business_id: Uuid,
    /// References StoredFileModel.id when the attachment went through object storage
    pub stored_file_id: Option<Uuid>,
    pub filename: String,
    pub file_type: Option<String>,
    pub public_url: Option<String>,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for BusinessFileModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
