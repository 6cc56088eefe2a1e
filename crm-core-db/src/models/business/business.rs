use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Database model for a sales opportunity tracked through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessModel {
    pub id: Uuid,
    pub lead_id: Option<HeaplessString<50>>,
    pub property_id: Option<HeaplessString<50>>,

    /// Current pipeline position
    pub stage_id: Option<HeaplessString<50>>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub business_origin: Option<String>,
    pub status: Option<HeaplessString<50>>,

    pub estimated_margin: Option<Decimal>,
    pub closing_value: Option<Decimal>,
    pub payment_method: Option<HeaplessString<50>>,
    pub loss_reason: Option<String>,

    pub commission_responsible: Option<String>,
    pub sale_responsible: Option<String>,

    pub scheduled_meetings: Option<i32>,
    pub time_in_stage: Option<i32>,
    pub expected_closing_date: Option<DateTime<Utc>>,
    pub document_pending: Option<bool>,
    pub observation: Option<String>,
    pub created_by: Option<String>,

    pub created_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Audit log of the last mutation that changed at least one field
    pub audit_log_id: Option<Uuid>,
}

impl BusinessModel {
    /// A business with every optional field unset.
    pub fn empty(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            lead_id: None,
            property_id: None,
            stage_id: None,
            title: None,
            description: None,
            business_origin: None,
            status: None,
            estimated_margin: None,
            closing_value: None,
            payment_method: None,
            loss_reason: None,
            commission_responsible: None,
            sale_responsible: None,
            scheduled_meetings: None,
            time_in_stage: None,
            expected_closing_date: None,
            document_pending: None,
            observation: None,
            created_by: None,
            created_date: now,
            updated_at: now,
            audit_log_id: None,
        }
    }
}

impl Identifiable for BusinessModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
