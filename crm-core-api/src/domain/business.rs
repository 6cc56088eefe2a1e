use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::money;

/// Payload for `POST /business`. Every attribute is optional; a business can
/// be opened as an empty card and filled in while it moves through the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessRequest {
    #[validate(length(max = 50, message = "Lead ID must have at most 50 characters"))]
    pub lead_id: Option<String>,

    #[validate(length(max = 50, message = "Property ID must have at most 50 characters"))]
    pub property_id: Option<String>,

    #[validate(length(max = 50, message = "Stage ID must have at most 50 characters"))]
    pub stage_id: Option<String>,

    #[validate(length(max = 200, message = "Title must have at most 200 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 100, message = "Business origin must have at most 100 characters"))]
    pub business_origin: Option<String>,

    #[validate(length(max = 50, message = "Status must have at most 50 characters"))]
    pub status: Option<String>,

    #[validate(custom(function = "money"))]
    pub estimated_margin: Option<Decimal>,

    #[validate(custom(function = "money"))]
    pub closing_value: Option<Decimal>,

    #[validate(length(max = 50, message = "Payment method must have at most 50 characters"))]
    pub payment_method: Option<String>,

    pub loss_reason: Option<String>,

    #[validate(length(max = 100, message = "Commission responsible must have at most 100 characters"))]
    pub commission_responsible: Option<String>,

    #[validate(length(max = 100, message = "Sale responsible must have at most 100 characters"))]
    pub sale_responsible: Option<String>,

    #[validate(range(min = 0, message = "Scheduled meetings must be greater than or equal to 0"))]
    pub scheduled_meetings: Option<i32>,

    #[validate(range(min = 0, message = "Time in stage must be greater than or equal to 0"))]
    pub time_in_stage: Option<i32>,

    pub expected_closing_date: Option<DateTime<Utc>>,

    pub document_pending: Option<bool>,

    pub observation: Option<String>,

    #[validate(length(max = 100, message = "Created by must have at most 100 characters"))]
    pub created_by: Option<String>,
}

/// Payload for `PATCH /business/:id`.
///
/// Sparse: only keys present in the body are considered. A key sent as JSON
/// `null` is indistinguishable from an absent key and is ignored.
pub type UpdateBusinessRequest = CreateBusinessRequest;

/// Payload for `PATCH /business/:id/change-stage`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStageRequest {
    #[validate(length(min = 1, max = 50, message = "Stage ID is required and must have at most 50 characters"))]
    pub stage_id: String,
}

/// Metadata attached to a business after its file has been stored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessFileRequest {
    #[validate(length(min = 1, max = 255, message = "File name is required and must have at most 255 characters"))]
    pub filename: String,

    #[validate(length(max = 100, message = "File type must have at most 100 characters"))]
    pub file_type: Option<String>,

    #[validate(url(message = "Public URL must be a valid URL"))]
    pub public_url: Option<String>,
}
