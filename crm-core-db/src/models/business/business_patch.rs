use chrono::{DateTime, SubsecRound, Utc};
use crm_core_api::domain::validation::round_money;
use crm_core_api::{ApiError, UpdateBusinessRequest};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;

use crate::utils::to_optional_heapless;

use super::BusinessModel;

/// A sparse business update. `None` means the field was not submitted and
/// leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessPatch {
    pub lead_id: Option<HeaplessString<50>>,
    pub property_id: Option<HeaplessString<50>>,
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
}

impl BusinessPatch {
    /// A patch touching only the pipeline stage.
    pub fn stage(stage_id: HeaplessString<50>) -> Self {
        Self {
            stage_id: Some(stage_id),
            ..Default::default()
        }
    }

    /// Writes every submitted field onto `entity`.
    pub fn apply_to(&self, entity: &mut BusinessModel) {
        let BusinessPatch {
            lead_id,
            property_id,
            stage_id,
            title,
            description,
            business_origin,
            status,
            estimated_margin,
            closing_value,
            payment_method,
            loss_reason,
            commission_responsible,
            sale_responsible,
            scheduled_meetings,
            time_in_stage,
            expected_closing_date,
            document_pending,
            observation,
            created_by,
        } = self;

        set(&mut entity.lead_id, lead_id);
        set(&mut entity.property_id, property_id);
        set(&mut entity.stage_id, stage_id);
        set(&mut entity.title, title);
        set(&mut entity.description, description);
        set(&mut entity.business_origin, business_origin);
        set(&mut entity.status, status);
        set(&mut entity.estimated_margin, estimated_margin);
        set(&mut entity.closing_value, closing_value);
        set(&mut entity.payment_method, payment_method);
        set(&mut entity.loss_reason, loss_reason);
        set(&mut entity.commission_responsible, commission_responsible);
        set(&mut entity.sale_responsible, sale_responsible);
        set(&mut entity.scheduled_meetings, scheduled_meetings);
        set(&mut entity.time_in_stage, time_in_stage);
        set(&mut entity.expected_closing_date, expected_closing_date);
        set(&mut entity.document_pending, document_pending);
        set(&mut entity.observation, observation);
        set(&mut entity.created_by, created_by);
    }

    #[cfg(test)]
    pub(crate) fn from_json(value: serde_json::Value) -> Result<Self, ApiError> {
        let request: UpdateBusinessRequest =
            serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))?;
        Self::try_from(request)
    }
}

fn set<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}

/// Timestamps are stored with microsecond precision; sqlx drops the rest.
fn to_stored_timestamp(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(6)
}

/// Submitted values are normalized to what the business columns store, so a
/// resubmitted value compares equal to the persisted one.
impl TryFrom<UpdateBusinessRequest> for BusinessPatch {
    type Error = ApiError;

    fn try_from(request: UpdateBusinessRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            lead_id: to_optional_heapless("leadId", request.lead_id.as_deref())?,
            property_id: to_optional_heapless("propertyId", request.property_id.as_deref())?,
            stage_id: to_optional_heapless("stageId", request.stage_id.as_deref())?,
            title: request.title,
            description: request.description,
            business_origin: request.business_origin,
            status: to_optional_heapless("status", request.status.as_deref())?,
            estimated_margin: request.estimated_margin.map(round_money),
            closing_value: request.closing_value.map(round_money),
            payment_method: to_optional_heapless("paymentMethod", request.payment_method.as_deref())?,
            loss_reason: request.loss_reason,
            commission_responsible: request.commission_responsible,
            sale_responsible: request.sale_responsible,
            scheduled_meetings: request.scheduled_meetings,
            time_in_stage: request.time_in_stage,
            expected_closing_date: request.expected_closing_date.map(to_stored_timestamp),
            document_pending: request.document_pending,
            observation: request.observation,
            created_by: request.created_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_apply_only_touches_submitted_fields() {
        let mut business = BusinessModel::empty(Uuid::new_v4(), Utc::now());
        business.title = Some("Apartment 301".to_string());
        business.status = Some(HeaplessString::try_from("open").unwrap());

        let patch = BusinessPatch::from_json(json!({"status": "won", "closingValue": "5000"})).unwrap();
        patch.apply_to(&mut business);

        assert_eq!(business.title.as_deref(), Some("Apartment 301"));
        assert_eq!(business.status.as_ref().map(|s| s.as_str()), Some("won"));
        assert_eq!(business.closing_value, Some(Decimal::from(5000)));
    }

    #[test]
    fn test_json_null_is_absent() {
        let patch = BusinessPatch::from_json(json!({"title": null})).unwrap();
        assert_eq!(patch, BusinessPatch::default());
    }

    #[test]
    fn test_oversized_code_is_rejected() {
        let result = BusinessPatch::from_json(json!({"stageId": "x".repeat(51)}));
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }

    #[test]
    fn test_values_are_normalized_to_column_precision() {
        let patch = BusinessPatch::from_json(json!({
            "closingValue": "12.345",
            "estimatedMargin": "0.004",
            "expectedClosingDate": "2025-03-01T10:00:00.123456789Z"
        }))
        .unwrap();

        assert_eq!(patch.closing_value, Some(Decimal::new(1235, 2)));
        assert_eq!(patch.estimated_margin, Some(Decimal::ZERO));
        let expected = DateTime::parse_from_rfc3339("2025-03-01T10:00:00.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(patch.expected_closing_date, Some(expected));
    }
}
