use crate::models::audit::{AuditField, AuditValue};

use super::{BusinessModel, BusinessPatch};

/// Every business attribute that is tracked in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessField {
    LeadId,
    PropertyId,
    StageId,
    Title,
    Description,
    BusinessOrigin,
    Status,
    EstimatedMargin,
    ClosingValue,
    PaymentMethod,
    LossReason,
    CommissionResponsible,
    SaleResponsible,
    ScheduledMeetings,
    TimeInStage,
    ExpectedClosingDate,
    DocumentPending,
    Observation,
    CreatedBy,
}

const ALL_FIELDS: [BusinessField; 19] = [
    BusinessField::LeadId,
    BusinessField::PropertyId,
    BusinessField::StageId,
    BusinessField::Title,
    BusinessField::Description,
    BusinessField::BusinessOrigin,
    BusinessField::Status,
    BusinessField::EstimatedMargin,
    BusinessField::ClosingValue,
    BusinessField::PaymentMethod,
    BusinessField::LossReason,
    BusinessField::CommissionResponsible,
    BusinessField::SaleResponsible,
    BusinessField::ScheduledMeetings,
    BusinessField::TimeInStage,
    BusinessField::ExpectedClosingDate,
    BusinessField::DocumentPending,
    BusinessField::Observation,
    BusinessField::CreatedBy,
];

impl AuditField for BusinessField {
    type Entity = BusinessModel;
    type Patch = BusinessPatch;

    fn all() -> &'static [Self] {
        &ALL_FIELDS
    }

    fn name(&self) -> &'static str {
        match self {
            BusinessField::LeadId => "leadId",
            BusinessField::PropertyId => "propertyId",
            BusinessField::StageId => "stageId",
            BusinessField::Title => "title",
            BusinessField::Description => "description",
            BusinessField::BusinessOrigin => "businessOrigin",
            BusinessField::Status => "status",
            BusinessField::EstimatedMargin => "estimatedMargin",
            BusinessField::ClosingValue => "closingValue",
            BusinessField::PaymentMethod => "paymentMethod",
            BusinessField::LossReason => "lossReason",
            BusinessField::CommissionResponsible => "commissionResponsible",
            BusinessField::SaleResponsible => "saleResponsible",
            BusinessField::ScheduledMeetings => "scheduledMeetings",
            BusinessField::TimeInStage => "timeInStage",
            BusinessField::ExpectedClosingDate => "expectedClosingDate",
            BusinessField::DocumentPending => "documentPending",
            BusinessField::Observation => "observation",
            BusinessField::CreatedBy => "createdBy",
        }
    }

    fn current(&self, entity: &BusinessModel) -> AuditValue {
        match self {
            BusinessField::LeadId => entity.lead_id.clone().into(),
            BusinessField::PropertyId => entity.property_id.clone().into(),
            BusinessField::StageId => entity.stage_id.clone().into(),
            BusinessField::Title => entity.title.clone().into(),
            BusinessField::Description => entity.description.clone().into(),
            BusinessField::BusinessOrigin => entity.business_origin.clone().into(),
            BusinessField::Status => entity.status.clone().into(),
            BusinessField::EstimatedMargin => entity.estimated_margin.into(),
            BusinessField::ClosingValue => entity.closing_value.into(),
            BusinessField::PaymentMethod => entity.payment_method.clone().into(),
            BusinessField::LossReason => entity.loss_reason.clone().into(),
            BusinessField::CommissionResponsible => entity.commission_responsible.clone().into(),
            BusinessField::SaleResponsible => entity.sale_responsible.clone().into(),
            BusinessField::ScheduledMeetings => entity.scheduled_meetings.into(),
            BusinessField::TimeInStage => entity.time_in_stage.into(),
            BusinessField::ExpectedClosingDate => entity.expected_closing_date.into(),
            BusinessField::DocumentPending => entity.document_pending.into(),
            BusinessField::Observation => entity.observation.clone().into(),
            BusinessField::CreatedBy => entity.created_by.clone().into(),
        }
    }

    fn proposed(&self, patch: &BusinessPatch) -> Option<AuditValue> {
        match self {
            BusinessField::LeadId => patch.lead_id.clone().map(Into::into),
            BusinessField::PropertyId => patch.property_id.clone().map(Into::into),
            BusinessField::StageId => patch.stage_id.clone().map(Into::into),
            BusinessField::Title => patch.title.clone().map(Into::into),
            BusinessField::Description => patch.description.clone().map(Into::into),
            BusinessField::BusinessOrigin => patch.business_origin.clone().map(Into::into),
            BusinessField::Status => patch.status.clone().map(Into::into),
            BusinessField::EstimatedMargin => patch.estimated_margin.map(Into::into),
            BusinessField::ClosingValue => patch.closing_value.map(Into::into),
            BusinessField::PaymentMethod => patch.payment_method.clone().map(Into::into),
            BusinessField::LossReason => patch.loss_reason.clone().map(Into::into),
            BusinessField::CommissionResponsible => patch.commission_responsible.clone().map(Into::into),
            BusinessField::SaleResponsible => patch.sale_responsible.clone().map(Into::into),
            BusinessField::ScheduledMeetings => patch.scheduled_meetings.map(Into::into),
            BusinessField::TimeInStage => patch.time_in_stage.map(Into::into),
            BusinessField::ExpectedClosingDate => patch.expected_closing_date.map(Into::into),
            BusinessField::DocumentPending => patch.document_pending.map(Into::into),
            BusinessField::Observation => patch.observation.clone().map(Into::into),
            BusinessField::CreatedBy => patch.created_by.clone().map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_names_are_unique() {
        let names: HashSet<&str> = BusinessField::all().iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), BusinessField::all().len());
        assert!(names.contains("stageId"));
        assert!(names.contains("closingValue"));
    }

    #[test]
    fn test_every_patched_field_is_proposed() {
        let patch = BusinessPatch::from_json(serde_json::json!({
            "leadId": "L-1", "propertyId": "P-1", "stageId": "s", "title": "t",
            "description": "d", "businessOrigin": "o", "status": "open",
            "estimatedMargin": "1", "closingValue": "2", "paymentMethod": "pix",
            "lossReason": "r", "commissionResponsible": "c", "saleResponsible": "s",
            "scheduledMeetings": 1, "timeInStage": 2,
            "expectedClosingDate": "2026-01-01T00:00:00Z", "documentPending": true,
            "observation": "ob", "createdBy": "me"
        }))
        .unwrap();

        for field in BusinessField::all() {
            assert!(field.proposed(&patch).is_some(), "{} not proposed", field.name());
        }
    }
}
