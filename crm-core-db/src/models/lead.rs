use chrono::{DateTime, Utc};
use crm_core_api::{ApiError, CreateLeadRequest, UpdateLeadRequest};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::business::BusinessModel;
use crate::models::identifiable::Identifiable;
use crate::utils::{to_heapless, to_optional_heapless};

pub const DEFAULT_LEAD_STATUS: &str = "new";

/// Database model for a prospective customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadModel {
    pub id: Uuid,
    pub business_id: Option<Uuid>,
    pub lead_status: Option<HeaplessString<50>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Unique when present; looked up through `email_hash`
    pub email: Option<String>,
    pub cpf_cnpj: Option<HeaplessString<20>>,
    pub phone: Option<HeaplessString<20>>,
    pub phone2: Option<HeaplessString<20>>,
    pub person_type: Option<HeaplessString<10>>,
    pub device_used: Option<String>,
    /// Campaign whose tracking link brought the lead in
    pub campaign_id: Option<Uuid>,
    pub photo_url: Option<String>,
    pub interest_reason: Option<String>,
    pub estimated_average_ticket: Option<Decimal>,
    pub entry_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeadModel {
    pub fn from_request(
        id: Uuid,
        now: DateTime<Utc>,
        request: CreateLeadRequest,
        campaign_id: Option<Uuid>,
    ) -> Result<Self, ApiError> {
        let lead_status = match request.lead_status.as_deref() {
            Some(status) => to_heapless("leadStatus", status)?,
            None => to_heapless("leadStatus", DEFAULT_LEAD_STATUS)?,
        };
        Ok(Self {
            id,
            business_id: request.business_id,
            lead_status: Some(lead_status),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            cpf_cnpj: to_optional_heapless("cpfCnpj", request.cpf_cnpj.as_deref())?,
            phone: to_optional_heapless("phone", request.phone.as_deref())?,
            phone2: to_optional_heapless("phone2", request.phone2.as_deref())?,
            person_type: to_optional_heapless("personType", request.person_type.as_deref())?,
            device_used: request.device_used,
            campaign_id: campaign_id.or(request.campaign_id),
            photo_url: request.photo_url,
            interest_reason: request.interest_reason,
            estimated_average_ticket: request.estimated_average_ticket,
            entry_date: now,
            updated_at: now,
        })
    }

    /// Applies the submitted fields of `request`.
    pub fn apply(&mut self, request: UpdateLeadRequest, now: DateTime<Utc>) -> Result<(), ApiError> {
        if let Some(status) = to_optional_heapless("leadStatus", request.lead_status.as_deref())? {
            self.lead_status = Some(status);
        }
        if let Some(cpf_cnpj) = to_optional_heapless("cpfCnpj", request.cpf_cnpj.as_deref())? {
            self.cpf_cnpj = Some(cpf_cnpj);
        }
        if let Some(phone) = to_optional_heapless("phone", request.phone.as_deref())? {
            self.phone = Some(phone);
        }
        if let Some(phone2) = to_optional_heapless("phone2", request.phone2.as_deref())? {
            self.phone2 = Some(phone2);
        }
        if let Some(person_type) = to_optional_heapless("personType", request.person_type.as_deref())? {
            self.person_type = Some(person_type);
        }
        self.business_id = request.business_id.or(self.business_id);
        self.first_name = request.first_name.or(self.first_name.take());
        self.last_name = request.last_name.or(self.last_name.take());
        self.email = request.email.or(self.email.take());
        self.device_used = request.device_used.or(self.device_used.take());
        self.campaign_id = request.campaign_id.or(self.campaign_id);
        self.photo_url = request.photo_url.or(self.photo_url.take());
        self.interest_reason = request.interest_reason.or(self.interest_reason.take());
        self.estimated_average_ticket = request.estimated_average_ticket.or(self.estimated_average_ticket);
        self.updated_at = now;
        Ok(())
    }
}

impl Identifiable for LeadModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// The slice of a business embedded in lead responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSummary {
    pub id: Uuid,
    pub title: Option<String>,
    pub status: Option<String>,
    pub closing_value: Option<Decimal>,
    pub stage_id: Option<String>,
}

impl From<&BusinessModel> for BusinessSummary {
    fn from(business: &BusinessModel) -> Self {
        Self {
            id: business.id,
            title: business.title.clone(),
            status: business.status.as_ref().map(|s| s.as_str().to_string()),
            closing_value: business.closing_value,
            stage_id: business.stage_id.as_ref().map(|s| s.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadView {
    #[serde(flatten)]
    pub lead: LeadModel,
    pub business: Option<BusinessSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStatusCount {
    pub lead_status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonTypeCount {
    pub person_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadBusinessCount {
    pub business_id: Uuid,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStatistics {
    pub total_leads: i64,
    pub leads_by_status: Vec<LeadStatusCount>,
    pub leads_by_person_type: Vec<PersonTypeCount>,
    pub leads_by_business: Vec<LeadBusinessCount>,
    pub total_ticket: Decimal,
    /// Leads whose entry date falls within the last 30 days
    pub recent_leads: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lead_defaults_to_new_status() {
        let lead = LeadModel::from_request(Uuid::new_v4(), Utc::now(), CreateLeadRequest::default(), None).unwrap();
        assert_eq!(lead.lead_status.as_ref().map(|s| s.as_str()), Some(DEFAULT_LEAD_STATUS));
    }

    #[test]
    fn test_tracked_campaign_wins_over_submitted_one() {
        let tracked = Uuid::new_v4();
        let request = CreateLeadRequest {
            campaign_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        let lead = LeadModel::from_request(Uuid::new_v4(), Utc::now(), request, Some(tracked)).unwrap();
        assert_eq!(lead.campaign_id, Some(tracked));
    }

    #[test]
    fn test_lead_view_is_flattened() {
        let lead = LeadModel::from_request(Uuid::new_v4(), Utc::now(), CreateLeadRequest::default(), None).unwrap();
        let value = serde_json::to_value(LeadView { lead, business: None }).unwrap();
        assert_eq!(value["leadStatus"], "new");
        assert!(value["business"].is_null());
    }
}
