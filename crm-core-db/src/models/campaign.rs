use chrono::{DateTime, Utc};
use crm_core_api::{ApiError, CreateCampaignRequest, UpdateCampaignRequest};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::utils::to_optional_heapless;

/// Database model for a marketing campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignModel {
    pub id: Uuid,
    pub channel: String,
    pub total_budget: Option<Decimal>,
    pub creative_link: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub campaign_type: Option<String>,

    /// Unique; looked up through `title_hash`
    pub title: String,
    pub description: Option<String>,
    pub status: Option<HeaplessString<50>>,
    pub responsible_name: Option<String>,
    pub daily_budget: Option<Decimal>,
    pub webhook_url: Option<String>,
    pub cost_per_click: Option<Decimal>,
    pub clicks_to_date: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CampaignModel {
    pub fn from_request(
        id: Uuid,
        now: DateTime<Utc>,
        request: CreateCampaignRequest,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            id,
            channel: request.channel,
            total_budget: request.total_budget,
            creative_link: request.creative_link,
            start_date: request.start_date,
            campaign_type: request.campaign_type,
            title: request.title,
            description: request.description,
            status: to_optional_heapless("status", request.status.as_deref())?,
            responsible_name: request.responsible_name,
            daily_budget: request.daily_budget,
            webhook_url: request.webhook_url,
            cost_per_click: request.cost_per_click,
            clicks_to_date: request.clicks_to_date.unwrap_or(0),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies the submitted fields of `request`.
    pub fn apply(&mut self, request: UpdateCampaignRequest, now: DateTime<Utc>) -> Result<(), ApiError> {
        if let Some(status) = to_optional_heapless("status", request.status.as_deref())? {
            self.status = Some(status);
        }
        if let Some(channel) = request.channel {
            self.channel = channel;
        }
        if let Some(title) = request.title {
            self.title = title;
        }
        if let Some(clicks) = request.clicks_to_date {
            self.clicks_to_date = clicks;
        }
        self.total_budget = request.total_budget.or(self.total_budget);
        self.creative_link = request.creative_link.or(self.creative_link.take());
        self.start_date = request.start_date.or(self.start_date);
        self.campaign_type = request.campaign_type.or(self.campaign_type.take());
        self.description = request.description.or(self.description.take());
        self.responsible_name = request.responsible_name.or(self.responsible_name.take());
        self.daily_budget = request.daily_budget.or(self.daily_budget);
        self.webhook_url = request.webhook_url.or(self.webhook_url.take());
        self.cost_per_click = request.cost_per_click.or(self.cost_per_click);
        self.updated_at = now;
        Ok(())
    }
}

impl Identifiable for CampaignModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_unsubmitted_fields() {
        let request = CreateCampaignRequest {
            title: "Spring".to_string(),
            channel: "instagram".to_string(),
            description: Some("Launch".to_string()),
            ..Default::default()
        };
        let mut campaign = CampaignModel::from_request(Uuid::new_v4(), Utc::now(), request).unwrap();
        assert_eq!(campaign.clicks_to_date, 0);

        let update = UpdateCampaignRequest {
            status: Some("active".to_string()),
            ..Default::default()
        };
        campaign.apply(update, Utc::now()).unwrap();

        assert_eq!(campaign.title, "Spring");
        assert_eq!(campaign.description.as_deref(), Some("Launch"));
        assert_eq!(campaign.status.as_ref().map(|s| s.as_str()), Some("active"));
    }
}
