use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::money;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 100))]
    pub channel: String,

    #[validate(custom(function = "money"))]
    pub total_budget: Option<Decimal>,

    #[validate(url, length(max = 500))]
    pub creative_link: Option<String>,

    pub start_date: Option<DateTime<Utc>>,

    #[validate(length(max = 100))]
    pub campaign_type: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub status: Option<String>,

    #[validate(length(max = 200))]
    pub responsible_name: Option<String>,

    #[validate(custom(function = "money"))]
    pub daily_budget: Option<Decimal>,

    #[validate(url, length(max = 500))]
    pub webhook_url: Option<String>,

    pub cost_per_click: Option<Decimal>,

    #[validate(range(min = 0))]
    pub clicks_to_date: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignRequest {
    #[validate(length(min = 1, max = 100))]
    pub channel: Option<String>,

    #[validate(custom(function = "money"))]
    pub total_budget: Option<Decimal>,

    #[validate(url, length(max = 500))]
    pub creative_link: Option<String>,

    pub start_date: Option<DateTime<Utc>>,

    #[validate(length(max = 100))]
    pub campaign_type: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub status: Option<String>,

    #[validate(length(max = 200))]
    pub responsible_name: Option<String>,

    #[validate(custom(function = "money"))]
    pub daily_budget: Option<Decimal>,

    #[validate(url, length(max = 500))]
    pub webhook_url: Option<String>,

    pub cost_per_click: Option<Decimal>,

    #[validate(range(min = 0))]
    pub clicks_to_date: Option<i64>,
}

/// Optional filters for `GET /campaigns`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignFilter {
    pub status: Option<String>,
    pub channel: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_channel_required() {
        let result: Result<CreateCampaignRequest, _> = serde_json::from_str(r#"{"title": "Spring"}"#);
        assert!(result.is_err());

        let request: CreateCampaignRequest =
            serde_json::from_str(r#"{"title": "Spring", "channel": "instagram"}"#).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invalid_webhook_url_rejected() {
        let request = CreateCampaignRequest {
            title: "Spring".to_string(),
            channel: "email".to_string(),
            webhook_url: Some("ftp//broken".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
