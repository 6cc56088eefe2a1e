#[cfg(test)]
pub mod test_utils {
    use chrono::Utc;
    use crm_core_db::models::campaign::CampaignModel;
    use uuid::Uuid;

    pub fn create_test_campaign(channel: &str) -> CampaignModel {
        let now = Utc::now();
        CampaignModel {
            id: Uuid::new_v4(),
            channel: channel.to_string(),
            total_budget: None,
            creative_link: None,
            start_date: None,
            campaign_type: None,
            title: format!("Campaign {}", Uuid::new_v4().simple()),
            description: None,
            status: None,
            responsible_name: None,
            daily_budget: None,
            webhook_url: None,
            cost_per_click: None,
            clicks_to_date: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
