#[cfg(test)]
pub mod test_utils {
    use chrono::Utc;
    use crm_core_db::models::deal_stage::DealStageModel;
    use uuid::Uuid;

    pub fn create_test_deal_stage(position: i32) -> DealStageModel {
        DealStageModel {
            id: Uuid::new_v4(),
            name: format!("Stage {}", Uuid::new_v4().simple()),
            position,
            created_at: Utc::now(),
        }
    }
}
