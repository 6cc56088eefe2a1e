#[cfg(test)]
pub mod test_utils {
    use chrono::Utc;
    use crm_core_db::models::business::BusinessModel;
    use heapless::String as HeaplessString;
    use std::str::FromStr;
    use uuid::Uuid;

    /// A business in a stage unique to this call, so stage filters see only test rows.
    pub fn create_test_business(title: &str) -> BusinessModel {
        let mut business = BusinessModel::empty(Uuid::new_v4(), Utc::now());
        let stage = format!("stage-{}", &Uuid::new_v4().simple().to_string()[..12]);
        business.title = Some(title.to_string());
        business.stage_id = HeaplessString::from_str(&stage).ok();
        business.status = HeaplessString::from_str("open").ok();
        business
    }
}
