#[cfg(test)]
pub mod test_utils {
    use chrono::Utc;
    use crm_core_api::CreateLeadRequest;
    use crm_core_db::models::lead::LeadModel;
    use uuid::Uuid;

    pub fn create_test_lead() -> LeadModel {
        let id = Uuid::new_v4();
        let request = CreateLeadRequest {
            first_name: Some("Ana".to_string()),
            last_name: Some("Souza".to_string()),
            email: Some(format!("lead-{}@example.com", id.simple())),
            ..Default::default()
        };
        LeadModel::from_request(id, Utc::now(), request, None).unwrap()
    }
}
