#[cfg(test)]
pub mod test_utils {
    use chrono::Utc;
    use crm_core_db::models::user::{UserModel, UserType};
    use uuid::Uuid;

    pub fn create_test_user(user_type: UserType) -> UserModel {
        let id = Uuid::new_v4();
        UserModel {
            id,
            email: format!("user-{}@example.com", id.simple()),
            password_hash: "$2b$04$notarealhashnotarealhashnotarealhashnotarealha".to_string(),
            name: Some("Test User".to_string()),
            user_type,
            is_active: true,
            created_by: None,
            deleted_by: None,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }
}
