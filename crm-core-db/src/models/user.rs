use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Database model for user type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "user_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Internal,
    External,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Internal => write!(f, "internal"),
            UserType::External => write!(f, "external"),
        }
    }
}

/// Database model for an account that can authenticate and be attributed
/// as the actor of a change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserModel {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub name: Option<String>,
    pub user_type: UserType,
    pub is_active: bool,

    /// References UserModel.id of the internal user that created this one
    pub created_by: Option<Uuid>,
    pub deleted_by: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserModel {
    pub fn is_internal(&self) -> bool {
        self.user_type == UserType::Internal
    }
}

impl Identifiable for UserModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// Internal user listing row with the creator's name resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalUserView {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub user_type: UserType,
    pub created_by_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = UserModel {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            password_hash: "$2b$10$secret".to_string(),
            name: Some("Ana".to_string()),
            user_type: UserType::Internal,
            is_active: true,
            created_by: None,
            deleted_by: None,
            deleted_at: None,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert_eq!(value["userType"], "internal");
    }
}
