use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validation::money;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    pub business_id: Option<Uuid>,

    #[validate(length(max = 50, message = "Lead status must have at most 50 characters"))]
    pub lead_status: Option<String>,

    #[validate(length(max = 100, message = "First name must have at most 100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 100, message = "Last name must have at most 100 characters"))]
    pub last_name: Option<String>,

    #[validate(email(message = "Email must be a valid email address"), length(max = 150))]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "CPF/CNPJ must have at most 20 characters"))]
    pub cpf_cnpj: Option<String>,

    #[validate(length(max = 20, message = "Phone must have at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 20, message = "Phone 2 must have at most 20 characters"))]
    pub phone2: Option<String>,

    #[validate(length(max = 10, message = "Person type must have at most 10 characters"))]
    pub person_type: Option<String>,

    #[validate(length(max = 100, message = "Device used must have at most 100 characters"))]
    pub device_used: Option<String>,

    pub campaign_id: Option<Uuid>,

    pub photo_url: Option<String>,

    pub interest_reason: Option<String>,

    #[validate(custom(function = "money"))]
    pub estimated_average_ticket: Option<Decimal>,
}

pub type UpdateLeadRequest = CreateLeadRequest;

/// Query string accepted by `POST /leads`. `utm_c` carries the base64-encoded
/// title of the campaign that brought the lead in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadSourceQuery {
    pub utm_c: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_email_rejected() {
        let request = CreateLeadRequest {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_camel_case_payload() {
        let request: CreateLeadRequest = serde_json::from_str(
            r#"{"firstName": "Ana", "cpfCnpj": "12345678901", "estimatedAverageTicket": "1500.50"}"#,
        )
        .unwrap();
        assert_eq!(request.first_name.as_deref(), Some("Ana"));
        assert_eq!(request.cpf_cnpj.as_deref(), Some("12345678901"));
        assert!(request.validate().is_ok());
    }
}
