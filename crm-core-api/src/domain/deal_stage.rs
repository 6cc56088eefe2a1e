use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDealStageRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required and must have at most 100 characters"))]
    pub name: String,

    #[validate(range(min = 0, message = "Position must be greater than or equal to 0"))]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDealStageRequest {
    #[validate(length(min = 1, max = 100, message = "Name must have at most 100 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 0, message = "Position must be greater than or equal to 0"))]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderStagesRequest {
    #[validate(length(min = 1, message = "At least one stage is required"))]
    pub stage_ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_position_rejected() {
        let request = CreateDealStageRequest {
            name: "Proposal".to_string(),
            position: Some(-1),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_reorder_rejected() {
        let request = ReorderStagesRequest { stage_ids: vec![] };
        assert!(request.validate().is_err());
    }
}
