use serde::Serialize;

/// Envelope for every list endpoint: `{ data, count, message }`.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub count: usize,
    pub message: String,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, message: impl Into<String>) -> Self {
        Self {
            count: data.len(),
            data,
            message: message.into(),
        }
    }
}

/// A single entity flattened next to a human readable message.
#[derive(Debug, Clone, Serialize)]
pub struct EntityResponse<T> {
    #[serde(flatten)]
    pub entity: T,
    pub message: String,
}

impl<T> EntityResponse<T> {
    pub fn new(entity: T, message: impl Into<String>) -> Self {
        Self {
            entity,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Item {
        id: u32,
    }

    #[test]
    fn test_list_response_counts_items() {
        let response = ListResponse::new(vec![Item { id: 1 }, Item { id: 2 }], "Items retrieved");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"data": [{"id": 1}, {"id": 2}], "count": 2, "message": "Items retrieved"}));
    }

    #[test]
    fn test_entity_response_is_flattened() {
        let response = EntityResponse::new(Item { id: 7 }, "Item found");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"id": 7, "message": "Item found"}));
    }
}
