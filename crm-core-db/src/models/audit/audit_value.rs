use chrono::{DateTime, SecondsFormat, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single before/after value recorded in a history entry.
///
/// Persisted as JSONB in the explicit tagged form `{"type": "...", "value": ...}`
/// so that a decimal never collapses into a float and a timestamp never
/// collapses into free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AuditValue {
    Null,
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl AuditValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AuditValue::Null)
    }

    /// Renders the value as the plain JSON scalar shown to API clients.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AuditValue::Null => serde_json::Value::Null,
            AuditValue::Text(text) => serde_json::Value::String(text.clone()),
            AuditValue::Integer(value) => serde_json::Value::from(*value),
            AuditValue::Decimal(value) => serde_json::Value::String(value.normalize().to_string()),
            AuditValue::Boolean(value) => serde_json::Value::Bool(*value),
            AuditValue::Timestamp(value) => {
                serde_json::Value::String(value.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

impl From<&str> for AuditValue {
    fn from(value: &str) -> Self {
        AuditValue::Text(value.to_string())
    }
}

impl From<String> for AuditValue {
    fn from(value: String) -> Self {
        AuditValue::Text(value)
    }
}

impl<const N: usize> From<HeaplessString<N>> for AuditValue {
    fn from(value: HeaplessString<N>) -> Self {
        AuditValue::Text(value.as_str().to_string())
    }
}

impl From<i32> for AuditValue {
    fn from(value: i32) -> Self {
        AuditValue::Integer(i64::from(value))
    }
}

impl From<i64> for AuditValue {
    fn from(value: i64) -> Self {
        AuditValue::Integer(value)
    }
}

impl From<Decimal> for AuditValue {
    fn from(value: Decimal) -> Self {
        AuditValue::Decimal(value)
    }
}

impl From<bool> for AuditValue {
    fn from(value: bool) -> Self {
        AuditValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for AuditValue {
    fn from(value: DateTime<Utc>) -> Self {
        AuditValue::Timestamp(value)
    }
}

impl<T: Into<AuditValue>> From<Option<T>> for AuditValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AuditValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_tagged_persistence_format() {
        let value = AuditValue::Decimal(Decimal::from_str("5000.50").unwrap());
        let stored = serde_json::to_value(&value).unwrap();
        assert_eq!(stored, json!({"type": "decimal", "value": "5000.50"}));

        let restored: AuditValue = serde_json::from_value(stored).unwrap();
        assert_eq!(restored, value);

        let null = serde_json::to_value(AuditValue::Null).unwrap();
        assert_eq!(null, json!({"type": "null"}));
    }

    #[test]
    fn test_decimal_equality_is_numeric() {
        let plain = AuditValue::from(Decimal::from(5000));
        let scaled = AuditValue::from(Decimal::from_str("5000.00").unwrap());
        assert_eq!(plain, scaled);
    }

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(AuditValue::from(Some("won")).to_json(), json!("won"));
        assert_eq!(AuditValue::from(None::<i32>).to_json(), json!(null));
        assert_eq!(AuditValue::from(3_i32).to_json(), json!(3));
        assert_eq!(AuditValue::from(true).to_json(), json!(true));
        assert_eq!(
            AuditValue::from(Decimal::from_str("5000.00").unwrap()).to_json(),
            json!("5000")
        );
    }
}
