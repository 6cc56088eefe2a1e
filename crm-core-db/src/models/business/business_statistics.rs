use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCount {
    pub stage_id: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Pipeline aggregates; null stage/status values are not grouped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessStatistics {
    pub total_businesses: i64,
    pub businesses_by_stage: Vec<StageCount>,
    pub businesses_by_status: Vec<StatusCount>,
    pub total_value: Decimal,
    pub total_margin: Decimal,
}
