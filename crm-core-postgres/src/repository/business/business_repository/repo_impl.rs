use crm_core_db::models::business::BusinessModel;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};
use std::error::Error;

use postgres_unit_of_work::Executor;
use crate::utils::{get_optional_heapless_string, opt_str, TryFromRow};

pub struct BusinessRepositoryImpl {
    pub executor: Executor,
}

impl BusinessRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

/// Binds every column after `id` in table order ($2..$23).
pub(super) fn bind_columns<'q>(
    query: Query<'q, Postgres, PgArguments>,
    item: &'q BusinessModel,
) -> Query<'q, Postgres, PgArguments> {
    query
        .bind(opt_str(&item.lead_id))
        .bind(opt_str(&item.property_id))
        .bind(opt_str(&item.stage_id))
        .bind(item.title.as_deref())
        .bind(item.description.as_deref())
        .bind(item.business_origin.as_deref())
        .bind(opt_str(&item.status))
        .bind(item.estimated_margin)
        .bind(item.closing_value)
        .bind(opt_str(&item.payment_method))
        .bind(item.loss_reason.as_deref())
        .bind(item.commission_responsible.as_deref())
        .bind(item.sale_responsible.as_deref())
        .bind(item.scheduled_meetings)
        .bind(item.time_in_stage)
        .bind(item.expected_closing_date)
        .bind(item.document_pending)
        .bind(item.observation.as_deref())
        .bind(item.created_by.as_deref())
        .bind(item.created_date)
        .bind(item.updated_at)
        .bind(item.audit_log_id)
}

impl TryFromRow<PgRow> for BusinessModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(BusinessModel {
            id: row.try_get("id")?,
            lead_id: get_optional_heapless_string(row, "lead_id")?,
            property_id: get_optional_heapless_string(row, "property_id")?,
            stage_id: get_optional_heapless_string(row, "stage_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            business_origin: row.try_get("business_origin")?,
            status: get_optional_heapless_string(row, "status")?,
            estimated_margin: row.try_get("estimated_margin")?,
            closing_value: row.try_get("closing_value")?,
            payment_method: get_optional_heapless_string(row, "payment_method")?,
            loss_reason: row.try_get("loss_reason")?,
            commission_responsible: row.try_get("commission_responsible")?,
            sale_responsible: row.try_get("sale_responsible")?,
            scheduled_meetings: row.try_get("scheduled_meetings")?,
            time_in_stage: row.try_get("time_in_stage")?,
            expected_closing_date: row.try_get("expected_closing_date")?,
            document_pending: row.try_get("document_pending")?,
            observation: row.try_get("observation")?,
            created_by: row.try_get("created_by")?,
            created_date: row.try_get("created_date")?,
            updated_at: row.try_get("updated_at")?,
            audit_log_id: row.try_get("audit_log_id")?,
        })
    }
}
