use crm_core_db::models::lead::LeadModel;
use crm_core_db::utils::hash_as_i64;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};
use std::error::Error;

use postgres_unit_of_work::Executor;
use crate::utils::{get_optional_heapless_string, opt_str, TryFromRow};

pub struct LeadRepositoryImpl {
    pub executor: Executor,
}

impl LeadRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

/// Lookup key stored in `email_hash`.
pub fn email_hash(email: &str) -> Result<i64, Box<dyn Error + Send + Sync>> {
    Ok(hash_as_i64(&email)?)
}

/// Binds every column after `id` in table order ($2..$18).
pub(super) fn bind_columns<'q>(
    query: Query<'q, Postgres, PgArguments>,
    item: &'q LeadModel,
    email_hash: Option<i64>,
) -> Query<'q, Postgres, PgArguments> {
    query
        .bind(item.business_id)
        .bind(opt_str(&item.lead_status))
        .bind(item.first_name.as_deref())
        .bind(item.last_name.as_deref())
        .bind(item.email.as_deref())
        .bind(email_hash)
        .bind(opt_str(&item.cpf_cnpj))
        .bind(opt_str(&item.phone))
        .bind(opt_str(&item.phone2))
        .bind(opt_str(&item.person_type))
        .bind(item.device_used.as_deref())
        .bind(item.campaign_id)
        .bind(item.photo_url.as_deref())
        .bind(item.interest_reason.as_deref())
        .bind(item.estimated_average_ticket)
        .bind(item.entry_date)
        .bind(item.updated_at)
}

pub(super) fn lead_email_hash(item: &LeadModel) -> Result<Option<i64>, Box<dyn Error + Send + Sync>> {
    item.email.as_deref().map(email_hash).transpose()
}

impl TryFromRow<PgRow> for LeadModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(LeadModel {
            id: row.try_get("id")?,
            business_id: row.try_get("business_id")?,
            lead_status: get_optional_heapless_string(row, "lead_status")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            cpf_cnpj: get_optional_heapless_string(row, "cpf_cnpj")?,
            phone: get_optional_heapless_string(row, "phone")?,
            phone2: get_optional_heapless_string(row, "phone2")?,
            person_type: get_optional_heapless_string(row, "person_type")?,
            device_used: row.try_get("device_used")?,
            campaign_id: row.try_get("campaign_id")?,
            photo_url: row.try_get("photo_url")?,
            interest_reason: row.try_get("interest_reason")?,
            estimated_average_ticket: row.try_get("estimated_average_ticket")?,
            entry_date: row.try_get("entry_date")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
