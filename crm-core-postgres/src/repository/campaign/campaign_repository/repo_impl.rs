use crm_core_db::models::campaign::CampaignModel;
use crm_core_db::utils::hash_as_i64;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};
use std::error::Error;

use postgres_unit_of_work::Executor;
use crate::utils::{get_optional_heapless_string, opt_str, TryFromRow};

pub struct CampaignRepositoryImpl {
    pub executor: Executor,
}

impl CampaignRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

/// Lookup key stored in `title_hash`.
pub fn title_hash(title: &str) -> Result<i64, Box<dyn Error + Send + Sync>> {
    Ok(hash_as_i64(&title)?)
}

/// Binds every column after `id` in table order ($2..$17).
pub(super) fn bind_columns<'q>(
    query: Query<'q, Postgres, PgArguments>,
    item: &'q CampaignModel,
    title_hash: i64,
) -> Query<'q, Postgres, PgArguments> {
    query
        .bind(&item.channel)
        .bind(item.total_budget)
        .bind(item.creative_link.as_deref())
        .bind(item.start_date)
        .bind(item.campaign_type.as_deref())
        .bind(&item.title)
        .bind(title_hash)
        .bind(item.description.as_deref())
        .bind(opt_str(&item.status))
        .bind(item.responsible_name.as_deref())
        .bind(item.daily_budget)
        .bind(item.webhook_url.as_deref())
        .bind(item.cost_per_click)
        .bind(item.clicks_to_date)
        .bind(item.created_at)
        .bind(item.updated_at)
}

impl TryFromRow<PgRow> for CampaignModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(CampaignModel {
            id: row.try_get("id")?,
            channel: row.try_get("channel")?,
            total_budget: row.try_get("total_budget")?,
            creative_link: row.try_get("creative_link")?,
            start_date: row.try_get("start_date")?,
            campaign_type: row.try_get("campaign_type")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            status: get_optional_heapless_string(row, "status")?,
            responsible_name: row.try_get("responsible_name")?,
            daily_budget: row.try_get("daily_budget")?,
            webhook_url: row.try_get("webhook_url")?,
            cost_per_click: row.try_get("cost_per_click")?,
            clicks_to_date: row.try_get("clicks_to_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
