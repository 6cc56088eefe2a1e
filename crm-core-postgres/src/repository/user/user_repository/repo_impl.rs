use crm_core_db::models::user::UserModel;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::error::Error;

use postgres_unit_of_work::Executor;
use crate::utils::TryFromRow;

pub struct UserRepositoryImpl {
    pub executor: Executor,
}

impl UserRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for UserModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(UserModel {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            name: row.try_get("name")?,
            user_type: row.try_get("user_type")?,
            is_active: row.try_get("is_active")?,
            created_by: row.try_get("created_by")?,
            deleted_by: row.try_get("deleted_by")?,
            deleted_at: row.try_get("deleted_at")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
