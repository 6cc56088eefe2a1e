//! Use cases behind the HTTP handlers
//!
//! Every function runs on the repositories of one request session. The
//! caller commits the session once the function succeeds.

pub mod auth;
pub mod business;
pub mod campaigns;
pub mod deal_stages;
pub mod files;
pub mod leads;
pub mod users;

use crm_core_api::{ApiError, ApiResult};

/// The single row a one-item batch call returned.
pub(crate) fn single<T>(items: Vec<T>, entity: &str) -> ApiResult<T> {
    items
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::InternalError(format!("{entity} was not returned by the repository")))
}
