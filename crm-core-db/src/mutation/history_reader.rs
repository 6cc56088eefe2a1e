use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;

use crm_core_api::{ApiError, ApiResult};
use sqlx::Database;
use tracing::debug;
use uuid::Uuid;

use crate::models::business::{BusinessHistoryModel, BusinessHistoryView};
use crate::models::user::UserModel;
use crate::repository::{ExistByIds, LoadBatch, LoadHistory};

/// Reads the history of a business, newest first, with actor names and
/// emails resolved by a single batched user lookup.
pub struct HistoryReader<'a, DB, B, H, U> {
    businesses: &'a B,
    history: &'a H,
    users: &'a U,
    _db: PhantomData<fn() -> DB>,
}

impl<'a, DB, B, H, U> HistoryReader<'a, DB, B, H, U>
where
    DB: Database,
    B: ExistByIds<DB>,
    H: LoadHistory<DB, BusinessHistoryModel>,
    U: LoadBatch<DB, UserModel>,
{
    pub fn new(businesses: &'a B, history: &'a H, users: &'a U) -> Self {
        Self {
            businesses,
            history,
            users,
            _db: PhantomData,
        }
    }

    pub async fn get_history(&self, business_id: Uuid) -> ApiResult<Vec<BusinessHistoryView>> {
        let exists = self
            .businesses
            .exist_by_ids(&[business_id])
            .await?
            .into_iter()
            .any(|(id, exists)| id == business_id && exists);
        if !exists {
            return Err(ApiError::not_found("Business", business_id));
        }

        let mut entries = self.history.load_history(business_id).await?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        let mut seen = HashSet::new();
        let actor_ids: Vec<Uuid> = entries
            .iter()
            .filter_map(|entry| entry.changed_by)
            .filter(|id| seen.insert(*id))
            .collect();

        let mut actors: HashMap<Uuid, UserModel> = HashMap::new();
        if !actor_ids.is_empty() {
            let users = self.users.load_batch(&actor_ids).await?;
            actors.extend(users.into_iter().flatten().map(|user| (user.id, user)));
        }
        debug!(
            business_id = %business_id,
            entries = entries.len(),
            actors = actor_ids.len(),
            "Loaded business history"
        );

        Ok(entries
            .into_iter()
            .map(|entry| {
                let actor = entry.changed_by.and_then(|id| actors.get(&id));
                let name = actor.and_then(|user| user.name.clone());
                let email = actor.map(|user| user.email.clone());
                BusinessHistoryView::new(entry, name, email)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::audit::AuditValue;
    use crate::models::business::BusinessModel;
    use crate::models::user::UserType;
    use crate::mutation::fakes::{FakeBusinesses, FakeHistory, FakeUsers};
    use chrono::{Duration, Utc};
    use sqlx::Postgres;

    fn entry(business_id: Uuid, field: &str, changed_by: Option<Uuid>, age_secs: i64) -> BusinessHistoryModel {
        BusinessHistoryModel {
            id: Uuid::now_v7(),
            business_id,
            audit_log_id: None,
            field: field.to_string(),
            old_value: AuditValue::Null,
            new_value: AuditValue::Text("x".to_string()),
            changed_by,
            created_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    fn user(name: &str) -> UserModel {
        UserModel {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: String::new(),
            name: Some(name.to_string()),
            user_type: UserType::Internal,
            is_active: true,
            created_by: None,
            deleted_by: None,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_new_business_has_empty_history_and_no_lookup() {
        let business = BusinessModel::empty(Uuid::new_v4(), Utc::now());
        let businesses = FakeBusinesses::with(vec![business.clone()]);
        let history = FakeHistory::default();
        let users = FakeUsers::default();
        let reader = HistoryReader::<Postgres, _, _, _>::new(&businesses, &history, &users);

        let views = reader.get_history(business.id).await.unwrap();

        assert!(views.is_empty());
        assert_eq!(users.load_batch_calls(), 0);
    }

    #[tokio::test]
    async fn test_actor_lookup_is_batched_once() {
        let business = BusinessModel::empty(Uuid::new_v4(), Utc::now());
        let ana = user("Ana");
        let bruno = user("Bruno");
        let businesses = FakeBusinesses::with(vec![business.clone()]);
        let users = FakeUsers::with(vec![ana.clone(), bruno.clone()]);
        let history = FakeHistory::with(vec![
            entry(business.id, "status", Some(ana.id), 50),
            entry(business.id, "title", Some(bruno.id), 40),
            entry(business.id, "stageId", Some(ana.id), 30),
            entry(business.id, "closingValue", Some(bruno.id), 20),
            entry(business.id, "observation", None, 10),
        ]);
        let reader = HistoryReader::<Postgres, _, _, _>::new(&businesses, &history, &users);

        let views = reader.get_history(business.id).await.unwrap();

        assert_eq!(views.len(), 5);
        assert_eq!(users.load_batch_calls(), 1);
        assert_eq!(users.requested_ids().len(), 2);
        assert_eq!(views[0].field, "observation");
        assert_eq!(views[0].changed_by_name, None);
        assert_eq!(views[0].changed_by_email, None);
        assert_eq!(views[1].changed_by_name.as_deref(), Some("Bruno"));
        assert_eq!(views[4].changed_by_email.as_deref(), Some("ana@example.com"));
    }

    #[tokio::test]
    async fn test_newest_first_with_id_tie_break() {
        let business = BusinessModel::empty(Uuid::new_v4(), Utc::now());
        let businesses = FakeBusinesses::with(vec![business.clone()]);
        let users = FakeUsers::default();

        let same_instant = Utc::now();
        let mut first = entry(business.id, "status", None, 0);
        let mut second = entry(business.id, "title", None, 0);
        first.id = Uuid::from_u128(1);
        second.id = Uuid::from_u128(2);
        first.created_at = same_instant;
        second.created_at = same_instant;
        let older = entry(business.id, "stageId", None, 60);
        let history = FakeHistory::with(vec![older.clone(), first.clone(), second.clone()]);
        let reader = HistoryReader::<Postgres, _, _, _>::new(&businesses, &history, &users);

        let views = reader.get_history(business.id).await.unwrap();
        let ids: Vec<Uuid> = views.iter().map(|v| v.id).collect();

        assert_eq!(ids, vec![second.id, first.id, older.id]);
    }

    #[tokio::test]
    async fn test_unknown_actor_resolves_to_null() {
        let business = BusinessModel::empty(Uuid::new_v4(), Utc::now());
        let businesses = FakeBusinesses::with(vec![business.clone()]);
        let users = FakeUsers::default();
        let history = FakeHistory::with(vec![entry(business.id, "status", Some(Uuid::new_v4()), 0)]);
        let reader = HistoryReader::<Postgres, _, _, _>::new(&businesses, &history, &users);

        let views = reader.get_history(business.id).await.unwrap();

        assert_eq!(views.len(), 1);
        assert!(views[0].changed_by.is_some());
        assert_eq!(views[0].changed_by_name, None);
        assert_eq!(views[0].changed_by_email, None);
    }

    #[tokio::test]
    async fn test_missing_business_is_not_found() {
        let businesses = FakeBusinesses::default();
        let history = FakeHistory::default();
        let users = FakeUsers::default();
        let reader = HistoryReader::<Postgres, _, _, _>::new(&businesses, &history, &users);

        let result = reader.get_history(Uuid::new_v4()).await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
