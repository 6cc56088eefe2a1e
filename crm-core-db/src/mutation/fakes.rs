//! In-memory repositories that record how they were called.

use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::audit::AuditLogModel;
use crate::models::business::{BusinessHistoryModel, BusinessModel};
use crate::models::user::UserModel;
use crate::repository::{CreateBatch, ExistByIds, LoadBatch, LoadForUpdate, LoadHistory, UpdateBatch};

type RepoResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Default)]
pub struct FakeBusinesses {
    rows: Mutex<HashMap<Uuid, BusinessModel>>,
    update_calls: AtomicUsize,
}

impl FakeBusinesses {
    pub fn with(items: Vec<BusinessModel>) -> Self {
        let fake = Self::default();
        fake.rows
            .lock()
            .unwrap()
            .extend(items.into_iter().map(|b| (b.id, b)));
        fake
    }

    pub fn get(&self, id: Uuid) -> Option<BusinessModel> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<DB: Database> LoadForUpdate<DB, BusinessModel> for FakeBusinesses {
    async fn load_for_update(&self, id: Uuid) -> RepoResult<Option<BusinessModel>> {
        Ok(self.get(id))
    }
}

#[async_trait]
impl<DB: Database> UpdateBatch<DB, BusinessModel> for FakeBusinesses {
    async fn update_batch(
        &self,
        items: Vec<BusinessModel>,
        _audit_log_id: Option<Uuid>,
    ) -> RepoResult<Vec<BusinessModel>> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        for item in &items {
            rows.insert(item.id, item.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl<DB: Database> ExistByIds<DB> for FakeBusinesses {
    async fn exist_by_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<(Uuid, bool)>> {
        let rows = self.rows.lock().unwrap();
        Ok(ids.iter().map(|id| (*id, rows.contains_key(id))).collect())
    }
}

#[derive(Default)]
pub struct FakeAuditLogs {
    logs: Mutex<Vec<AuditLogModel>>,
}

impl FakeAuditLogs {
    pub fn logs(&self) -> Vec<AuditLogModel> {
        self.logs.lock().unwrap().clone()
    }
}

#[async_trait]
impl<DB: Database> CreateBatch<DB, AuditLogModel> for FakeAuditLogs {
    async fn create_batch(
        &self,
        items: Vec<AuditLogModel>,
        _audit_log_id: Option<Uuid>,
    ) -> RepoResult<Vec<AuditLogModel>> {
        self.logs.lock().unwrap().extend(items.iter().cloned());
        Ok(items)
    }
}

#[derive(Default)]
pub struct FakeHistory {
    entries: Mutex<Vec<BusinessHistoryModel>>,
}

impl FakeHistory {
    pub fn with(entries: Vec<BusinessHistoryModel>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn entries(&self) -> Vec<BusinessHistoryModel> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl<DB: Database> CreateBatch<DB, BusinessHistoryModel> for FakeHistory {
    async fn create_batch(
        &self,
        items: Vec<BusinessHistoryModel>,
        _audit_log_id: Option<Uuid>,
    ) -> RepoResult<Vec<BusinessHistoryModel>> {
        self.entries.lock().unwrap().extend(items.iter().cloned());
        Ok(items)
    }
}

#[async_trait]
impl<DB: Database> LoadHistory<DB, BusinessHistoryModel> for FakeHistory {
    async fn load_history(&self, entity_id: Uuid) -> RepoResult<Vec<BusinessHistoryModel>> {
        Ok(self
            .entries()
            .into_iter()
            .filter(|entry| entry.business_id == entity_id)
            .collect())
    }
}

#[derive(Default)]
pub struct FakeUsers {
    rows: HashMap<Uuid, UserModel>,
    load_batch_calls: AtomicUsize,
    requested: Mutex<Vec<Uuid>>,
}

impl FakeUsers {
    pub fn with(users: Vec<UserModel>) -> Self {
        Self {
            rows: users.into_iter().map(|u| (u.id, u)).collect(),
            ..Default::default()
        }
    }

    pub fn load_batch_calls(&self) -> usize {
        self.load_batch_calls.load(Ordering::SeqCst)
    }

    pub fn requested_ids(&self) -> Vec<Uuid> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl<DB: Database> LoadBatch<DB, UserModel> for FakeUsers {
    async fn load_batch(&self, ids: &[Uuid]) -> RepoResult<Vec<Option<UserModel>>> {
        self.load_batch_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().extend_from_slice(ids);
        Ok(ids.iter().map(|id| self.rows.get(id).cloned()).collect())
    }
}
