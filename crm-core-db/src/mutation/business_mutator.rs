use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use crm_core_api::{ApiError, ApiResult};
use heapless::String as HeaplessString;
use sqlx::Database;
use tracing::debug;
use uuid::Uuid;

use crate::models::audit::{AuditLogModel, AuditValue, FieldChange};
use crate::models::business::{BusinessField, BusinessHistoryModel, BusinessModel, BusinessPatch};
use crate::repository::{CreateBatch, LoadForUpdate, UpdateBatch};

use super::diff::compute_changes;

/// Applies partial updates and stage changes to a business while writing one
/// history entry per changed field.
///
/// All repositories must share the caller's transaction: the business row is
/// locked on load, and the update, the audit log and the history entries are
/// committed or rolled back together.
pub struct BusinessMutator<'a, DB, R, L, H> {
    businesses: &'a R,
    audit_logs: &'a L,
    history: &'a H,
    _db: PhantomData<fn() -> DB>,
}

impl<'a, DB, R, L, H> BusinessMutator<'a, DB, R, L, H>
where
    DB: Database,
    R: LoadForUpdate<DB, BusinessModel> + UpdateBatch<DB, BusinessModel>,
    L: CreateBatch<DB, AuditLogModel>,
    H: CreateBatch<DB, BusinessHistoryModel>,
{
    pub fn new(businesses: &'a R, audit_logs: &'a L, history: &'a H) -> Self {
        Self {
            businesses,
            audit_logs,
            history,
            _db: PhantomData,
        }
    }

    /// Applies every submitted field of `patch` and records the ones whose
    /// stored value actually changed.
    pub async fn apply_update(
        &self,
        id: Uuid,
        patch: &BusinessPatch,
        actor: Option<Uuid>,
    ) -> ApiResult<BusinessModel> {
        let current = self.load_locked(id).await?;
        let changes = compute_changes::<BusinessField>(&current, patch);
        debug!(business_id = %id, changed_fields = changes.len(), "Computed business diff");

        let mut updated = current;
        patch.apply_to(&mut updated);
        self.persist(updated, changes, actor).await
    }

    /// Moves the business to `stage_id`. Always records exactly one
    /// `stageId` entry, even when the stage is unchanged.
    pub async fn apply_stage_change(
        &self,
        id: Uuid,
        stage_id: HeaplessString<50>,
        actor: Option<Uuid>,
    ) -> ApiResult<BusinessModel> {
        let current = self.load_locked(id).await?;
        let change = FieldChange {
            field: "stageId",
            old_value: current.stage_id.clone().into(),
            new_value: AuditValue::from(stage_id.clone()),
        };

        let mut updated = current;
        BusinessPatch::stage(stage_id).apply_to(&mut updated);
        self.persist(updated, vec![change], actor).await
    }

    async fn load_locked(&self, id: Uuid) -> ApiResult<BusinessModel> {
        self.businesses
            .load_for_update(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Business", id))
    }

    async fn persist(
        &self,
        mut updated: BusinessModel,
        changes: Vec<FieldChange>,
        actor: Option<Uuid>,
    ) -> ApiResult<BusinessModel> {
        let now = Utc::now();
        updated.updated_at = now;

        let audit_log_id = if changes.is_empty() {
            None
        } else {
            let audit_log = AuditLogModel::new(now, actor);
            let audit_log_id = audit_log.id;
            self.audit_logs.create_batch(vec![audit_log], None).await?;
            updated.audit_log_id = Some(audit_log_id);
            Some(audit_log_id)
        };

        let business_id = updated.id;
        let saved = self
            .businesses
            .update_batch(vec![updated], audit_log_id)
            .await?
            .pop()
            .ok_or_else(|| ApiError::InternalError("Business update returned no row".to_string()))?;

        if !changes.is_empty() {
            let entries = history_entries(business_id, audit_log_id, changes, actor, now);
            self.history.create_batch(entries, audit_log_id).await?;
        }

        Ok(saved)
    }
}

fn history_entries(
    business_id: Uuid,
    audit_log_id: Option<Uuid>,
    changes: Vec<FieldChange>,
    actor: Option<Uuid>,
    created_at: DateTime<Utc>,
) -> Vec<BusinessHistoryModel> {
    changes
        .into_iter()
        .map(|change| BusinessHistoryModel {
            id: Uuid::now_v7(),
            business_id,
            audit_log_id,
            field: change.field.to_string(),
            old_value: change.old_value,
            new_value: change.new_value,
            changed_by: actor,
            created_at,
        })
        .collect()
}
