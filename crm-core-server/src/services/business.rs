//! Business pipeline operations
//!
//! Updates and stage changes go through [`BusinessMutator`] so that every
//! changed field lands in the business history inside the request's
//! transaction. Creation and deletion write no history.

use chrono::Utc;
use crm_core_api::{ApiError, ApiResult, ChangeStageRequest, CreateBusinessRequest, CreateBusinessFileRequest, UpdateBusinessRequest};
use crm_core_db::models::business::{
    BusinessFileModel, BusinessHistoryView, BusinessModel, BusinessPatch, BusinessStatistics,
};
use crm_core_db::mutation::{BusinessMutator, HistoryReader};
use crm_core_db::repository::create_batch::CreateBatch;
use crm_core_db::repository::delete_batch::DeleteBatch;
use crm_core_db::repository::load::Load;
use crm_core_db::utils::to_heapless;
use crm_core_postgres::CrmRepositories;
use sqlx::Postgres;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::AppResult;
use crate::storage::{ObjectStorage, UploadPolicy};

use super::files::{self, UploadedFile};
use super::single;

pub async fn create(repos: &CrmRepositories, request: CreateBusinessRequest) -> ApiResult<BusinessModel> {
    request.validate()?;
    let mut business = BusinessModel::empty(Uuid::new_v4(), Utc::now());
    BusinessPatch::try_from(request)?.apply_to(&mut business);

    let created = single(
        repos.business_repos().business_repository.create_batch(vec![business], None).await?,
        "Business",
    )?;
    info!(business_id = %created.id, "Business created");
    Ok(created)
}

pub async fn list(repos: &CrmRepositories) -> ApiResult<Vec<BusinessModel>> {
    Ok(repos.business_repos().business_repository.find_all().await?)
}

pub async fn get(repos: &CrmRepositories, id: Uuid) -> ApiResult<BusinessModel> {
    repos
        .business_repos()
        .business_repository
        .load(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Business", id))
}

/// History entries of the business are kept.
pub async fn delete(repos: &CrmRepositories, id: Uuid) -> ApiResult<()> {
    let deleted = repos.business_repos().business_repository.delete_batch(&[id], None).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Business", id));
    }
    info!(business_id = %id, "Business deleted");
    Ok(())
}

pub async fn statistics(repos: &CrmRepositories) -> ApiResult<BusinessStatistics> {
    Ok(repos.business_repos().business_repository.statistics().await?)
}

pub async fn by_stage(repos: &CrmRepositories, stage_id: &str) -> ApiResult<Vec<BusinessModel>> {
    Ok(repos.business_repos().business_repository.find_by_stage(stage_id).await?)
}

pub async fn by_status(repos: &CrmRepositories, status: &str) -> ApiResult<Vec<BusinessModel>> {
    Ok(repos.business_repos().business_repository.find_by_status(status).await?)
}

pub async fn by_responsible(repos: &CrmRepositories, responsible: &str) -> ApiResult<Vec<BusinessModel>> {
    Ok(repos.business_repos().business_repository.find_by_responsible(responsible).await?)
}

pub async fn update(
    repos: &CrmRepositories,
    caller: &AuthenticatedUser,
    id: Uuid,
    request: UpdateBusinessRequest,
) -> ApiResult<BusinessModel> {
    request.validate()?;
    let patch = BusinessPatch::try_from(request)?;

    let business = repos.business_repos();
    let mutator = BusinessMutator::<Postgres, _, _, _>::new(
        business.business_repository.as_ref(),
        repos.audit_repos().audit_log_repository.as_ref(),
        business.business_history_repository.as_ref(),
    );
    mutator.apply_update(id, &patch, Some(caller.id)).await
}

pub async fn change_stage(
    repos: &CrmRepositories,
    caller: &AuthenticatedUser,
    id: Uuid,
    request: ChangeStageRequest,
) -> ApiResult<BusinessModel> {
    request.validate()?;
    let stage_id = to_heapless("stageId", &request.stage_id)?;

    let business = repos.business_repos();
    let mutator = BusinessMutator::<Postgres, _, _, _>::new(
        business.business_repository.as_ref(),
        repos.audit_repos().audit_log_repository.as_ref(),
        business.business_history_repository.as_ref(),
    );
    mutator.apply_stage_change(id, stage_id, Some(caller.id)).await
}

pub async fn history(repos: &CrmRepositories, id: Uuid) -> ApiResult<Vec<BusinessHistoryView>> {
    let business = repos.business_repos();
    let reader = HistoryReader::<Postgres, _, _, _>::new(
        business.business_repository.as_ref(),
        business.business_history_repository.as_ref(),
        repos.user_repos().user_repository.as_ref(),
    );
    reader.get_history(id).await
}

/// Links an already stored object to the business.
pub async fn attach_file(
    repos: &CrmRepositories,
    caller: &AuthenticatedUser,
    business_id: Uuid,
    stored_file_id: Option<Uuid>,
    request: CreateBusinessFileRequest,
) -> ApiResult<BusinessFileModel> {
    request.validate()?;
    get(repos, business_id).await?;

    let file = BusinessFileModel {
        id: Uuid::new_v4(),
        business_id,
        stored_file_id,
        filename: request.filename,
        file_type: request.file_type,
        public_url: request.public_url,
        uploaded_by: Some(caller.id),
        created_at: Utc::now(),
    };
    let created = single(
        repos.business_repos().business_file_repository.create_batch(vec![file], None).await?,
        "Business file",
    )?;
    info!(business_id = %business_id, file_id = %created.id, "File attached to business");
    Ok(created)
}

/// Stores one uploaded file and attaches it to a business.
///
/// The business and the attachment metadata are checked before the object is
/// written; an object whose attachment fails is removed again.
pub async fn upload_and_attach(
    repos: &CrmRepositories,
    storage: &dyn ObjectStorage,
    policy: &UploadPolicy,
    caller: &AuthenticatedUser,
    business_id: Uuid,
    file: UploadedFile,
) -> AppResult<BusinessFileModel> {
    get(repos, business_id).await?;
    let mut request = CreateBusinessFileRequest {
        filename: file.filename.clone(),
        file_type: file.content_type.clone(),
        public_url: None,
    };
    request.validate()?;

    let stored = single(files::upload_many(repos, storage, policy, caller, vec![file]).await?, "File")?;
    request.public_url = Some(stored.public_url.clone());
    match attach_file(repos, caller, business_id, Some(stored.id), request).await {
        Ok(attached) => Ok(attached),
        Err(err) => {
            files::discard(storage, &[stored.storage_path]).await;
            Err(err.into())
        }
    }
}

pub async fn remove_file(repos: &CrmRepositories, business_id: Uuid, file_id: Uuid) -> ApiResult<()> {
    let files = &repos.business_repos().business_file_repository;
    match files.load(file_id).await? {
        Some(file) if file.business_id == business_id => {
            files.delete_batch(&[file_id], None).await?;
            Ok(())
        }
        _ => Err(ApiError::NotFound(format!(
            "File with ID {file_id} not found for business {business_id}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core_api::RegisterRequest;
    use crm_core_db::models::user::UserType;
    use crm_core_db::repository::load_history::LoadHistory;
    use crm_core_postgres::test_helper::setup_test_context;
    use rust_decimal::Decimal;

    use crate::error::AppError;
    use crate::services::auth::create_user;
    use crate::storage::LocalObjectStorage;

    async fn caller(repos: &CrmRepositories) -> ApiResult<AuthenticatedUser> {
        let request = RegisterRequest {
            email: format!("seller-{}@example.com", Uuid::new_v4().simple()),
            password: "secret123".to_string(),
            name: Some("Seller".to_string()),
        };
        let user = create_user(repos, request, UserType::Internal, None).await?;
        Ok(AuthenticatedUser::from(&user))
    }

    fn opening(title: &str) -> CreateBusinessRequest {
        CreateBusinessRequest {
            title: Some(title.to_string()),
            stage_id: Some("lead".to_string()),
            status: Some("open".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_writes_history_for_changed_fields() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        let actor = caller(repos).await?;
        let created = create(repos, opening("Warehouse lease")).await?;
        assert!(history(repos, created.id).await?.is_empty());

        let patch: UpdateBusinessRequest =
            serde_json::from_str(r#"{"stageId": "lead", "status": "won", "closingValue": 5000}"#)?;
        let updated = update(repos, &actor, created.id, patch).await?;
        assert_eq!(updated.closing_value, Some(Decimal::from(5000)));

        let entries = history(repos, created.id).await?;
        let mut fields: Vec<_> = entries.iter().map(|e| e.field.as_str()).collect();
        fields.sort();
        assert_eq!(fields, vec!["closingValue", "status"]);
        assert!(entries.iter().all(|e| e.changed_by_name.as_deref() == Some("Seller")));

        Ok(())
    }

    #[tokio::test]
    async fn test_stage_change_to_same_stage_is_recorded() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        let actor = caller(repos).await?;
        let created = create(repos, opening("Office fit-out")).await?;

        change_stage(repos, &actor, created.id, ChangeStageRequest { stage_id: "lead".to_string() }).await?;

        let entries = history(repos, created.id).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field, "stageId");
        assert_eq!(entries[0].old_value, serde_json::json!("lead"));
        assert_eq!(entries[0].new_value, serde_json::json!("lead"));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_keeps_history() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        let actor = caller(repos).await?;
        let created = create(repos, opening("Retail unit")).await?;
        change_stage(repos, &actor, created.id, ChangeStageRequest { stage_id: "proposal".to_string() }).await?;

        delete(repos, created.id).await?;
        assert!(matches!(get(repos, created.id).await, Err(ApiError::NotFound(_))));
        assert!(matches!(history(repos, created.id).await, Err(ApiError::NotFound(_))));

        let kept = ctx
            .business_repos()
            .business_history_repository
            .load_history(created.id)
            .await?;
        assert_eq!(kept.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_of_unknown_business_is_not_found() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let actor = caller(ctx.repos()).await?;

        let result = update(ctx.repos(), &actor, Uuid::new_v4(), UpdateBusinessRequest::default()).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_file_can_only_be_removed_through_its_business() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        let actor = caller(repos).await?;
        let owner = create(repos, opening("Owner")).await?;
        let other = create(repos, opening("Other")).await?;

        let request = CreateBusinessFileRequest {
            filename: "contract.pdf".to_string(),
            file_type: Some("application/pdf".to_string()),
            public_url: Some("http://localhost:8080/storage/contract.pdf".to_string()),
        };
        let file = attach_file(repos, &actor, owner.id, None, request).await?;

        let wrong = remove_file(repos, other.id, file.id).await;
        assert!(matches!(wrong, Err(ApiError::NotFound(_))));

        remove_file(repos, owner.id, file.id).await?;
        assert!(matches!(remove_file(repos, owner.id, file.id).await, Err(ApiError::NotFound(_))));

        Ok(())
    }

    fn stored_objects(root: &std::path::Path) -> usize {
        let Ok(entries) = std::fs::read_dir(root) else {
            return 0;
        };
        entries
            .flatten()
            .map(|entry| {
                let path = entry.path();
                if path.is_dir() { stored_objects(&path) } else { 1 }
            })
            .sum()
    }

    fn contract(len: usize) -> UploadedFile {
        UploadedFile {
            filename: format!("{}.pdf", "c".repeat(len)),
            content_type: Some("application/pdf".to_string()),
            bytes: b"%PDF-1.4".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_failed_attachment_leaves_no_object_behind() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        let actor = caller(repos).await?;
        let owner = create(repos, opening("Attachments")).await?;
        let policy = UploadPolicy {
            max_file_size_bytes: 1024,
            allowed_mime: vec!["application/pdf".to_string()],
        };
        let root = std::env::temp_dir().join(format!("crm-attach-{}", Uuid::new_v4()));

        let storage = LocalObjectStorage::new(&root, "http://localhost:8080/storage");
        let missing = upload_and_attach(repos, &storage, &policy, &actor, Uuid::new_v4(), contract(8)).await;
        assert!(matches!(missing, Err(AppError::Api(ApiError::NotFound(_)))));
        let too_long = upload_and_attach(repos, &storage, &policy, &actor, owner.id, contract(300)).await;
        assert!(matches!(too_long, Err(AppError::Api(ApiError::ValidationError(_)))));
        assert_eq!(stored_objects(&root), 0);

        // The public URL this storage hands out fails attachment validation.
        let unlinkable = LocalObjectStorage::new(&root, "not a url");
        let rejected = upload_and_attach(repos, &unlinkable, &policy, &actor, owner.id, contract(8)).await;
        assert!(matches!(rejected, Err(AppError::Api(ApiError::ValidationError(_)))));
        assert_eq!(stored_objects(&root), 0);

        let attached = upload_and_attach(repos, &storage, &policy, &actor, owner.id, contract(8)).await?;
        assert_eq!(attached.business_id, owner.id);
        assert!(attached.stored_file_id.is_some());
        assert_eq!(stored_objects(&root), 1);

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
